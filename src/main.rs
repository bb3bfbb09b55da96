use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, warn};
use serde_json::to_string_pretty;
use std::env;

use scmlink::cache_path;
use scmlink::cli::Cli;
use scmlink::models::{ParsedPath, Report};
use scmlink::{ResolverConfig, SourceUrlResolver};

const EXAMPLE_VAR: &str = "EXAMPLE";
const SAMPLE_ENTRY: &str = ".gradle/caches/modules-2/files-2.1/com.fasterxml/classmate/1.7.0/xxxx/classmate-1.7.0.jar!/com/fasterxml/classmate/AnnotationInclusion.class";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let raw = input_path(cli.path);
    debug!("Resolving {}", raw);

    if cli.offline {
        let parsed = cache_path::parse(&raw)?;
        println!("{}", dependency_info(&parsed));
        return Ok(());
    }

    let config = ResolverConfig::from_env();
    if config.github_token.is_none() {
        debug!("GITHUB_TOKEN not set, GitHub API calls are unauthenticated");
    }
    let resolver = SourceUrlResolver::new(config).context("Failed to initialise HTTP client")?;

    let parsed = cache_path::parse(&raw)?;
    let resolution = resolver
        .resolve_parsed(&parsed)
        .with_context(|| format!("Failed to resolve {}", parsed.gav()))?;
    if !resolution.is_verified() {
        warn!("Could not verify {}, returning a best guess", resolution.url);
    }

    if cli.json {
        let report = Report::new(&parsed, resolution);
        println!("{}", to_string_pretty(&report)?);
    } else {
        println!("{}", resolution.url);
    }
    Ok(())
}

/// Positional argument, then `EXAMPLE`, then a classmate sample in the
/// user's Gradle cache.
fn input_path(arg: Option<String>) -> String {
    arg.filter(|p| !p.trim().is_empty())
        .or_else(|| env::var(EXAMPLE_VAR).ok().filter(|p| !p.trim().is_empty()))
        .unwrap_or_else(|| {
            let home = env::var("HOME")
                .or_else(|_| env::var("USERPROFILE"))
                .unwrap_or_else(|_| "~".to_string());
            format!("{}/{}", home.trim_end_matches(['/', '\\']), SAMPLE_ENTRY)
        })
}

fn dependency_info(parsed: &ParsedPath) -> String {
    match parsed.source_path() {
        Some(source) => format!("{}\n\n{}", parsed.gav(), source),
        None => parsed.gav(),
    }
}
