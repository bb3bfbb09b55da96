//! Parser for dependency-cache paths.
//!
//! Turns a path into a downloaded archive (optionally followed by `!/entry`)
//! back into Maven coordinates.
//!
//! # Supported Formats
//! - Gradle module cache:
//!   `.../modules-2/files-2.1/{group}/{artifact}/{version}/{hash}/{artifact}-{version}.jar!/{entry}`
//! - Maven local repository:
//!   `.../.m2/repository/{group/path}/{artifact}/{version}/{artifact}-{version}[-classifier].jar!/{entry}`
//!
//! # Implementation Notes
//! - A segment "looks like a version" when it starts with an ASCII digit.
//!   Versions such as `1.7.0-RC1` pass; versions with a non-digit first
//!   character are not supported.
//! - Windows separators are normalized before splitting.

use log::debug;

use crate::entry::strip_leading_separator;
use crate::error::ResolveError;
use crate::models::ParsedPath;

const MODULE_CACHE_MARKER: &str = "files-2.1";
const LOCAL_REPOSITORY_MARKER: &str = "repository";

/// Parses `raw`, trying the Gradle module-cache layout first.
pub fn parse(raw: &str) -> Result<ParsedPath, ResolveError> {
    let (archive, entry) = split_entry(raw);
    let normalized = archive.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').collect();

    let parsed = parse_module_cache(&segments, entry.clone())
        .or_else(|| parse_local_repository(&segments, entry));

    match parsed {
        Some(parsed) => {
            debug!("Parsed {} from {}", parsed.gav(), raw);
            Ok(parsed)
        }
        None => Err(ResolveError::UnrecognizedPathFormat {
            path: raw.to_string(),
        }),
    }
}

pub fn looks_like_version(segment: &str) -> bool {
    segment.starts_with(|c: char| c.is_ascii_digit())
}

fn split_entry(raw: &str) -> (&str, Option<String>) {
    match raw.split_once('!') {
        Some((archive, entry)) => {
            let entry = strip_leading_separator(entry.trim());
            let entry = (!entry.is_empty()).then(|| entry.to_string());
            (archive, entry)
        }
        None => (raw, None),
    }
}

fn marker_index(segments: &[&str], marker: &str) -> Option<usize> {
    segments.iter().position(|segment| *segment == marker)
}

fn parse_module_cache(segments: &[&str], entry: Option<String>) -> Option<ParsedPath> {
    let marker = marker_index(segments, MODULE_CACHE_MARKER)?;
    if marker + 3 >= segments.len() {
        return None;
    }

    let mut group_segments = Vec::new();
    let mut index = marker + 1;
    while index + 2 < segments.len() {
        let candidate_artifact = segments[index];
        let candidate_version = segments[index + 1];
        if looks_like_version(candidate_version) {
            return build(&group_segments, candidate_artifact, candidate_version, entry);
        }
        group_segments.push(candidate_artifact);
        index += 1;
    }

    None
}

fn parse_local_repository(segments: &[&str], entry: Option<String>) -> Option<ParsedPath> {
    let marker = marker_index(segments, LOCAL_REPOSITORY_MARKER)?;
    if marker + 4 >= segments.len() {
        return None;
    }

    for index in marker + 1..segments.len().saturating_sub(2) {
        let artifact = segments[index];
        let version = segments[index + 1];
        let file_name = segments[index + 2];
        if looks_like_version(version)
            && file_name.ends_with(".jar")
            && file_name.starts_with(&format!("{}-{}", artifact, version))
        {
            return build(&segments[marker + 1..index], artifact, version, entry);
        }
    }

    None
}

fn build(
    group_segments: &[&str],
    artifact: &str,
    version: &str,
    entry: Option<String>,
) -> Option<ParsedPath> {
    if group_segments.iter().any(|segment| segment.trim().is_empty())
        || group_segments.is_empty()
        || artifact.trim().is_empty()
        || version.trim().is_empty()
    {
        return None;
    }

    Some(ParsedPath::new(
        group_segments.join("."),
        artifact,
        version,
        entry,
    ))
}
