//! End-to-end resolution of a cache path into a hosted source URL.
//!
//! # Key Features
//! - Parse, POM lookup, SCM normalization, then GitHub API or web probe
//! - Falls through to an unverified best guess once a repository is known
//!
//! # Implementation Notes
//! - Only the first three stages can fail; after a repository URL has been
//!   derived a URL is always returned, with [`Confidence`] telling the caller
//!   whether it was checked
//! - All requests of one resolution run sequentially on the calling thread
//!
//! [`Confidence`]: crate::models::Confidence

use log::debug;

use crate::cache_path;
use crate::candidates::ref_candidates;
use crate::config::ResolverConfig;
use crate::entry::Target;
use crate::error::ResolveError;
use crate::github::GitHubResolver;
use crate::heuristic::{HeuristicProbe, best_guess, roots_for};
use crate::http::{ReqwestTransport, Transport, TransportError};
use crate::models::{ParsedPath, Resolution, Strategy};
use crate::pom::PomResolver;
use crate::scm::{CanonicalRepoUrl, RepoHandle, normalize};

/// Resolves dependency-cache paths to repository web URLs.
///
/// Holds no mutable state; one instance can serve any number of threads.
pub struct SourceUrlResolver {
    config: ResolverConfig,
    transport: Box<dyn Transport>,
}

impl SourceUrlResolver {
    /// Builds a resolver backed by a real HTTP client.
    pub fn new(config: ResolverConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: ResolverConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, raw: &str) -> Result<Resolution, ResolveError> {
        let parsed = cache_path::parse(raw)?;
        debug!("Parsed {} as {}", raw, parsed.gav());
        self.resolve_parsed(&parsed)
    }

    pub fn resolve_parsed(&self, parsed: &ParsedPath) -> Result<Resolution, ResolveError> {
        let transport = self.transport.as_ref();
        let gav = parsed.gav();

        let scm = PomResolver::new(transport, &self.config)
            .resolve_scm(&parsed.group_id, &parsed.artifact_id, &parsed.version)
            .filter(|scm| scm.has_location())
            .ok_or_else(|| ResolveError::ScmNotFound { gav: gav.clone() })?;

        let repo = scm
            .locations()
            .find_map(normalize)
            .ok_or_else(|| ResolveError::UnsupportedScmHost {
                gav: gav.clone(),
                scm: scm.to_string(),
            })?;
        debug!("Repository for {} is {}", gav, repo);

        let target = Target::from_entry(parsed.entry_path.as_deref());
        let tag = scm.tag.as_deref();
        Ok(self.locate(&repo, parsed, tag, &target))
    }

    fn locate(
        &self,
        repo: &CanonicalRepoUrl,
        parsed: &ParsedPath,
        tag: Option<&str>,
        target: &Target,
    ) -> Resolution {
        let transport = self.transport.as_ref();

        if let Some(handle) = RepoHandle::from_url(repo) {
            let resolved = GitHubResolver::new(transport, &self.config).resolve(
                &handle,
                &parsed.artifact_id,
                &parsed.version,
                tag,
                target,
            );
            if let Some((url, _)) = resolved {
                return Resolution::verified(url, Strategy::GitHubApi);
            }
            debug!("GitHub API could not confirm {}, probing the web UI", repo);
        }

        let refs = ref_candidates(&parsed.artifact_id, &parsed.version, tag);
        let roots = roots_for(&parsed.artifact_id, target);
        if let Some(url) =
            HeuristicProbe::new(transport, &self.config).probe(repo, &refs, &roots, target)
        {
            return Resolution::verified(url, Strategy::WebProbe);
        }

        let url = best_guess(repo, &refs, &parsed.version, target);
        debug!("Falling back to unverified {}", url);
        Resolution::guessed(url)
    }
}
