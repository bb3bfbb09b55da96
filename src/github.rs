//! GitHub-backed ref and path resolution.
//!
//! # Key Features
//! - Ref validation through `git/ref/tags/{ref}` and `git/ref/heads/{ref}`,
//!   falling back to the repository's default branch
//! - Contents API probing of conventional source and resource roots
//! - Recursive tree listing with path scoring for non-standard layouts
//!
//! # Implementation Notes
//! - Every failure (transport error, non-2xx, undecodable body) means "not
//!   found" so the caller can fall through to the web probe
//! - Responses are decoded with serde; a missing field is "not found"

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use urlencoding::encode;

use crate::candidates::{
    api_source_roots, artifact_roots, join_root, ref_candidates, resource_roots,
};
use crate::config::ResolverConfig;
use crate::entry::Target;
use crate::http::{HttpRequest, HttpResponse, Probe, Transport, probe};
use crate::models::{PathKind, PathResolution};
use crate::scm::RepoHandle;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

#[derive(Deserialize)]
struct RepoMetadata {
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct TreeListing {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub struct GitHubResolver<'a> {
    transport: &'a dyn Transport,
    config: &'a ResolverConfig,
}

impl<'a> GitHubResolver<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a ResolverConfig) -> Self {
        Self { transport, config }
    }

    /// Resolves a verified blob/tree URL for `target`, or `None` when the API
    /// cannot confirm any ref or path.
    pub fn resolve(
        &self,
        handle: &RepoHandle,
        artifact_id: &str,
        version: &str,
        tag_hint: Option<&str>,
        target: &Target,
    ) -> Option<(String, PathKind)> {
        let refs = ref_candidates(artifact_id, version, tag_hint);
        let git_ref = self
            .pick_ref(handle, &refs)
            .or_else(|| self.default_branch(handle))?;

        let found = self.find_path(handle, &git_ref, artifact_id, target)?;
        let url = blob_url(
            &self.config.github_web_base,
            handle,
            found.kind,
            &git_ref,
            &found.path,
        );
        debug!("GitHub API resolved {}", url);
        Some((url, found.kind))
    }

    /// First candidate that exists as a tag or branch.
    pub fn pick_ref(&self, handle: &RepoHandle, refs: &[String]) -> Option<String> {
        refs.iter()
            .find(|candidate| self.ref_exists(handle, candidate))
            .cloned()
    }

    fn ref_exists(&self, handle: &RepoHandle, git_ref: &str) -> bool {
        ["tags", "heads"].iter().any(|namespace| {
            let url = format!(
                "{}/git/ref/{}/{}",
                self.repo_api(handle),
                namespace,
                encode_path(git_ref)
            );
            self.check(&url)
        })
    }

    pub fn default_branch(&self, handle: &RepoHandle) -> Option<String> {
        let response = self.get(&self.repo_api(handle)).exists()?;
        let metadata: RepoMetadata = serde_json::from_str(&response.body)
            .inspect_err(|e| debug!("Undecodable repository metadata: {}", e))
            .ok()?;
        let branch = metadata.default_branch.filter(|b| !b.trim().is_empty());
        debug!(
            "Default branch of {}/{}: {:?}",
            handle.owner, handle.repo, branch
        );
        branch
    }

    /// Locates `target` within the repository at `git_ref`.
    pub fn find_path(
        &self,
        handle: &RepoHandle,
        git_ref: &str,
        artifact_id: &str,
        target: &Target,
    ) -> Option<PathResolution> {
        match target {
            Target::Source(path) => {
                for root in api_source_roots(artifact_id) {
                    let candidate = join_root(&root, path);
                    if self.check(&self.content_url(handle, git_ref, &candidate)) {
                        return Some(PathResolution::file(candidate));
                    }
                }
                self.search_tree(handle, git_ref, path, artifact_id)
                    .map(PathResolution::file)
            }
            Target::Resource(path) => {
                self.first_existing(handle, git_ref, &resource_roots(artifact_id, path), path)
            }
            Target::Artifact => {
                self.first_existing(handle, git_ref, &artifact_roots(artifact_id), "")
            }
        }
    }

    fn first_existing(
        &self,
        handle: &RepoHandle,
        git_ref: &str,
        roots: &[String],
        path: &str,
    ) -> Option<PathResolution> {
        roots.iter().find_map(|root| {
            let candidate = join_root(root, path);
            let kind = self.content(handle, git_ref, &candidate).exists()?;
            Some(PathResolution {
                path: candidate,
                kind,
            })
        })
    }

    fn content(&self, handle: &RepoHandle, git_ref: &str, path: &str) -> Probe<PathKind> {
        match self.get(&self.content_url(handle, git_ref, path)) {
            Probe::Exists(response) => Probe::Exists(content_kind(&response)),
            Probe::Absent => Probe::Absent,
            Probe::TransientError => Probe::TransientError,
        }
    }

    fn search_tree(
        &self,
        handle: &RepoHandle,
        git_ref: &str,
        target: &str,
        artifact_id: &str,
    ) -> Option<String> {
        let url = format!(
            "{}/git/trees/{}?recursive=1",
            self.repo_api(handle),
            encode_path(git_ref)
        );
        let response = self.get(&url).exists()?;
        let listing: TreeListing = serde_json::from_str(&response.body)
            .inspect_err(|e| debug!("Undecodable tree listing: {}", e))
            .ok()?;
        if listing.truncated {
            debug!("Tree listing for {} is truncated", git_ref);
        }

        best_tree_match(
            listing
                .tree
                .iter()
                .filter(|entry| entry.kind.as_deref().is_none_or(|k| k == "blob"))
                .map(|entry| entry.path.as_str()),
            target,
            artifact_id,
        )
    }

    fn content_url(&self, handle: &RepoHandle, git_ref: &str, path: &str) -> String {
        format!(
            "{}/contents/{}?ref={}",
            self.repo_api(handle),
            encode_path(path),
            encode(git_ref)
        )
    }

    fn repo_api(&self, handle: &RepoHandle) -> String {
        format!(
            "{}/repos/{}/{}",
            self.config.github_api_base.trim_end_matches('/'),
            handle.owner,
            handle.repo
        )
    }

    fn get(&self, url: &str) -> Probe<HttpResponse> {
        probe(self.transport, &self.api_request(url))
    }

    /// Existence check that never reads the response body.
    fn check(&self, url: &str) -> bool {
        probe(self.transport, &self.api_request(url).status_only()).is_exists()
    }

    fn api_request(&self, url: &str) -> HttpRequest {
        let mut request = HttpRequest::get(url, self.config.api_timeout)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.config.github_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }
}

/// `{web}/{owner}/{repo}/{blob|tree}/{ref}[/{path}]`
pub fn blob_url(
    web_base: &str,
    handle: &RepoHandle,
    kind: PathKind,
    git_ref: &str,
    path: &str,
) -> String {
    let base = format!(
        "{}/{}/{}/{}/{}",
        web_base.trim_end_matches('/'),
        handle.owner,
        handle.repo,
        kind.view(),
        git_ref
    );
    if path.is_empty() {
        base
    } else {
        format!("{}/{}", base, path)
    }
}

/// A JSON array is a directory listing; otherwise the `type` field decides,
/// defaulting to a file.
fn content_kind(response: &HttpResponse) -> PathKind {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Array(_)) => PathKind::Dir,
        Ok(Value::Object(map)) if map.get("type").and_then(Value::as_str) == Some("dir") => {
            PathKind::Dir
        }
        _ => PathKind::File,
    }
}

/// Scores a tree path that ends with `target`.
///
/// +5 when the top segment is the artifact id, +3 for a `src/main` pair,
/// +2 for a `java` segment, minus one per leading segment beyond the target.
pub fn score_tree_path(path: &str, target: &str, artifact_id: &str) -> i64 {
    let segments: Vec<&str> = path.split('/').collect();
    let target_len = target.split('/').count();
    let mut score = 0i64;

    if !artifact_id.is_empty() && segments.first() == Some(&artifact_id) {
        score += 5;
    }
    if segments.windows(2).any(|pair| pair == ["src", "main"]) {
        score += 3;
    }
    if segments.contains(&"java") {
        score += 2;
    }

    score - segments.len().saturating_sub(target_len) as i64
}

/// Highest-scoring path ending with `target`; ties keep the first seen.
pub fn best_tree_match<'p>(
    paths: impl IntoIterator<Item = &'p str>,
    target: &str,
    artifact_id: &str,
) -> Option<String> {
    let suffix = format!("/{}", target);
    let mut best: Option<(&str, i64)> = None;

    for path in paths {
        if path != target && !path.ends_with(&suffix) {
            continue;
        }
        let score = score_tree_path(path, target, artifact_id);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((path, score));
        }
    }

    best.map(|(path, _)| path.to_string())
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
