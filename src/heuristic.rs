//! API-free fallback that probes a repository's web front-end.
//!
//! Used for hosts other than GitHub, and for GitHub when the API could not
//! confirm a ref or path. Refs are the outer loop and roots the inner one, so
//! ref priority always dominates root choice.

use log::debug;

use crate::candidates::{artifact_roots, join_root, probe_source_roots, resource_roots};
use crate::config::ResolverConfig;
use crate::entry::Target;
use crate::http::{HttpRequest, Transport, probe};
use crate::scm::{CanonicalRepoUrl, HostKind};

/// Path segments a host uses for single-file and directory views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WebLayout {
    pub file_view: &'static str,
    pub dir_view: &'static str,
}

impl WebLayout {
    pub fn for_host(kind: HostKind) -> Self {
        match kind {
            HostKind::GitLab => Self {
                file_view: "-/blob",
                dir_view: "-/tree",
            },
            HostKind::Bitbucket => Self {
                file_view: "src",
                dir_view: "src",
            },
            HostKind::GitHub | HostKind::Other => Self {
                file_view: "blob",
                dir_view: "tree",
            },
        }
    }
}

/// `{repo}/{view}/{ref}[/{path}]`
pub fn view_url(repo: &CanonicalRepoUrl, view: &str, git_ref: &str, path: &str) -> String {
    if path.is_empty() {
        format!("{}/{}/{}", repo, view, git_ref)
    } else {
        format!("{}/{}/{}/{}", repo, view, git_ref, path)
    }
}

/// Root directories worth probing for `target`.
pub fn roots_for(artifact_id: &str, target: &Target) -> Vec<String> {
    match target {
        Target::Source(path) => probe_source_roots(artifact_id, path),
        Target::Resource(path) => resource_roots(artifact_id, path),
        Target::Artifact => artifact_roots(artifact_id),
    }
}

/// Unverified URL built from the first ref and the conventional root.
pub fn best_guess(
    repo: &CanonicalRepoUrl,
    refs: &[String],
    version: &str,
    target: &Target,
) -> String {
    let git_ref = refs
        .first()
        .cloned()
        .unwrap_or_else(|| format!("v{}", version));
    let layout = WebLayout::for_host(repo.host_kind());

    match target {
        Target::Source(path) => view_url(
            repo,
            layout.file_view,
            &git_ref,
            &join_root("src/main/java", path),
        ),
        Target::Resource(path) => view_url(
            repo,
            layout.file_view,
            &git_ref,
            &join_root("src/main/resources", path),
        ),
        Target::Artifact => view_url(repo, layout.dir_view, &git_ref, ""),
    }
}

pub struct HeuristicProbe<'a> {
    transport: &'a dyn Transport,
    config: &'a ResolverConfig,
}

impl<'a> HeuristicProbe<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a ResolverConfig) -> Self {
        Self { transport, config }
    }

    /// First web URL answering 2xx across `refs` x `roots`.
    pub fn probe(
        &self,
        repo: &CanonicalRepoUrl,
        refs: &[String],
        roots: &[String],
        target: &Target,
    ) -> Option<String> {
        let layout = WebLayout::for_host(repo.host_kind());
        let mut views = Vec::new();
        if *target != Target::Artifact {
            views.push(layout.file_view);
        }
        if !views.contains(&layout.dir_view) {
            views.push(layout.dir_view);
        }

        for git_ref in refs {
            for root in roots {
                let path = join_root(root, target.path());
                for view in &views {
                    let url = view_url(repo, view, git_ref, &path);
                    if self.exists(&url) {
                        debug!("Web probe found {}", url);
                        return Some(url);
                    }
                }
            }
        }

        debug!("Web probe exhausted all candidates for {}", repo);
        None
    }

    fn exists(&self, url: &str) -> bool {
        let request = HttpRequest::get(url, self.config.probe_timeout).status_only();
        probe(self.transport, &request).is_exists()
    }
}
