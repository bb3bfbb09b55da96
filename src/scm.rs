//! Normalization of POM `<scm>` URLs and connection strings.
//!
//! # Supported Formats
//! - `https://github.com/owner/repo` (plain web URLs, with or without `.git`)
//! - `scm:git:https://github.com/owner/repo.git` (Maven SCM wrapper)
//! - `scm:git:git@github.com:owner/repo.git` (wrapped SSH shorthand)
//! - `git@gitlab.com:group/repo.git`, `ssh://git@bitbucket.org/team/repo.git`
//!
//! # Implementation Notes
//! - SSH forms are only translated for GitHub, GitLab and Bitbucket; other
//!   hosts must already declare an `http(s)` URL.
//! - Anything that does not end up as an `http(s)` URL with a host is
//!   rejected.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use url::Url;

const KNOWN_SSH_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

lazy_static! {
    /// `scm:{provider}:{payload}`; the provider token never contains a colon.
    static ref SCM_WRAPPER_RE: Regex = Regex::new(r"^scm:[A-Za-z0-9_-]+:(.+)$").unwrap();
    static ref SSH_SHORTHAND_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._-]+@([A-Za-z0-9.-]+):/?(.+)$").unwrap();
    static ref SSH_URL_RE: Regex =
        Regex::new(r"^(?:ssh|git|git\+ssh)://(?:[^@/]+@)?([A-Za-z0-9.-]+)(?::\d+)?/(.+)$").unwrap();
}

/// Hosting flavour of a canonical repository URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKind {
    GitHub,
    GitLab,
    Bitbucket,
    Other,
}

impl HostKind {
    fn from_host(host: &str) -> Self {
        match host.to_ascii_lowercase().as_str() {
            "github.com" | "www.github.com" => Self::GitHub,
            "gitlab.com" | "www.gitlab.com" => Self::GitLab,
            "bitbucket.org" | "www.bitbucket.org" => Self::Bitbucket,
            _ => Self::Other,
        }
    }
}

/// Validated `http(s)` web root of a repository, without `.git` or a
/// trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalRepoUrl {
    url: String,
    host: String,
}

impl CanonicalRepoUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn host_kind(&self) -> HostKind {
        HostKind::from_host(&self.host)
    }
}

impl fmt::Display for CanonicalRepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Normalizes an SCM URL or connection string, or returns `None` when it
/// cannot be expressed as a web URL.
pub fn normalize(scm: &str) -> Option<CanonicalRepoUrl> {
    let mut s = scm.trim().to_string();

    if let Some(captures) = SCM_WRAPPER_RE.captures(&s) {
        s = captures[1].trim().to_string();
    }

    if let Some(translated) = translate_ssh(&s) {
        s = translated;
    }

    let s = s.trim_end_matches('/');
    let s = s.strip_suffix(".git").unwrap_or(s).trim_end_matches('/');

    if !(s.starts_with("http://") || s.starts_with("https://")) {
        return None;
    }

    let parsed = Url::parse(s).ok()?;
    let host = parsed.host_str()?.to_string();

    Some(CanonicalRepoUrl {
        url: s.to_string(),
        host,
    })
}

fn translate_ssh(s: &str) -> Option<String> {
    if s.starts_with("http://") || s.starts_with("https://") {
        return None;
    }

    let captures = SSH_URL_RE
        .captures(s)
        .or_else(|| SSH_SHORTHAND_RE.captures(s))?;
    let host = captures[1].to_ascii_lowercase();
    if !KNOWN_SSH_HOSTS.contains(&host.as_str()) {
        return None;
    }

    Some(format!("https://{}/{}", host, &captures[2]))
}

/// Owner and repository name of a GitHub-hosted project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoHandle {
    pub owner: String,
    pub repo: String,
}

impl RepoHandle {
    pub fn from_url(url: &CanonicalRepoUrl) -> Option<Self> {
        if url.host_kind() != HostKind::GitHub {
            return None;
        }

        let parsed = Url::parse(url.as_str()).ok()?;
        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}
