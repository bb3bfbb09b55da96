use serde::Serialize;
use std::fmt;

use super::ParsedPath;

/// Whether a resolved repository location is a single file or a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    File,
    Dir,
}

impl PathKind {
    /// Web-UI view segment: `blob` for files, `tree` for directories.
    pub fn view(self) -> &'static str {
        match self {
            Self::File => "blob",
            Self::Dir => "tree",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResolution {
    pub path: String,
    pub kind: PathKind,
}

impl PathResolution {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: PathKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: PathKind::Dir,
        }
    }
}

/// How much the returned URL has been checked against upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// An existence check against the hosting API or web front-end succeeded.
    Verified,
    /// Last-resort guess; no candidate could be confirmed.
    Unverified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    GitHubApi,
    WebProbe,
    BestGuess,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHubApi => write!(f, "github-api"),
            Self::WebProbe => write!(f, "web-probe"),
            Self::BestGuess => write!(f, "best-guess"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub url: String,
    pub confidence: Confidence,
    pub strategy: Strategy,
}

impl Resolution {
    pub fn verified(url: String, strategy: Strategy) -> Self {
        Self {
            url,
            confidence: Confidence::Verified,
            strategy,
        }
    }

    pub fn guessed(url: String) -> Self {
        Self {
            url,
            confidence: Confidence::Unverified,
            strategy: Strategy::BestGuess,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.confidence == Confidence::Verified
    }
}

/// JSON report written by the command line in `--json` mode.
#[derive(Serialize, Debug)]
pub struct Report {
    pub gav: String,
    pub purl: Option<String>,
    pub entry_path: Option<String>,
    pub source_path: Option<String>,
    pub url: String,
    pub confidence: Confidence,
    pub strategy: Strategy,
}

impl Report {
    pub fn new(parsed: &ParsedPath, resolution: Resolution) -> Self {
        Self {
            gav: parsed.gav(),
            purl: parsed.purl(),
            entry_path: parsed.entry_path.clone(),
            source_path: parsed.source_path(),
            url: resolution.url,
            confidence: resolution.confidence,
            strategy: resolution.strategy,
        }
    }
}
