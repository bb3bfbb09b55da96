//! Terminal failures of a source URL resolution.
//!
//! Only structural problems surface here. Network failures while probing
//! candidates are absorbed by the resolvers and never reach the caller.

/// Error type returned by [`crate::SourceUrlResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The input matches neither the module-cache nor the local-repository layout
    UnrecognizedPathFormat { path: String },

    /// No `<scm>` block was found in the POM or any of its parents
    ScmNotFound { gav: String },

    /// An `<scm>` block exists but cannot be turned into a web URL
    UnsupportedScmHost { gav: String, scm: String },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedPathFormat { path } => {
                write!(f, "Unrecognized Gradle/Maven cache path format: {}", path)
            }
            Self::ScmNotFound { gav } => {
                write!(f, "Cannot obtain SCM info from POM for {}", gav)
            }
            Self::UnsupportedScmHost { gav, scm } => {
                write!(f, "Unsupported SCM URL for {}: {}", gav, scm)
            }
        }
    }
}

impl std::error::Error for ResolveError {}
