pub mod cache_path;
pub mod candidates;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod github;
#[cfg(test)]
mod github_test;
pub mod heuristic;
pub mod http;
pub mod models;
pub mod pom;
pub mod resolver;
pub mod scm;
#[cfg(test)]
mod scm_test;

#[cfg(test)]
mod test_utils;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use http::{HttpRequest, HttpResponse, Transport, TransportError};
pub use models::{Confidence, ParsedPath, Report, Resolution, Strategy};
pub use resolver::SourceUrlResolver;
