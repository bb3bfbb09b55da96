//! Immutable resolver configuration.
//!
//! Built once per process and handed to every component by reference. Nothing
//! here changes during a resolution.

use std::env;
use std::time::Duration;

pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";
pub const GITHUB_API: &str = "https://api.github.com";
pub const GITHUB_WEB: &str = "https://github.com";
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Base of the Maven-layout repository POMs are fetched from
    pub maven_repo_base: String,
    pub github_api_base: String,
    /// Base used when composing final GitHub blob/tree URLs
    pub github_web_base: String,
    /// Bearer token for the GitHub API; raises the rate limit when present
    pub github_token: Option<String>,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub api_timeout: Duration,
    pub pom_timeout: Duration,
    pub probe_timeout: Duration,
    pub max_redirects: usize,
    pub max_parent_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            maven_repo_base: MAVEN_CENTRAL.to_string(),
            github_api_base: GITHUB_API.to_string(),
            github_web_base: GITHUB_WEB.to_string(),
            github_token: None,
            user_agent: format!("scmlink/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(10),
            api_timeout: Duration::from_secs(10),
            pom_timeout: Duration::from_secs(15),
            probe_timeout: Duration::from_secs(5),
            max_redirects: 10,
            max_parent_depth: 6,
        }
    }
}

impl ResolverConfig {
    /// Defaults plus the optional `GITHUB_TOKEN` from the environment.
    pub fn from_env() -> Self {
        let github_token = env::var(GITHUB_TOKEN_VAR)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Self {
            github_token,
            ..Self::default()
        }
    }

    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }
}
