//! Blocking HTTP plumbing shared by the POM, GitHub and web-probe lookups.
//!
//! # Key Features
//! - `Transport` seam so resolvers can be driven by canned responses in tests
//! - A single reqwest client built from [`ResolverConfig`]
//! - Three-valued [`Probe`] result: callers advance to their next candidate on
//!   both `Absent` and `TransientError`
//!
//! # Implementation Notes
//! - No retries. A failed request counts as a negative existence result.
//! - Each request carries its own timeout; the connect timeout and redirect
//!   policy live on the client.
//! - Existence checks are status-only: the answer is final once the headers
//!   arrive and the body is never read.

use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ResolverConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    /// Return as soon as the status line is known; the body stays unread
    pub status_only: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout,
            status_only: false,
        }
    }

    pub fn status_only(mut self) -> Self {
        self.status_only = true;
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The client could not be constructed
    Build(String),

    /// Connection failure, timeout or unreadable body
    Network { url: String, message: String },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Build(msg) => write!(f, "Failed to build HTTP client: {}", msg),
            Self::Network { url, message } => write!(f, "Request to {} failed: {}", url, message),
        }
    }
}

impl std::error::Error for TransportError {}

/// Executes a single GET request.
///
/// Non-2xx answers are returned as responses, not errors.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Outcome of an existence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Probe<T> {
    Exists(T),
    Absent,
    TransientError,
}

impl<T> Probe<T> {
    pub fn exists(self) -> Option<T> {
        match self {
            Self::Exists(value) => Some(value),
            Self::Absent | Self::TransientError => None,
        }
    }

    pub fn is_exists(&self) -> bool {
        matches!(self, Self::Exists(_))
    }
}

/// Runs `request` and classifies the answer.
///
/// 2xx is `Exists`; 404 and 410 are `Absent`; any other status, and any
/// transport failure, is `TransientError`.
pub fn probe(transport: &dyn Transport, request: &HttpRequest) -> Probe<HttpResponse> {
    match transport.execute(request) {
        Ok(response) if response.is_success() => Probe::Exists(response),
        Ok(response) if matches!(response.status, 404 | 410) => {
            debug!("{} -> {} (absent)", request.url, response.status);
            Probe::Absent
        }
        Ok(response) => {
            debug!("{} -> {} (treated as transient)", request.url, response.status);
            Probe::TransientError
        }
        Err(e) => {
            debug!("{}", e);
            Probe::TransientError
        }
    }
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ResolverConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let network_error = |e: reqwest::Error| TransportError::Network {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(network_error)?;
        let status = response.status().as_u16();
        if request.status_only {
            return Ok(HttpResponse::new(status, ""));
        }
        let body = response.text().map_err(network_error)?;

        Ok(HttpResponse { status, body })
    }
}
