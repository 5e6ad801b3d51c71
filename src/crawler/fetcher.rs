//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the checker:
//! - Building an HTTP client with the configured user agent and timeout
//! - GET requests that return status, headers and body
//! - Classifying transport failures (timeout, connection, other)
//!
//! The crawler and the link checker only see the [`Fetcher`] trait, so tests
//! can substitute an in-memory site.

use crate::config::{CrawlerConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The server answered; any status code, including errors
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Canonical reason phrase for the status code
        reason: String,
        /// Response headers
        headers: HeaderMap,
        /// Raw body bytes
        body: Vec<u8>,
    },

    /// The request did not complete within the fixed timeout
    Timeout,

    /// The connection could not be established (DNS, refused, TLS)
    ConnectionFailure {
        /// Error description
        error: String,
    },

    /// Any other transport failure
    OtherError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Builds a `Success` outcome with an empty header map
    ///
    /// The reason phrase is derived from the status code.
    pub fn success(final_url: Url, status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::Success {
            final_url,
            status_code,
            reason: reason_phrase(status_code),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Returns true if the server answered with a status below 400
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { status_code, .. } if *status_code < 400)
    }

    /// Short human-readable description of a failed outcome
    pub fn describe(&self) -> String {
        match self {
            Self::Success {
                status_code,
                reason,
                ..
            } => format!("HTTP {} - {}", status_code, reason),
            Self::Timeout => "Request timeout".to_string(),
            Self::ConnectionFailure { error } => format!("Connection failed: {}", error),
            Self::OtherError { error } => error.clone(),
        }
    }
}

/// Anything that can perform a single GET request
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL; never fails, transport problems are part of the outcome
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// reqwest-backed [`Fetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler and user agent configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(crawler, user_agent)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (up to 10 hops) so a link that redirects to a
/// working page counts as working.
///
/// # Example
///
/// ```no_run
/// use checklink::config::{CrawlerConfig, UserAgentConfig};
/// use checklink::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.clone())
        .timeout(crawler.request_timeout())
        .connect_timeout(crawler.request_timeout())
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the result
///
/// # Error Mapping
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Any HTTP response | `Success` (status codes are judged by the caller) |
/// | Request or body read timed out | `Timeout` |
/// | Connection refused / DNS / TLS | `ConnectionFailure` |
/// | Anything else (redirect loop, decode error) | `OtherError` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().clone();
    let headers = response.headers().clone();

    match response.bytes().await {
        Ok(body) => FetchOutcome::Success {
            final_url,
            status_code: status.as_u16(),
            reason: reason_phrase(status.as_u16()),
            headers,
            body: body.to_vec(),
        },
        Err(e) => classify_error(e),
    }
}

/// Maps a reqwest error onto a transport outcome
fn classify_error(e: reqwest::Error) -> FetchOutcome {
    if e.is_timeout() {
        FetchOutcome::Timeout
    } else if e.is_connect() {
        FetchOutcome::ConnectionFailure {
            error: e.to_string(),
        }
    } else {
        FetchOutcome::OtherError {
            error: e.to_string(),
        }
    }
}

/// Canonical reason phrase for a status code, or "Unknown"
pub fn reason_phrase(status_code: u16) -> String {
    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}
