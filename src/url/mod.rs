//! URL handling module for checklink
//!
//! This module provides target URL validation, authority (host[:port])
//! extraction used for same-domain decisions, and query parameter lookup.

mod domain;
mod query;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_authority, extract_domain, same_authority};
pub use query::{href_query_param, query_param};

/// Parses and validates the URL a check run starts from
///
/// Only absolute `http`/`https` URLs with a host are accepted.
///
/// # Examples
///
/// ```
/// use checklink::url::parse_target_url;
///
/// let url = parse_target_url("https://example.com/?lang=PT").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(parse_target_url("ftp://example.com/").is_err());
/// assert!(parse_target_url("not a url").is_err());
/// ```
pub fn parse_target_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if !is_http_like(&url) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns true for `http` and `https` URLs
pub fn is_http_like(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
