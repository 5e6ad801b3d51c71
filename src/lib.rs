//! checklink: a multi-language website link checker
//!
//! This crate crawls a website (once per detected language variant), discovers
//! internal and outbound links, checks every link's reachability and classifies
//! fetched content as suspicious or off-topic relative to the site's purpose.

pub mod classifier;
pub mod config;
pub mod crawler;
pub mod output;
pub mod site;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for checklink operations
#[derive(Debug, Error)]
pub enum CheckLinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Entry page {url} is unreachable: {reason}")]
    EntryUnreachable { url: String, reason: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for checklink operations
pub type Result<T> = std::result::Result<T, CheckLinkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classifier::{ClassificationVerdict, ContentClassifier};
pub use config::Config;
pub use crawler::{Coordinator, LinkResult, LinkStatus, SiteReport};
pub use site::LanguageVersion;
pub use state::CrawlSession;
pub use url::{extract_authority, parse_target_url};
