//! Configuration module for checklink
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional; missing values fall back to defaults,
//! and command-line flags are layered on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use checklink::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("checklink.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClassifierConfig, Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
