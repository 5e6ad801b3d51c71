//! Crawler module for link discovery and checking
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] trait
//! - HTML parsing and anchor extraction
//! - Bounded depth-first link discovery
//! - Per-link checking and classification
//! - Request pacing
//! - Overall run coordination

mod checker;
mod coordinator;
mod fetcher;
mod graph;
mod parser;
mod scheduler;

pub use checker::{LinkChecker, LinkResult, LinkStatus};
pub use coordinator::{Coordinator, LanguageReport, SiteReport};
pub use fetcher::{build_http_client, fetch_url, reason_phrase, FetchOutcome, Fetcher, HttpFetcher};
pub use graph::{LinkEdge, LinkGraphCrawler};
pub use parser::{collapse_whitespace, resolve_link, Anchor, HtmlView};
pub use scheduler::Throttle;

