//! Output module for rendering run results
//!
//! This module handles:
//! - Writing Markdown reports per language variant and combined
//! - Printing the end-of-run console summary

mod markdown;
pub mod stats;
mod traits;

pub use markdown::{format_combined_report, format_language_report, truncate, MarkdownReport};
pub use stats::{format_summary, print_summary};
pub use traits::{OutputError, OutputResult, ReportSink};
