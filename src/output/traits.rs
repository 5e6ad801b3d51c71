//! Report sink trait and errors
//!
//! A report sink turns a finished [`SiteReport`] into durable artifacts and
//! returns their paths.

use crate::crawler::SiteReport;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Anything that can render a site report
pub trait ReportSink {
    /// Writes the report and returns the paths of every file produced
    ///
    /// # Arguments
    ///
    /// * `report` - The finished analysis
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PathBuf>)` - Files written, per-language reports first
    /// * `Err(OutputError)` - Failed to write a report
    fn write(&self, report: &SiteReport) -> OutputResult<Vec<PathBuf>>;
}
