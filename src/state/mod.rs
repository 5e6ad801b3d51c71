//! Per-run crawl state
//!
//! All mutable crawl state lives in an explicit [`CrawlSession`] that is
//! passed into each component call rather than held by the components.

mod session;

pub use session::{CrawlSession, VisitedSet};
