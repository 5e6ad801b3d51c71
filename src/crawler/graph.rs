//! Link graph discovery
//!
//! The crawler walks a language variant depth-first from its entry URL and
//! records every HTTP(S) anchor it sees. It only descends into links on the
//! session's base domain and never fetches a URL twice in one pass.
//!
//! Discovery order matches a recursive pre-order walk: a page's anchors are
//! emitted in document order, and each same-domain anchor's subtree is
//! emitted right after the anchor itself. An explicit stack of page frames
//! replaces the recursion.

use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::parser::{Anchor, HtmlView};
use crate::state::CrawlSession;
use crate::url::same_authority;
use crate::CheckLinkError;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// A discovered anchor: its label and resolved absolute URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEdge {
    pub text: String,
    pub url: Url,
}

/// A fetched page whose anchors are still being processed
struct Frame {
    page_url: Url,
    anchors: std::vec::IntoIter<Anchor>,
    depth: u32,
}

/// What happened when the crawler tried to open a page
enum PageVisit {
    Opened(Frame),
    Skipped,
    Failed(String),
}

/// Bounded depth-first link discovery
pub struct LinkGraphCrawler {
    fetcher: Arc<dyn Fetcher>,
}

impl LinkGraphCrawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Discovers every anchor reachable from `entry_url` within `max_depth` hops
    ///
    /// # Rules
    ///
    /// - Pages deeper than `max_depth` or already visited are never fetched
    /// - Every HTTP(S) anchor is recorded, whatever its domain
    /// - Only anchors on the session's base domain are descended into, and
    ///   only while the current depth is below `max_depth`
    /// - Failures below the entry page are logged and yield no edges
    /// - The throttle pauses once after each fetched page
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LinkEdge>)` - Edges in discovery order
    /// * `Err(CheckLinkError::EntryUnreachable)` - The entry page itself could not be fetched
    pub async fn crawl(
        &self,
        session: &mut CrawlSession,
        entry_url: &Url,
        max_depth: u32,
    ) -> Result<Vec<LinkEdge>, CheckLinkError> {
        let mut edges = Vec::new();

        let entry = match self.open_page(session, entry_url, 0, max_depth).await {
            PageVisit::Opened(frame) => frame,
            PageVisit::Skipped => return Ok(edges),
            PageVisit::Failed(reason) => {
                return Err(CheckLinkError::EntryUnreachable {
                    url: entry_url.to_string(),
                    reason,
                })
            }
        };

        let mut stack = vec![entry];
        let mut pages = 1usize;

        while let Some(frame) = stack.last_mut() {
            let Some(anchor) = frame.anchors.next() else {
                stack.pop();
                session.throttle().pause().await;
                continue;
            };

            let Some(url) = anchor.resolve(&frame.page_url) else {
                continue;
            };
            let depth = frame.depth;

            edges.push(LinkEdge {
                text: anchor.label(),
                url: url.clone(),
            });

            if depth < max_depth && same_authority(&url, session.base_domain()) {
                if let PageVisit::Opened(child) =
                    self.open_page(session, &url, depth + 1, max_depth).await
                {
                    pages += 1;
                    stack.push(child);
                }
            }
        }

        tracing::debug!(
            "Crawl from {} fetched {} pages and found {} links",
            entry_url,
            pages,
            edges.len()
        );

        Ok(edges)
    }

    /// Fetches a page and prepares its anchors, honoring depth and visited rules
    async fn open_page(
        &self,
        session: &mut CrawlSession,
        url: &Url,
        depth: u32,
        max_depth: u32,
    ) -> PageVisit {
        if depth > max_depth || !session.mark_visited(url) {
            return PageVisit::Skipped;
        }

        tracing::debug!(url = %url, depth, "Extracting links");

        match self.fetcher.fetch(url).await {
            FetchOutcome::Success {
                status_code, body, ..
            } if status_code < 400 => {
                let anchors = HtmlView::parse(&body).anchors();
                PageVisit::Opened(Frame {
                    page_url: url.clone(),
                    anchors: anchors.into_iter(),
                    depth,
                })
            }
            outcome => {
                let reason = outcome.describe();
                tracing::error!("Error extracting links from {}: {}", url, reason);
                session.throttle().pause().await;
                PageVisit::Failed(reason)
            }
        }
    }
}
