//! Link checking
//!
//! Each discovered link is fetched and, when reachable, classified. A
//! [`LinkResult`] is produced only when something is wrong with the link;
//! `None` means no issue was found.

use crate::classifier::ContentClassifier;
use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::graph::{LinkEdge, LinkGraphCrawler};
use crate::crawler::parser::HtmlView;
use crate::site::LanguageVersion;
use crate::state::CrawlSession;
use crate::CheckLinkError;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Kind of issue found on a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkStatus {
    /// HTTP status 400 or above
    Broken,
    /// Request timed out
    Timeout,
    /// Connection could not be established
    ConnectionError,
    /// Other transport failure
    Error,
    /// Reachable, but suspicious or insufficiently relevant
    Flagged,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broken => "BROKEN",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::Error => "ERROR",
            Self::Flagged => "FLAGGED",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link with a reportable issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResult {
    pub title: String,
    pub url: Url,
    pub status: LinkStatus,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_snippet: Option<String>,
    pub language_code: String,
}

impl LinkResult {
    fn new(title: &str, url: &Url, language_code: &str, status: LinkStatus, reason: String) -> Self {
        Self {
            title: title.to_string(),
            url: url.clone(),
            status,
            reason,
            content_snippet: None,
            language_code: language_code.to_string(),
        }
    }
}

/// Fetches and classifies discovered links
pub struct LinkChecker {
    fetcher: Arc<dyn Fetcher>,
    classifier: Arc<ContentClassifier>,
    crawler: LinkGraphCrawler,
}

impl LinkChecker {
    pub fn new(fetcher: Arc<dyn Fetcher>, classifier: Arc<ContentClassifier>) -> Self {
        Self {
            crawler: LinkGraphCrawler::new(fetcher.clone()),
            fetcher,
            classifier,
        }
    }

    /// Checks one link
    ///
    /// # Outcome Mapping
    ///
    /// | Fetch outcome | Result |
    /// |---------------|--------|
    /// | Timeout | `TIMEOUT` |
    /// | Connection failure | `CONNECTION_ERROR` |
    /// | Other transport error | `ERROR` with its message |
    /// | HTTP >= 400 | `BROKEN` with `HTTP <code> - <reason>` |
    /// | Suspicious or score < 4 | `FLAGGED` |
    /// | Anything else | `None` |
    pub async fn check(
        &self,
        session: &CrawlSession,
        title: &str,
        url: &Url,
        language_code: &str,
    ) -> Option<LinkResult> {
        let body = match self.fetcher.fetch(url).await {
            FetchOutcome::Success {
                status_code,
                reason,
                body,
                ..
            } => {
                if status_code >= 400 {
                    return Some(LinkResult::new(
                        title,
                        url,
                        language_code,
                        LinkStatus::Broken,
                        format!("HTTP {} - {}", status_code, reason),
                    ));
                }
                body
            }
            FetchOutcome::Timeout => {
                return Some(LinkResult::new(
                    title,
                    url,
                    language_code,
                    LinkStatus::Timeout,
                    "Request timeout".to_string(),
                ))
            }
            FetchOutcome::ConnectionFailure { error } => {
                tracing::debug!("Connection to {} failed: {}", url, error);
                return Some(LinkResult::new(
                    title,
                    url,
                    language_code,
                    LinkStatus::ConnectionError,
                    "Connection failed".to_string(),
                ));
            }
            FetchOutcome::OtherError { error } => {
                return Some(LinkResult::new(
                    title,
                    url,
                    language_code,
                    LinkStatus::Error,
                    error,
                ))
            }
        };

        let text = HtmlView::parse(&body).plain_text();
        let verdict = self.classifier.classify(&text, session.goal()).await;

        let mut issues = Vec::new();
        if verdict.is_suspicious {
            issues.push(format!("SUSPICIOUS: {}", verdict.reasons.join(", ")));
        }
        if verdict.is_low_relevance() {
            issues.push(format!("LOW RELEVANCE: score {}/10", verdict.relevance_score));
        }

        if issues.is_empty() {
            return None;
        }

        let mut result = LinkResult::new(
            title,
            url,
            language_code,
            LinkStatus::Flagged,
            issues.join("; "),
        );
        result.content_snippet = Some(verdict.summary);
        Some(result)
    }

    /// Crawls one language variant and checks every discovered link
    ///
    /// The visited set is reset first, so each variant is crawled from
    /// scratch. Checks run up to the throttle's concurrency cap, each
    /// followed by the politeness delay; results keep discovery order.
    pub async fn analyze_language_version(
        &self,
        session: &mut CrawlSession,
        language: &LanguageVersion,
        max_depth: u32,
    ) -> Result<Vec<LinkResult>, CheckLinkError> {
        tracing::info!(
            "Starting analysis of {} ({}) version: {}",
            language.display_name,
            language.code,
            language.entry_url
        );

        session.reset_visited();
        let edges = self
            .crawler
            .crawl(session, &language.entry_url, max_depth)
            .await?;

        tracing::info!(
            "Found {} links to check for {}",
            edges.len(),
            language.display_name
        );

        let session: &CrawlSession = session;
        let total = edges.len();

        let results: Vec<Option<LinkResult>> = stream::iter(edges.iter().enumerate())
            .map(|(i, edge)| self.check_edge(session, edge, language, i + 1, total))
            .buffered(session.throttle().max_in_flight())
            .collect()
            .await;

        Ok(results.into_iter().flatten().collect())
    }

    async fn check_edge(
        &self,
        session: &CrawlSession,
        edge: &LinkEdge,
        language: &LanguageVersion,
        index: usize,
        total: usize,
    ) -> Option<LinkResult> {
        tracing::debug!(
            "Checking link {}/{} for {}: {}",
            index,
            total,
            language.display_name,
            edge.url
        );

        let result = self
            .check(session, &edge.text, &edge.url, &language.code)
            .await;

        if let Some(issue) = &result {
            tracing::warn!(
                "Issue found in {}: {} - {} ({})",
                language.display_name,
                issue.status,
                issue.reason,
                issue.url
            );
        }

        session.throttle().pause().await;
        result
    }
}
