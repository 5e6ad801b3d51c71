//! Crawl session state shared by the crawler and the link checker
//!
//! A session is created once per run after the homepage has been analyzed.
//! Its goal and base domain are read-only; the visited set is cleared at the
//! start of every language variant.

use crate::crawler::Throttle;
use crate::url::extract_authority;
use crate::UrlError;
use std::collections::HashSet;
use url::Url;

/// Set of URLs fetched during one language variant's crawl pass
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL; returns false if it was already present
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }
}

/// State of one checklink run
#[derive(Debug)]
pub struct CrawlSession {
    base_url: Url,
    base_domain: String,
    goal: String,
    visited: VisitedSet,
    throttle: Throttle,
}

impl CrawlSession {
    /// Creates a session rooted at `base_url`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Session whose base domain is the authority of `base_url`
    /// * `Err(UrlError::MissingDomain)` - `base_url` has no host
    pub fn new(base_url: Url, goal: impl Into<String>, throttle: Throttle) -> Result<Self, UrlError> {
        let base_domain = extract_authority(&base_url).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            base_url,
            base_domain,
            goal: goal.into(),
            visited: VisitedSet::new(),
            throttle,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authority (`host[:port]`) the crawler is allowed to recurse into
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Relevance baseline for every classification in this run
    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Marks a URL visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url)
    }

    /// Forgets every visited URL before the next language variant
    pub fn reset_visited(&mut self) {
        self.visited.clear();
    }
}
