//! Run coordination
//!
//! The coordinator fetches the homepage once, derives the language variants
//! and the site goal from it, then crawls and checks each variant in turn.
//! A variant that fails is recorded on its report and the run continues.

use crate::classifier::ContentClassifier;
use crate::config::Config;
use crate::crawler::checker::{LinkChecker, LinkResult};
use crate::crawler::fetcher::{FetchOutcome, Fetcher, HttpFetcher};
use crate::crawler::parser::HtmlView;
use crate::crawler::scheduler::Throttle;
use crate::site::{detect_languages, extract_goal, LanguageVersion};
use crate::state::CrawlSession;
use crate::CheckLinkError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

/// Outcome of analyzing one language variant
#[derive(Debug, Clone, Serialize)]
pub struct LanguageReport {
    pub language: LanguageVersion,
    /// Issues in discovery order
    pub results: Vec<LinkResult>,
    /// Why the variant could not be analyzed, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Everything a run found, grouped by language variant
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub source_url: Url,
    pub goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    /// Variants in detection order
    pub languages: Vec<LanguageReport>,
}

impl SiteReport {
    /// Results keyed by language code
    ///
    /// Failed variants appear with an empty list.
    pub fn results_by_language(&self) -> BTreeMap<String, Vec<LinkResult>> {
        self.languages
            .iter()
            .map(|report| (report.language.code.clone(), report.results.clone()))
            .collect()
    }

    pub fn total_issues(&self) -> usize {
        self.languages.iter().map(|report| report.results.len()).sum()
    }

    /// Variants whose analysis did not complete
    pub fn failed_languages(&self) -> Vec<&LanguageReport> {
        self.languages
            .iter()
            .filter(|report| report.failure.is_some())
            .collect()
    }
}

/// Homepage facts gathered before any variant is crawled
struct Homepage {
    languages: Vec<LanguageVersion>,
    goal: String,
}

/// Drives detection, crawling and checking for one site
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    checker: LinkChecker,
    config_hash: Option<String>,
}

impl Coordinator {
    /// Creates a coordinator with an HTTP fetcher and the configured classifier
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CheckLinkError::Reqwest)` - An HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, CheckLinkError> {
        let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
        let classifier = ContentClassifier::from_config(&config.classifier)?;

        Ok(Self::with_parts(config, Arc::new(fetcher), Arc::new(classifier)))
    }

    /// Creates a coordinator from explicit collaborators
    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        classifier: Arc<ContentClassifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            checker: LinkChecker::new(fetcher.clone(), classifier),
            fetcher,
            config_hash: None,
        }
    }

    /// Records the configuration fingerprint carried into the report
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Analyzes every language variant of the site at `base_url`
    ///
    /// # Returns
    ///
    /// * `Ok(SiteReport)` - One entry per detected variant, failed ones included
    /// * `Err(CheckLinkError::UrlError)` - `base_url` has no host
    pub async fn run(&self, base_url: &Url) -> Result<SiteReport, CheckLinkError> {
        let start_time = std::time::Instant::now();
        let throttle = Throttle::from_config(&self.config.crawler);

        let homepage = self.inspect_homepage(base_url, &throttle).await;
        tracing::info!("Site goal: {}", truncate_for_log(&homepage.goal, 100));
        tracing::info!(
            "Detected languages: {:?}",
            homepage
                .languages
                .iter()
                .map(|l| l.code.as_str())
                .collect::<Vec<_>>()
        );

        let mut session = CrawlSession::new(base_url.clone(), homepage.goal, throttle)?;
        let max_depth = self.config.crawler.max_depth;
        let mut languages = Vec::with_capacity(homepage.languages.len());

        for language in homepage.languages {
            let report = match self
                .checker
                .analyze_language_version(&mut session, &language, max_depth)
                .await
            {
                Ok(results) => {
                    tracing::info!(
                        "Completed analysis of {}: {} issues found",
                        language.display_name,
                        results.len()
                    );
                    LanguageReport {
                        language,
                        results,
                        failure: None,
                    }
                }
                Err(e) => {
                    tracing::error!("Analysis of {} failed: {}", language.display_name, e);
                    LanguageReport {
                        language,
                        results: Vec::new(),
                        failure: Some(e.to_string()),
                    }
                }
            };
            languages.push(report);
        }

        let report = SiteReport {
            source_url: base_url.clone(),
            goal: session.goal().to_string(),
            config_hash: self.config_hash.clone(),
            languages,
        };

        tracing::info!(
            "Run completed: {} languages, {} issues in {:?}",
            report.languages.len(),
            report.total_issues(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Fetches the homepage and derives variants and goal from it
    ///
    /// An unreachable homepage yields the default variant and an empty goal.
    async fn inspect_homepage(&self, base_url: &Url, throttle: &Throttle) -> Homepage {
        let outcome = self.fetcher.fetch(base_url).await;

        let homepage = match outcome {
            FetchOutcome::Success {
                status_code, body, ..
            } if status_code < 400 => {
                let view = HtmlView::parse(&body);
                Homepage {
                    languages: detect_languages(&view, base_url),
                    goal: extract_goal(&view),
                }
            }
            outcome => {
                tracing::error!(
                    "Error detecting languages on {}: {}",
                    base_url,
                    outcome.describe()
                );
                Homepage {
                    languages: vec![LanguageVersion::default_for(base_url)],
                    goal: String::new(),
                }
            }
        };

        throttle.pause().await;
        homepage
    }
}

fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
