//! Content classification
//!
//! Turns a page's plain text into a [`ClassificationVerdict`] judged against
//! the site goal. An external model is consulted when configured; any model
//! failure falls back to the deterministic keyword heuristic, so
//! [`ContentClassifier::classify`] never fails.

mod heuristic;
mod model;

pub use heuristic::{HeuristicClassifier, SCAM_PHRASES};
pub use model::{build_prompt, parse_model_reply, OpenAiClassifier};

use crate::config::ClassifierConfig;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Lowest and highest relevance scores
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Scores below this are reported as low relevance
pub const LOW_RELEVANCE_THRESHOLD: u8 = 4;

/// Judgment about one page's relevance and suspiciousness
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationVerdict {
    /// Relevance to the site goal, always within 1..=10
    pub relevance_score: u8,
    pub is_suspicious: bool,
    /// Topic-keyword irrelevance flag; false when no topic keywords are configured
    pub is_irrelevant: bool,
    pub reasons: Vec<String>,
    pub summary: String,
}

impl ClassificationVerdict {
    /// Clamps any integer score into 1..=10
    pub fn clamp_score(score: i64) -> u8 {
        score.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
    }

    pub fn is_low_relevance(&self) -> bool {
        self.relevance_score < LOW_RELEVANCE_THRESHOLD
    }
}

/// Reasons the external model path could not produce a verdict
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("No model key configured")]
    MissingKey,

    #[error("Model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Model reply had no content")]
    EmptyResponse,

    #[error("Malformed model reply: {0}")]
    Malformed(String),
}

/// An external classification capability
#[async_trait]
pub trait ModelClassifier: Send + Sync {
    async fn classify(
        &self,
        page_text: &str,
        site_goal: &str,
    ) -> Result<ClassificationVerdict, ClassificationError>;
}

/// Classifier with an optional model path and a heuristic fallback
pub struct ContentClassifier {
    model: Option<Box<dyn ModelClassifier>>,
    heuristic: HeuristicClassifier,
}

impl ContentClassifier {
    /// Heuristic-only classifier
    pub fn heuristic(heuristic: HeuristicClassifier) -> Self {
        Self {
            model: None,
            heuristic,
        }
    }

    /// Classifier that consults `model` first
    pub fn with_model(model: Box<dyn ModelClassifier>, heuristic: HeuristicClassifier) -> Self {
        Self {
            model: Some(model),
            heuristic,
        }
    }

    /// Builds the classifier described by configuration
    ///
    /// A missing model key is not an error: the heuristic path is selected.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, reqwest::Error> {
        let heuristic = HeuristicClassifier::new(config.topic_keywords.clone());

        match config.model_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                tracing::info!("Using model {} for content analysis", config.model);
                let model = OpenAiClassifier::new(config, key)?;
                Ok(Self::with_model(Box::new(model), heuristic))
            }
            None => {
                tracing::info!("No model key configured, using keyword analysis");
                Ok(Self::heuristic(heuristic))
            }
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classifies page text against the site goal; never fails
    pub async fn classify(&self, page_text: &str, site_goal: &str) -> ClassificationVerdict {
        self.classify_with_model(page_text, site_goal)
            .await
            .unwrap_or_else(|e| {
                if !matches!(e, ClassificationError::MissingKey) {
                    tracing::warn!("Model analysis failed, using keyword analysis: {}", e);
                }
                self.heuristic.classify(page_text, site_goal)
            })
    }

    /// The model path alone, without fallback
    pub async fn classify_with_model(
        &self,
        page_text: &str,
        site_goal: &str,
    ) -> Result<ClassificationVerdict, ClassificationError> {
        match &self.model {
            Some(model) => model.classify(page_text, site_goal).await,
            None => Err(ClassificationError::MissingKey),
        }
    }
}
