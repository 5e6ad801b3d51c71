use crate::classifier::ClassificationVerdict;

/// Phrases that mark a page as suspicious when found anywhere in its text
pub const SCAM_PHRASES: &[&str] = &[
    "get rich quick",
    "guaranteed money",
    "click here now",
    "limited time offer",
    "act now",
    "free money",
    "congratulations you won",
    "urgent action required",
    "suspicious activity",
    "verify account immediately",
    "online casino",
    "casino bonus",
    "free spins",
    "place your bets",
    "bet now",
];

/// Weight of each goal word found in the page
const GOAL_WEIGHT: i64 = 2;

/// Weight of each topic keyword found in the page
const TOPIC_WEIGHT: i64 = 3;

/// Topic-weighted scores below this, with no topic match, mark a page irrelevant
const IRRELEVANT_BELOW: u8 = 3;

/// Deterministic keyword classifier
///
/// # Scoring
///
/// | Configuration | Score |
/// |---------------|-------|
/// | No topic keywords | `clamp(goal_matches * 2, 1, 10)` |
/// | Topic keywords | `clamp(topic_matches * 3 + goal_matches * 2, 1, 10)` |
///
/// `goal_matches` counts the whitespace-separated words of the goal that
/// occur (case-insensitively) anywhere in the page text.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    topic_keywords: Vec<String>,
}

impl HeuristicClassifier {
    pub fn new(topic_keywords: Vec<String>) -> Self {
        Self {
            topic_keywords: topic_keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn classify(&self, page_text: &str, site_goal: &str) -> ClassificationVerdict {
        let content = page_text.to_lowercase();

        let matched_phrases: Vec<&str> = SCAM_PHRASES
            .iter()
            .copied()
            .filter(|phrase| content.contains(phrase))
            .collect();
        let is_suspicious = !matched_phrases.is_empty();

        let goal_matches = site_goal
            .to_lowercase()
            .split_whitespace()
            .filter(|word| content.contains(word))
            .count() as i64;

        let (relevance_score, is_irrelevant) = if self.topic_keywords.is_empty() {
            (ClassificationVerdict::clamp_score(goal_matches * GOAL_WEIGHT), false)
        } else {
            let topic_matches = self
                .topic_keywords
                .iter()
                .filter(|keyword| content.contains(keyword.as_str()))
                .count() as i64;
            let score = ClassificationVerdict::clamp_score(
                topic_matches * TOPIC_WEIGHT + goal_matches * GOAL_WEIGHT,
            );
            (score, score < IRRELEVANT_BELOW && topic_matches == 0)
        };

        let mut reasons = Vec::new();
        if is_suspicious {
            reasons.push(format!(
                "Contains suspicious/scam keywords: {}",
                matched_phrases.join(", ")
            ));
        }
        if is_irrelevant {
            reasons.push("Content not related to site purpose".to_string());
        }

        ClassificationVerdict {
            relevance_score,
            is_suspicious,
            is_irrelevant,
            reasons,
            summary: format!(
                "Relevance: {}/10, Suspicious: {}, Irrelevant: {}",
                relevance_score, is_suspicious, is_irrelevant
            ),
        }
    }
}
