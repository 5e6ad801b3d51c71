//! OpenAI-compatible chat completion classifier

use crate::classifier::{ClassificationError, ClassificationVerdict, ModelClassifier};
use crate::config::ClassifierConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// The JSON object the model is asked to return
#[derive(Debug, Deserialize)]
struct ModelVerdict {
    relevance_score: f64,
    is_suspicious: bool,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    summary: String,
}

/// Classifier backed by a chat completions endpoint
pub struct OpenAiClassifier {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_prompt_chars: usize,
}

impl OpenAiClassifier {
    pub fn new(config: &ClassifierConfig, api_key: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.to_string(),
            max_prompt_chars: config.max_prompt_chars,
        })
    }
}

#[async_trait]
impl ModelClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        page_text: &str,
        site_goal: &str,
    ) -> Result<ClassificationVerdict, ClassificationError> {
        let prompt = build_prompt(page_text, site_goal, self.max_prompt_chars);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: TEMPERATURE,
        };

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Requesting model classification"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassificationError::Status(status.as_u16()));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassificationError::Malformed(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ClassificationError::EmptyResponse)?;

        parse_model_reply(&content)
    }
}

/// Builds the evaluation prompt; page text is cut to `max_chars` characters
pub fn build_prompt(page_text: &str, site_goal: &str, max_chars: usize) -> String {
    let content: String = page_text.chars().take(max_chars).collect();

    format!(
        "You are an intelligent content evaluator. Analyze the following webpage content.\n\n\
         Main Website Goal: {goal}\n\n\
         Content: {content}\n\n\
         Evaluate based on:\n\
         1. Relevance to main website goal (scale 1-10)\n\
         2. Scam/suspicious indicators (yes/no with reasons)\n\n\
         Respond with strict JSON only, no prose:\n\
         {{\"relevance_score\": <1-10>, \"is_suspicious\": <true/false>, \
         \"reasons\": [\"reason1\", \"reason2\"], \"summary\": \"brief summary\"}}",
        goal = site_goal,
        content = content,
    )
}

/// Parses the model's JSON reply into a verdict
///
/// Markdown code fences around the JSON are tolerated; the score is rounded
/// and clamped to 1..=10.
pub fn parse_model_reply(content: &str) -> Result<ClassificationVerdict, ClassificationError> {
    let json = strip_code_fence(content);
    let verdict: ModelVerdict =
        serde_json::from_str(json).map_err(|e| ClassificationError::Malformed(e.to_string()))?;

    if !verdict.relevance_score.is_finite() {
        return Err(ClassificationError::Malformed(
            "relevance_score is not a number".to_string(),
        ));
    }

    let relevance_score = ClassificationVerdict::clamp_score(verdict.relevance_score.round() as i64);
    let summary = if verdict.summary.trim().is_empty() {
        format!(
            "Relevance: {}/10, Suspicious: {}",
            relevance_score, verdict.is_suspicious
        )
    } else {
        verdict.summary
    };

    Ok(ClassificationVerdict {
        relevance_score,
        is_suspicious: verdict.is_suspicious,
        is_irrelevant: false,
        reasons: verdict.reasons,
        summary,
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
