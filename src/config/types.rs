use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for checklink
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of same-domain hops followed from an entry page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause after every page fetch and every link check (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Timeout for a single HTTP request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of link checks in flight at once
    #[serde(rename = "check-concurrency")]
    pub check_concurrency: usize,
}

impl CrawlerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            delay_ms: 1000,
            request_timeout_secs: 10,
            check_concurrency: 1,
        }
    }
}

/// User agent sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: format!("Mozilla/5.0 (compatible; checklink/{})", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Content classifier configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// API key for the external model; when absent only the keyword heuristic runs
    #[serde(rename = "model-key")]
    pub model_key: Option<String>,

    /// Model name sent with chat completion requests
    pub model: String,

    /// OpenAI-compatible chat completions endpoint
    pub endpoint: String,

    /// Page text is cut to this many characters before it is sent to the model
    #[serde(rename = "max-prompt-chars")]
    pub max_prompt_chars: usize,

    /// Topic keywords; when non-empty the topic-weighted score is used
    #[serde(rename = "topic-keywords")]
    pub topic_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_key: None,
            model: "gpt-3.5-turbo".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            max_prompt_chars: 2000,
            topic_keywords: Vec::new(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the reports are written to
    #[serde(rename = "output-dir")]
    pub output_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: "reports".to_string(),
        }
    }
}
