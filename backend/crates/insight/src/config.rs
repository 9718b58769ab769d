//! Insight configuration

use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const FALLBACK_TEXT: &str = "Keep pushing! Every submission counts toward the crown! 👑";

#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// API key; `None` disables remote calls entirely
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL, without the `/models/...` suffix
    pub endpoint: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Must be set alongside `max_output_tokens`, otherwise thinking can
    /// consume the whole budget and the reply comes back empty
    pub thinking_budget: u32,
    /// Upper bound on one fetch, including connection setup
    pub timeout: Duration,
    pub fallback_text: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: 0.8,
            max_output_tokens: 100,
            thinking_budget: 50,
            timeout: Duration::from_secs(8),
            fallback_text: FALLBACK_TEXT.to_string(),
        }
    }
}

impl InsightConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}
