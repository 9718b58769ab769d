//! Insight provider trait

use crate::error::InsightResult;
use crate::gemini::GeminiInsightProvider;

/// What an insight is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRequest {
    pub username: String,
    /// 1-based leaderboard position
    pub rank: usize,
    pub total_submissions: u64,
}

impl InsightRequest {
    pub fn new(username: impl Into<String>, rank: usize, total_submissions: u64) -> Self {
        Self {
            username: username.into(),
            rank,
            total_submissions,
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "User {} is currently ranked #{} with {} submissions on our community leaderboard. \
             Give them a short (1-2 sentence) motivational, high-energy shoutout. \
             Mention their rank or submission count.",
            self.username, self.rank, self.total_submissions
        )
    }
}

/// Produces insight text. Implementations may fail freely.
#[trait_variant::make(InsightProvider: Send)]
pub trait LocalInsightProvider {
    async fn generate(&self, request: &InsightRequest) -> InsightResult<String>;
}

/// Always answers with the same text. Used when no API key is configured.
#[derive(Debug, Clone)]
pub struct StaticInsightProvider {
    text: String,
}

impl StaticInsightProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl InsightProvider for StaticInsightProvider {
    async fn generate(&self, _request: &InsightRequest) -> InsightResult<String> {
        Ok(self.text.clone())
    }
}

/// Provider chosen at startup
#[derive(Debug, Clone)]
pub enum AnyInsightProvider {
    Gemini(GeminiInsightProvider),
    Static(StaticInsightProvider),
}

impl InsightProvider for AnyInsightProvider {
    async fn generate(&self, request: &InsightRequest) -> InsightResult<String> {
        match self {
            AnyInsightProvider::Gemini(p) => InsightProvider::generate(p, request).await,
            AnyInsightProvider::Static(p) => InsightProvider::generate(p, request).await,
        }
    }
}
