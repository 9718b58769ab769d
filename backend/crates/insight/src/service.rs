//! Insight service
//!
//! The only entry point the rest of the workspace uses. Whatever the
//! provider does (error, empty text, hang), callers get a string back.

use std::sync::Arc;
use std::time::Duration;

use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::provider::{InsightProvider, InsightRequest};

pub struct InsightService<P>
where
    P: InsightProvider,
{
    provider: Arc<P>,
    timeout: Duration,
    fallback_text: String,
}

impl<P> Clone for InsightService<P>
where
    P: InsightProvider,
{
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            timeout: self.timeout,
            fallback_text: self.fallback_text.clone(),
        }
    }
}

impl<P> InsightService<P>
where
    P: InsightProvider + Sync,
{
    pub fn new(provider: Arc<P>, config: &InsightConfig) -> Self {
        Self {
            provider,
            timeout: config.timeout,
            fallback_text: config.fallback_text.clone(),
        }
    }

    /// Fetch a shoutout for `username`; falls back to the fixed text on any failure.
    pub async fn fetch_insight(&self, username: &str, rank: usize, total_submissions: u64) -> String {
        let request = InsightRequest::new(username, rank, total_submissions);

        match tokio::time::timeout(self.timeout, self.provider.generate(&request)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(Ok(_)) => {
                tracing::warn!(username, "Insight provider returned empty text, using fallback");
                self.fallback_text.clone()
            }
            Ok(Err(e)) => {
                tracing::warn!(username, error = %e, "Insight provider failed, using fallback");
                self.fallback_text.clone()
            }
            Err(_) => {
                let e = InsightError::Timeout(self.timeout.as_millis());
                tracing::warn!(username, error = %e, "Insight provider timed out, using fallback");
                self.fallback_text.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FALLBACK_TEXT;
    use crate::error::InsightResult;
    use crate::provider::StaticInsightProvider;

    struct FailingProvider;

    impl InsightProvider for FailingProvider {
        async fn generate(&self, _request: &InsightRequest) -> InsightResult<String> {
            Err(InsightError::EmptyResponse)
        }
    }

    struct SlowProvider;

    impl InsightProvider for SlowProvider {
        async fn generate(&self, _request: &InsightRequest) -> InsightResult<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    struct EchoProvider;

    impl InsightProvider for EchoProvider {
        async fn generate(&self, request: &InsightRequest) -> InsightResult<String> {
            Ok(format!("  {} is #{}  ", request.username, request.rank))
        }
    }

    fn config(timeout: Duration) -> InsightConfig {
        InsightConfig {
            timeout,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_success_is_trimmed() {
        let service = InsightService::new(Arc::new(EchoProvider), &config(Duration::from_secs(1)));
        assert_eq!(service.fetch_insight("erin", 2, 9).await, "erin is #2");
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let service =
            InsightService::new(Arc::new(FailingProvider), &config(Duration::from_secs(1)));
        assert_eq!(service.fetch_insight("erin", 2, 9).await, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn test_empty_text_falls_back() {
        let service = InsightService::new(
            Arc::new(StaticInsightProvider::new("   ")),
            &config(Duration::from_secs(1)),
        );
        assert_eq!(service.fetch_insight("erin", 2, 9).await, FALLBACK_TEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let service = InsightService::new(Arc::new(SlowProvider), &config(Duration::from_millis(50)));
        assert_eq!(service.fetch_insight("erin", 2, 9).await, FALLBACK_TEXT);
    }
}
