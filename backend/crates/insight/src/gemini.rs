//! Gemini `generateContent` client

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::InsightConfig;
use crate::error::{InsightError, InsightResult};
use crate::provider::{InsightProvider, InsightRequest};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Largest error body kept for logs
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    /// Thought summaries are not part of the answer
    #[serde(default)]
    thought: bool,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all non-thought parts joined
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Calls the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiInsightProvider {
    client: reqwest::Client,
    config: Arc<InsightConfig>,
}

impl GeminiInsightProvider {
    pub fn new(config: Arc<InsightConfig>) -> InsightResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn build_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                thinking_config: ThinkingConfig {
                    thinking_budget: self.config.thinking_budget,
                },
            },
        }
    }
}

impl InsightProvider for GeminiInsightProvider {
    async fn generate(&self, request: &InsightRequest) -> InsightResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(InsightError::MissingApiKey)?;

        let prompt = request.prompt();
        let response = self
            .client
            .post(self.config.generate_url())
            .header(API_KEY_HEADER, api_key)
            .json(&self.build_body(&prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text().ok_or(InsightError::EmptyResponse)?;

        tracing::debug!(
            username = %request.username,
            rank = request.rank,
            chars = text.chars().count(),
            "Insight generated"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1beta")
    }

    fn provider(endpoint: String, api_key: Option<&str>) -> GeminiInsightProvider {
        let config = InsightConfig {
            endpoint,
            api_key: api_key.map(str::to_string),
            ..Default::default()
        };
        GeminiInsightProvider::new(Arc::new(config)).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let p = provider("http://localhost".into(), Some("k"));
        let body = serde_json::to_value(p.build_body("hello")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 100);
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 50);
    }

    #[test]
    fn test_response_text_skips_thoughts() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "planning...", "thought": true },
                    { "text": " You're #2, " },
                    { "text": "keep climbing! " }
                ]}
            }]
        }))
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("You're #2, keep climbing!"));
    }

    #[test]
    fn test_response_without_candidates() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": {} })).unwrap();
        assert_eq!(parsed.text(), None);
    }

    #[tokio::test]
    async fn test_generate_against_local_server() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers.get("x-goog-api-key").unwrap(), "secret");
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
                assert!(prompt.contains("ranked #4"));
                Json(json!({
                    "candidates": [{ "content": { "parts": [{ "text": "Rank 4 and rising!" }] } }]
                }))
            }),
        );
        let endpoint = serve(router).await;

        let text = provider(endpoint, Some("secret"))
            .generate(&InsightRequest::new("dana", 4, 12))
            .await
            .unwrap();
        assert_eq!(text, "Rank 4 and rising!");
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exhausted") }),
        );
        let endpoint = serve(router).await;

        let err = provider(endpoint, Some("secret"))
            .generate(&InsightRequest::new("dana", 4, 12))
            .await
            .unwrap_err();
        match err {
            InsightError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exhausted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_without_key() {
        let err = provider("http://127.0.0.1:9".into(), None)
            .generate(&InsightRequest::new("dana", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::MissingApiKey));
    }
}
