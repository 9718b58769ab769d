//! Insight - motivational shoutouts from a generative-text service
//!
//! - `provider` - the provider trait and the request it answers
//! - `gemini` - Google Gemini `generateContent` client
//! - `service` - timeout + fixed fallback wrapper; never fails
//!
//! Insights are cosmetic: they are not persisted and nothing in the
//! leaderboard waits on them.

pub mod config;
pub mod error;
pub mod gemini;
pub mod provider;
pub mod service;

pub use config::InsightConfig;
pub use error::{InsightError, InsightResult};
pub use gemini::GeminiInsightProvider;
pub use provider::{AnyInsightProvider, InsightProvider, InsightRequest, StaticInsightProvider};
pub use service::InsightService;
