//! Insight Error Types
//!
//! These never reach an HTTP client: [`crate::InsightService`] turns every
//! one of them into the fallback text. They exist for logging.

use thiserror::Error;

pub type InsightResult<T> = Result<T, InsightError>;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Well-formed reply with no text in it (e.g. blocked or truncated)
    #[error("Service returned no text")]
    EmptyResponse,

    #[error("Timed out after {0} ms")]
    Timeout(u128),
}
