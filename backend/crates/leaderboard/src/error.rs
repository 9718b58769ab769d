//! Leaderboard Error Types
//!
//! This module provides leaderboard-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! `UserNotFound`, `RateLimited` and `InvalidUserName` are expected outcomes
//! the caller shows inline. `Persistence` is fatal for the operation and is
//! propagated as-is, with no retry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

use crate::domain::value_object::user_name::UserNameError;

/// Leaderboard-specific result type alias
pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Referenced user id has no record
    #[error("User not found")]
    UserNotFound,

    /// Submission attempted inside the user's cooldown window
    #[error("Please wait a moment before submitting again.")]
    RateLimited { retry_after_ms: u64 },

    #[error("Invalid user name: {0}")]
    InvalidUserName(#[from] UserNameError),

    /// Path segment is not a user id at all
    #[error("Malformed user id")]
    MalformedId,

    /// Underlying read/write failed
    #[error("Storage error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LeaderboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LeaderboardError::UserNotFound => StatusCode::NOT_FOUND,
            LeaderboardError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LeaderboardError::InvalidUserName(_) | LeaderboardError::MalformedId => {
                StatusCode::BAD_REQUEST
            }
            LeaderboardError::Persistence(_) | LeaderboardError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeaderboardError::UserNotFound => ErrorKind::NotFound,
            LeaderboardError::RateLimited { .. } => ErrorKind::TooManyRequests,
            LeaderboardError::InvalidUserName(_) | LeaderboardError::MalformedId => {
                ErrorKind::BadRequest
            }
            LeaderboardError::Persistence(_) | LeaderboardError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LeaderboardError::RateLimited { retry_after_ms } => {
                tracing::warn!(retry_after_ms, "Submission rate limited");
            }
            err if err.kind().is_server_error() => {
                tracing::error!(error = %err, "Leaderboard server error");
            }
            _ => {
                tracing::debug!(error = %self, "Leaderboard error");
            }
        }
    }
}

impl From<LeaderboardError> for AppError {
    fn from(err: LeaderboardError) -> Self {
        let app_err = AppError::new(err.kind(), err.to_string());
        match err {
            LeaderboardError::RateLimited { retry_after_ms } => {
                app_err.with_retry_after_ms(retry_after_ms)
            }
            LeaderboardError::UserNotFound => app_err.with_action("Log in again"),
            // Storage details stay in the logs
            LeaderboardError::Persistence(source) => {
                AppError::internal("Failed to access leaderboard storage").with_source(source)
            }
            _ => app_err,
        }
    }
}

impl IntoResponse for LeaderboardError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        LeaderboardError::Internal(format!("document encoding failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_kind_agree() {
        let cases = [
            LeaderboardError::UserNotFound,
            LeaderboardError::RateLimited { retry_after_ms: 10 },
            LeaderboardError::InvalidUserName(UserNameError::Empty),
            LeaderboardError::MalformedId,
            LeaderboardError::Internal("x".into()),
            LeaderboardError::Persistence(StorageError::Poisoned),
        ];
        for err in cases {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code(), "{err}");
        }
    }

    #[test]
    fn test_rate_limited_carries_retry_hint() {
        let app: AppError = LeaderboardError::RateLimited { retry_after_ms: 1500 }.into();
        assert_eq!(app.status_code(), 429);
        assert_eq!(app.retry_after_ms(), Some(1500));
        assert_eq!(app.message(), "Please wait a moment before submitting again.");
    }

    #[test]
    fn test_persistence_hides_details() {
        let app: AppError = LeaderboardError::Persistence(StorageError::Poisoned).into();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("poisoned"));
    }
}
