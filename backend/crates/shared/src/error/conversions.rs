//! Error conversions - HTTP rendering of [`AppError`]
//!
//! Crate errors convert into [`AppError`] themselves; this module turns an
//! [`AppError`] into an RFC 7807 response when the `axum` feature is enabled.

use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// `Retry-After` is whole seconds; round up so clients never retry early.
#[cfg_attr(not(feature = "axum"), allow(dead_code))]
pub(crate) fn retry_after_secs(ms: u64) -> u64 {
    ms.div_ceil(1000).max(1)
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::{HeaderValue, StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
            "retryAfterMs": self.retry_after_ms(),
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(ms) = self.retry_after_ms() {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs(ms)),
            );
        }
        response
    }
}
