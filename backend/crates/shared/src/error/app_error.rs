//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified application error
///
/// Crate-specific error enums convert into this type at the HTTP boundary.
///
/// ## Fields
/// * `kind` - classification, maps to the HTTP status
/// * `message` - user-facing message
/// * `action` - optional hint about what the user can do next
/// * `retry_after_ms` - optional wait hint for `TooManyRequests`
/// * `source` - optional underlying error, for logs only
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "User not found");
/// assert_eq!(err.status_code(), 404);
///
/// let err = AppError::new(ErrorKind::TooManyRequests, "Please wait a moment before submitting again.")
///     .with_retry_after_ms(1500);
/// assert_eq!(err.retry_after_ms(), Some(1500));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    retry_after_ms: Option<u64>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            retry_after_ms: None,
            source: None,
        }
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach a user-facing hint
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach a retry hint in milliseconds (rendered as `Retry-After`)
    #[inline]
    pub fn with_retry_after_ms(mut self, retry_after_ms: u64) -> Self {
        self.retry_after_ms = Some(retry_after_ms);
        self
    }

    /// Attach the underlying error
    ///
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn read_data() -> AppResult<String> {
    ///     std::fs::read_to_string("/definitely/missing/leaderboard_db")
    ///         .map_err(|e| AppError::internal("Failed to read leaderboard").with_source(e))
    /// }
    /// assert!(read_data().is_err());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn retry_after_ms(&self) -> Option<u64> {
        self.retry_after_ms
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(retry) = &self.retry_after_ms {
            builder.field("retry_after_ms", retry);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "User not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "User not found");
        assert!(err.action().is_none());
        assert!(err.retry_after_ms().is_none());
    }

    #[test]
    fn test_internal_constructor() {
        let err = AppError::internal("test");
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_builders() {
        let err = AppError::new(ErrorKind::TooManyRequests, "Slow down")
            .with_action("Wait before submitting again")
            .with_retry_after_ms(800);
        assert_eq!(err.action(), Some("Wait before submitting again"));
        assert_eq!(err.retry_after_ms(), Some(800));
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = AppError::internal("Failed to write").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::NotFound, "User not found");
        assert_eq!(err.to_string(), "[Not Found] User not found");

        let err = AppError::new(ErrorKind::BadRequest, "Invalid username").with_action("Pick another");
        assert!(err.to_string().contains("Action:"));
    }
}
