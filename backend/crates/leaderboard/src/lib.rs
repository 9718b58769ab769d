//! Leaderboard Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the persisted document, repository traits
//! - `application/` - Use cases (the Store operations)
//! - `infra/` - Repository over key/value blob storage
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Store model
//! - One JSON document holds every user and submission; it is read in full
//!   and rewritten in full by every mutation
//! - `total_submissions` always equals the user's submission count
//! - A user may submit at most once per cooldown window (2 s by default)
//! - Single active writer is a precondition; the HTTP layer serializes its
//!   own writes, separate processes on one data directory are not coordinated

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LeaderboardConfig;
pub use error::{LeaderboardError, LeaderboardResult};
pub use infra::blob::BlobLeaderboardRepository;
pub use presentation::router::leaderboard_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::document::*;
    pub use crate::domain::entity::{submission::Submission, user::User};
    pub use crate::domain::value_object::user_name::*;
    pub use crate::presentation::dto::*;
}
