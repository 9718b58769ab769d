//! Domain Layer
//!
//! Contains entities, the persisted document, value objects, and repository traits.

pub mod document;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use document::{CountMismatch, LeaderboardDocument, RankedUser};
pub use entity::{submission::Submission, user::User};
pub use repository::{DocumentRepository, LeaderboardRepository, SessionRepository};
