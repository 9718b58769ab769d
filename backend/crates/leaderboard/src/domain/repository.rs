//! Repository Traits
//!
//! Interfaces for persistence. Implementation is in the infra layer.
//!
//! These are synchronous: the backing store is a local blob that is read or
//! replaced in one step. Callers must ensure a single active writer; two
//! writers interleaving load/save lose one of the updates.

use kernel::id::UserId;

use crate::domain::document::LeaderboardDocument;
use crate::error::LeaderboardResult;

/// Whole-document persistence
pub trait DocumentRepository: Send + Sync {
    /// Load the document; absent or unreadable content yields an empty one
    fn load(&self) -> LeaderboardResult<LeaderboardDocument>;

    /// Replace the stored document
    fn save(&self, document: &LeaderboardDocument) -> LeaderboardResult<()>;
}

/// "Last active user" pointer used to restore a session
pub trait SessionRepository: Send + Sync {
    fn last_active_user(&self) -> LeaderboardResult<Option<UserId>>;

    fn set_last_active_user(&self, user_id: &UserId) -> LeaderboardResult<()>;

    fn clear_last_active_user(&self) -> LeaderboardResult<()>;
}

/// Everything the HTTP layer needs from one backend
pub trait LeaderboardRepository: DocumentRepository + SessionRepository + 'static {}

impl<T> LeaderboardRepository for T where T: DocumentRepository + SessionRepository + 'static {}
