//! User Entity
//!
//! A leaderboard participant. Users are never deleted; the only mutation is
//! counting an accepted submission.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_name::UserName;

/// Persisted as `{ id, username, total_submissions, created_at }` with
/// `created_at` in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display form, as first entered (trimmed)
    pub username: String,
    /// Always equals the number of submissions referencing `id`
    pub total_submissions: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no submissions
    pub fn new(user_name: &UserName, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            username: user_name.original().to_string(),
            total_submissions: 0,
            created_at: now,
        }
    }

    /// Case-insensitive identity check against a validated name
    pub fn has_name(&self, user_name: &UserName) -> bool {
        UserName::canonicalize(&self.username) == user_name.canonical()
    }

    /// Count one more accepted submission
    pub fn record_submission(&mut self) {
        self.total_submissions += 1;
    }
}
