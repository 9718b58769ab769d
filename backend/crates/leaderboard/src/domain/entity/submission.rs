//! Submission Entity
//!
//! One accepted "post". Immutable once created.

use chrono::{DateTime, Utc};
use kernel::id::{SubmissionId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    /// Back-reference, not ownership
    pub user_id: UserId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: SubmissionId::new(),
            user_id,
            created_at: now,
        }
    }
}
