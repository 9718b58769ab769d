//! Leaderboard Document
//!
//! The whole persisted state: every user and every submission. It is loaded
//! in full and written back in full; there is no partial persistence.
//!
//! Ranking is a stable sort on `total_submissions` (descending), so users
//! with equal counts keep their insertion order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{submission::Submission, user::User};
use crate::domain::value_object::user_name::UserName;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

/// A user with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedUser {
    pub rank: usize,
    pub user: User,
}

/// A user whose counter disagrees with its submission history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMismatch {
    pub user_id: UserId,
    pub recorded: u64,
    pub actual: u64,
}

impl LeaderboardDocument {
    pub fn find_user(&self, user_id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == user_id)
    }

    pub fn find_user_mut(&mut self, user_id: &UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| &u.id == user_id)
    }

    pub fn find_by_name(&self, user_name: &UserName) -> Option<&User> {
        self.users.iter().find(|u| u.has_name(user_name))
    }

    /// Most recent submission time for a user (max, not last appended)
    pub fn last_submission_at(&self, user_id: &UserId) -> Option<DateTime<Utc>> {
        self.submissions
            .iter()
            .filter(|s| &s.user_id == user_id)
            .map(|s| s.created_at)
            .max()
    }

    /// All users, most submissions first
    pub fn ranked(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.iter().collect();
        // `sort_by` is stable: ties stay in insertion order
        users.sort_by(|a, b| b.total_submissions.cmp(&a.total_submissions));
        users
    }

    /// 1-based rank, `None` if the user does not exist
    pub fn rank_of(&self, user_id: &UserId) -> Option<usize> {
        self.ranked()
            .iter()
            .position(|u| &u.id == user_id)
            .map(|idx| idx + 1)
    }

    /// First `limit` users of the ranking, with ranks
    pub fn top(&self, limit: usize) -> Vec<RankedUser> {
        self.ranked()
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(idx, user)| RankedUser {
                rank: idx + 1,
                user: user.clone(),
            })
            .collect()
    }

    /// Users whose `total_submissions` differs from their submission count.
    ///
    /// Empty for any document produced by this crate under a single writer.
    pub fn verify_counts(&self) -> Vec<CountMismatch> {
        let mut actual: HashMap<UserId, u64> = HashMap::new();
        for submission in &self.submissions {
            *actual.entry(submission.user_id).or_default() += 1;
        }

        self.users
            .iter()
            .filter_map(|user| {
                let count = actual.get(&user.id).copied().unwrap_or(0);
                (count != user.total_submissions).then(|| CountMismatch {
                    user_id: user.id,
                    recorded: user.total_submissions,
                    actual: count,
                })
            })
            .collect()
    }
}
