//! Get Rank Use Case
//!
//! Unknown ids fail with `UserNotFound`; there is no sentinel rank.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::DocumentRepository;
use crate::error::{LeaderboardError, LeaderboardResult};

/// A user together with its current rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStanding {
    pub user: User,
    pub rank: usize,
}

pub struct GetRankUseCase<R>
where
    R: DocumentRepository,
{
    repo: Arc<R>,
}

impl<R> GetRankUseCase<R>
where
    R: DocumentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 1-based position in the ranking
    pub fn execute(&self, user_id: &UserId) -> LeaderboardResult<usize> {
        self.repo
            .load()?
            .rank_of(user_id)
            .ok_or(LeaderboardError::UserNotFound)
    }

    /// The user record and its rank from a single load
    pub fn standing(&self, user_id: &UserId) -> LeaderboardResult<UserStanding> {
        let document = self.repo.load()?;
        let user = document
            .find_user(user_id)
            .cloned()
            .ok_or(LeaderboardError::UserNotFound)?;
        let rank = document
            .rank_of(user_id)
            .ok_or(LeaderboardError::UserNotFound)?;
        Ok(UserStanding { user, rank })
    }
}
