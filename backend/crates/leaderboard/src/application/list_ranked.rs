//! List Ranked Use Case

use std::sync::Arc;

use crate::domain::document::RankedUser;
use crate::domain::entity::user::User;
use crate::domain::repository::DocumentRepository;
use crate::error::LeaderboardResult;

/// Top-N view of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardPage {
    /// Number of users overall, not just on this page
    pub contributors: usize,
    pub entries: Vec<RankedUser>,
}

pub struct ListRankedUseCase<R>
where
    R: DocumentRepository,
{
    repo: Arc<R>,
}

impl<R> ListRankedUseCase<R>
where
    R: DocumentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every user, most submissions first, ties in insertion order
    pub fn execute(&self) -> LeaderboardResult<Vec<User>> {
        let document = self.repo.load()?;
        Ok(document.ranked().into_iter().cloned().collect())
    }

    pub fn top(&self, limit: usize) -> LeaderboardResult<LeaderboardPage> {
        let document = self.repo.load()?;
        Ok(LeaderboardPage {
            contributors: document.users.len(),
            entries: document.top(limit),
        })
    }
}
