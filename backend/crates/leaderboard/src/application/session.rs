//! Session Use Case
//!
//! Keeps a pointer to the last logged-in user so a restart can pick the
//! session back up. The pointer is a convenience, not authentication.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::get_or_create_user::GetOrCreateUserUseCase;
use crate::application::get_rank::{GetRankUseCase, UserStanding};
use crate::domain::repository::{DocumentRepository, SessionRepository};
use crate::error::{LeaderboardError, LeaderboardResult};

pub struct SessionUseCase<R, C>
where
    R: DocumentRepository + SessionRepository,
    C: Clock,
{
    repo: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SessionUseCase<R, C>
where
    R: DocumentRepository + SessionRepository,
    C: Clock,
{
    pub fn new(repo: Arc<R>, clock: Arc<C>) -> Self {
        Self { repo, clock }
    }

    /// Get or create the user and remember it as the active one
    pub fn login(&self, username: &str) -> LeaderboardResult<UserStanding> {
        let user = GetOrCreateUserUseCase::new(self.repo.clone(), self.clock.clone())
            .execute(username)?;
        self.repo.set_last_active_user(&user.id)?;

        let standing = GetRankUseCase::new(self.repo.clone()).standing(&user.id)?;
        tracing::info!(user_id = %user.id, rank = standing.rank, "Logged in");
        Ok(standing)
    }

    /// The remembered user, if the pointer is set and still resolves
    pub fn restore(&self) -> LeaderboardResult<Option<UserStanding>> {
        let Some(user_id) = self.repo.last_active_user()? else {
            return Ok(None);
        };

        match GetRankUseCase::new(self.repo.clone()).standing(&user_id) {
            Ok(standing) => Ok(Some(standing)),
            Err(LeaderboardError::UserNotFound) => {
                tracing::warn!(%user_id, "Session pointer references unknown user, ignoring");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn logout(&self) -> LeaderboardResult<()> {
        self.repo.clear_last_active_user()?;
        tracing::info!("Logged out");
        Ok(())
    }
}
