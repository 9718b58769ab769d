//! Add Submission Use Case
//!
//! Records one post for a user, subject to the per-user cooldown. The new
//! submission and the incremented counter are saved in the same document
//! write; a rejected attempt writes nothing.

use std::sync::Arc;

use kernel::id::UserId;
use platform::clock::Clock;
use platform::rate_limit::CooldownDecision;

use crate::application::config::LeaderboardConfig;
use crate::application::get_rank::UserStanding;
use crate::domain::entity::{submission::Submission, user::User};
use crate::domain::repository::DocumentRepository;
use crate::error::{LeaderboardError, LeaderboardResult};

pub struct AddSubmissionUseCase<R, C>
where
    R: DocumentRepository,
    C: Clock,
{
    repo: Arc<R>,
    clock: Arc<C>,
    config: Arc<LeaderboardConfig>,
}

impl<R, C> AddSubmissionUseCase<R, C>
where
    R: DocumentRepository,
    C: Clock,
{
    pub fn new(repo: Arc<R>, clock: Arc<C>, config: Arc<LeaderboardConfig>) -> Self {
        Self {
            repo,
            clock,
            config,
        }
    }

    /// Returns the updated user
    pub fn execute(&self, user_id: &UserId) -> LeaderboardResult<User> {
        self.record(user_id).map(|standing| standing.user)
    }

    /// Like `execute`, with the rank taken from the document that was saved
    pub fn record(&self, user_id: &UserId) -> LeaderboardResult<UserStanding> {
        let mut document = self.repo.load()?;

        if document.find_user(user_id).is_none() {
            return Err(LeaderboardError::UserNotFound);
        }

        let now = self.clock.now();
        let last = document.last_submission_at(user_id);
        if let CooldownDecision::CoolingDown { retry_after } = self.config.cooldown().check(last, now)
        {
            return Err(LeaderboardError::RateLimited {
                retry_after_ms: retry_after.as_millis() as u64,
            });
        }

        document.submissions.push(Submission::new(*user_id, now));
        let user = document
            .find_user_mut(user_id)
            .ok_or(LeaderboardError::UserNotFound)?;
        user.record_submission();
        let user = user.clone();
        let rank = document
            .rank_of(user_id)
            .ok_or(LeaderboardError::UserNotFound)?;

        self.repo.save(&document)?;

        tracing::info!(
            user_id = %user.id,
            total_submissions = user.total_submissions,
            rank,
            "Submission recorded"
        );

        Ok(UserStanding { user, rank })
    }
}
