//! Get-or-Create User Use Case
//!
//! Login by username. Matching is case-insensitive; a new user is only
//! created when no existing name matches, so repeated calls are idempotent.

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::entity::user::User;
use crate::domain::repository::DocumentRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::LeaderboardResult;

pub struct GetOrCreateUserUseCase<R, C>
where
    R: DocumentRepository,
    C: Clock,
{
    repo: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> GetOrCreateUserUseCase<R, C>
where
    R: DocumentRepository,
    C: Clock,
{
    pub fn new(repo: Arc<R>, clock: Arc<C>) -> Self {
        Self { repo, clock }
    }

    pub fn execute(&self, username: &str) -> LeaderboardResult<User> {
        let user_name = UserName::new(username)?;

        let mut document = self.repo.load()?;
        if let Some(existing) = document.find_by_name(&user_name) {
            tracing::debug!(user_id = %existing.id, username = %existing.username, "Existing user");
            return Ok(existing.clone());
        }

        let user = User::new(&user_name, self.clock.now());
        document.users.push(user.clone());
        self.repo.save(&document)?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User created"
        );

        Ok(user)
    }
}
