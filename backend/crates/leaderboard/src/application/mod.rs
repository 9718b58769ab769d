//! Application Layer
//!
//! Use cases over the leaderboard document. Each one loads the document,
//! works on it in memory and, if it mutated anything, saves it back before
//! returning.

pub mod add_submission;
pub mod config;
pub mod get_or_create_user;
pub mod get_rank;
pub mod list_ranked;
pub mod session;

// Re-exports
pub use add_submission::AddSubmissionUseCase;
pub use config::LeaderboardConfig;
pub use get_or_create_user::GetOrCreateUserUseCase;
pub use get_rank::{GetRankUseCase, UserStanding};
pub use list_ranked::{LeaderboardPage, ListRankedUseCase};
pub use session::SessionUseCase;
