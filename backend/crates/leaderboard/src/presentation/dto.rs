//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::get_rank::UserStanding;
use crate::application::list_ranked::LeaderboardPage;
use crate::domain::entity::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub total_submissions: u64,
    pub created_at_ms: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_uuid(),
            username: user.username,
            total_submissions: user.total_submissions,
            created_at_ms: user.created_at.timestamp_millis(),
        }
    }
}

/// Response for the session and user endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingResponse {
    pub user: UserResponse,
    pub rank: usize,
}

impl From<UserStanding> for StandingResponse {
    fn from(standing: UserStanding) -> Self {
        Self {
            user: standing.user.into(),
            rank: standing.rank,
        }
    }
}

/// Request for POST /api/session
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Response for POST /api/users/{id}/submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub user: UserResponse,
    pub rank: usize,
    /// Client should refresh the insight
    pub insight_milestone: bool,
}

/// Query for GET /api/leaderboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryResponse {
    pub rank: usize,
    #[serde(flatten)]
    pub user: UserResponse,
}

/// Response for GET /api/leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub contributors: usize,
    pub entries: Vec<LeaderboardEntryResponse>,
}

impl From<LeaderboardPage> for LeaderboardResponse {
    fn from(page: LeaderboardPage) -> Self {
        Self {
            contributors: page.contributors,
            entries: page
                .entries
                .into_iter()
                .map(|ranked| LeaderboardEntryResponse {
                    rank: ranked.rank,
                    user: ranked.user.into(),
                })
                .collect(),
        }
    }
}

/// Response for GET /api/users/{id}/insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResponse {
    pub text: String,
}
