//! Application Configuration
//!
//! Configuration for the leaderboard application layer.

use std::time::Duration;

use platform::rate_limit::Cooldown;

/// Leaderboard application configuration
#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    /// Minimum gap between two accepted submissions of one user
    pub cooldown: Duration,
    /// Size of the leaderboard view (and the cap for `?limit=`)
    pub leaderboard_limit: usize,
    /// Every N-th submission is flagged so clients refresh the insight
    pub insight_milestone: u64,
    /// Storage key of the whole document
    pub document_key: String,
    /// Storage key of the last-active-user pointer
    pub session_key: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(2000),
            leaderboard_limit: 50,
            insight_milestone: 5,
            document_key: "leaderboard_db".to_string(),
            session_key: "last_user_id".to_string(),
        }
    }
}

impl LeaderboardConfig {
    pub fn cooldown(&self) -> Cooldown {
        Cooldown::new(self.cooldown)
    }

    /// Whether `total_submissions` just reached a milestone
    pub fn is_milestone(&self, total_submissions: u64) -> bool {
        self.insight_milestone > 0
            && total_submissions > 0
            && total_submissions % self.insight_milestone == 0
    }

    /// Clamp a requested page size to `1..=leaderboard_limit`
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.leaderboard_limit)
            .clamp(1, self.leaderboard_limit.max(1))
    }
}
