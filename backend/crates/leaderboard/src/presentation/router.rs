//! Leaderboard Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use insight::{InsightProvider, InsightService};
use platform::clock::Clock;
use tokio::sync::Mutex;

use crate::application::config::LeaderboardConfig;
use crate::domain::repository::LeaderboardRepository;
use crate::presentation::handlers::{self, LeaderboardAppState};

/// Create the leaderboard router for any repository, clock and insight provider
pub fn leaderboard_router<R, C, P>(
    repo: Arc<R>,
    clock: Arc<C>,
    config: LeaderboardConfig,
    insight: InsightService<P>,
) -> Router
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let state = LeaderboardAppState {
        repo,
        clock,
        config: Arc::new(config),
        insight,
        write_lock: Arc::new(Mutex::new(())),
    };

    Router::new()
        .route("/leaderboard", get(handlers::leaderboard::<R, C, P>))
        .route(
            "/session",
            get(handlers::restore_session::<R, C, P>)
                .post(handlers::login::<R, C, P>)
                .delete(handlers::logout::<R, C, P>),
        )
        .route("/users/{id}", get(handlers::get_user::<R, C, P>))
        .route(
            "/users/{id}/submissions",
            post(handlers::add_submission::<R, C, P>),
        )
        .route("/users/{id}/insight", get(handlers::get_insight::<R, C, P>))
        .with_state(state)
}
