//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use insight::{InsightProvider, InsightService};
use kernel::id::UserId;
use platform::clock::Clock;
use tokio::sync::Mutex;

use crate::application::{
    AddSubmissionUseCase, GetRankUseCase, LeaderboardConfig, ListRankedUseCase, SessionUseCase,
};
use crate::domain::repository::LeaderboardRepository;
use crate::error::{LeaderboardError, LeaderboardResult};
use crate::presentation::dto::{
    InsightResponse, LeaderboardQuery, LeaderboardResponse, LoginRequest, StandingResponse,
    SubmissionResponse,
};

/// Shared state for leaderboard handlers
pub struct LeaderboardAppState<R, C, P>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    pub repo: Arc<R>,
    pub clock: Arc<C>,
    pub config: Arc<LeaderboardConfig>,
    pub insight: InsightService<P>,
    /// Serializes load-modify-save sequences; the store assumes one writer
    pub write_lock: Arc<Mutex<()>>,
}

impl<R, C, P> Clone for LeaderboardAppState<R, C, P>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            insight: self.insight.clone(),
            write_lock: self.write_lock.clone(),
        }
    }
}

fn parse_user_id(raw: &str) -> LeaderboardResult<UserId> {
    raw.parse().map_err(|_| LeaderboardError::MalformedId)
}

/// Run store work on the blocking pool; repositories do synchronous file I/O
async fn blocking<T, F>(work: F) -> LeaderboardResult<T>
where
    F: FnOnce() -> LeaderboardResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| LeaderboardError::Internal(format!("store task failed: {e}")))?
}

/// GET /api/leaderboard
pub async fn leaderboard<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
    Query(query): Query<LeaderboardQuery>,
) -> LeaderboardResult<Json<LeaderboardResponse>>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let limit = state.config.clamp_limit(query.limit);
    let list = ListRankedUseCase::new(state.repo.clone());
    let page = blocking(move || list.top(limit)).await?;
    Ok(Json(page.into()))
}

/// POST /api/session
pub async fn login<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
    Json(req): Json<LoginRequest>,
) -> LeaderboardResult<Json<StandingResponse>>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let session = SessionUseCase::new(state.repo.clone(), state.clock.clone());

    let _guard = state.write_lock.lock().await;
    let standing = blocking(move || session.login(&req.username)).await?;
    Ok(Json(standing.into()))
}

/// GET /api/session
pub async fn restore_session<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
) -> LeaderboardResult<Response>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let session = SessionUseCase::new(state.repo.clone(), state.clock.clone());
    let restored = blocking(move || session.restore()).await?;
    Ok(match restored {
        Some(standing) => Json(StandingResponse::from(standing)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// DELETE /api/session
pub async fn logout<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
) -> LeaderboardResult<StatusCode>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let session = SessionUseCase::new(state.repo.clone(), state.clock.clone());

    let _guard = state.write_lock.lock().await;
    blocking(move || session.logout()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{id}
pub async fn get_user<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
    Path(user_id): Path<String>,
) -> LeaderboardResult<Json<StandingResponse>>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;
    let ranks = GetRankUseCase::new(state.repo.clone());
    let standing = blocking(move || ranks.standing(&user_id)).await?;
    Ok(Json(standing.into()))
}

/// POST /api/users/{id}/submissions
pub async fn add_submission<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
    Path(user_id): Path<String>,
) -> LeaderboardResult<Json<SubmissionResponse>>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;

    let submissions = AddSubmissionUseCase::new(
        state.repo.clone(),
        state.clock.clone(),
        state.config.clone(),
    );

    let _guard = state.write_lock.lock().await;
    let standing = blocking(move || submissions.record(&user_id)).await?;

    Ok(Json(SubmissionResponse {
        insight_milestone: state.config.is_milestone(standing.user.total_submissions),
        user: standing.user.into(),
        rank: standing.rank,
    }))
}

/// GET /api/users/{id}/insight
///
/// Always 200 for a known user; provider failures become the fallback text.
pub async fn get_insight<R, C, P>(
    State(state): State<LeaderboardAppState<R, C, P>>,
    Path(user_id): Path<String>,
) -> LeaderboardResult<Json<InsightResponse>>
where
    R: LeaderboardRepository,
    C: Clock + 'static,
    P: InsightProvider + Sync + 'static,
{
    let user_id = parse_user_id(&user_id)?;
    let ranks = GetRankUseCase::new(state.repo.clone());
    let standing = blocking(move || ranks.standing(&user_id)).await?;

    let text = state
        .insight
        .fetch_insight(
            &standing.user.username,
            standing.rank,
            standing.user.total_submissions,
        )
        .await;

    Ok(Json(InsightResponse { text }))
}
