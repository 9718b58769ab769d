//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; handlers answer with
//! `kernel::error::AppError` through the leaderboard crate.

mod config;

use std::sync::Arc;

use axum::{
    Router, http,
    http::{Method, header},
};
use insight::{
    AnyInsightProvider, GeminiInsightProvider, InsightConfig, InsightService,
    StaticInsightProvider,
};
use leaderboard::domain::repository::DocumentRepository;
use leaderboard::{BlobLeaderboardRepository, LeaderboardConfig, leaderboard_router};
use platform::clock::SystemClock;
use platform::storage::{BlobStorage, FileStorage, MemoryStorage};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ApiConfig, StorageMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "api=info,leaderboard=info,insight=info,platform=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let insight = insight_service(&config.insight)?;

    let leaderboard = match &config.storage {
        StorageMode::File(dir) => {
            let storage = FileStorage::open(dir)?;
            tracing::info!(dir = %storage.dir().display(), "Using file storage");
            leaderboard_routes(storage, config.leaderboard.clone(), insight)?
        }
        StorageMode::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            leaderboard_routes(MemoryStorage::new(), config.leaderboard.clone(), insight)?
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api", leaderboard)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Remote provider when a key is configured, otherwise the fixed fallback
fn insight_service(config: &InsightConfig) -> anyhow::Result<InsightService<AnyInsightProvider>> {
    let provider = if config.has_api_key() {
        tracing::info!(model = %config.model, "Insight provider: Gemini");
        AnyInsightProvider::Gemini(GeminiInsightProvider::new(Arc::new(config.clone()))?)
    } else {
        tracing::warn!("No Gemini API key configured, insights use the fallback text");
        AnyInsightProvider::Static(StaticInsightProvider::new(config.fallback_text.clone()))
    };
    Ok(InsightService::new(Arc::new(provider), config))
}

/// Open the document on `storage`, report count drift, and build the router
fn leaderboard_routes<S>(
    storage: S,
    config: LeaderboardConfig,
    insight: InsightService<AnyInsightProvider>,
) -> anyhow::Result<Router>
where
    S: BlobStorage + 'static,
{
    let repo = Arc::new(BlobLeaderboardRepository::new(storage, &config));

    let document = repo.load()?;
    let mismatches = document.verify_counts();
    for mismatch in &mismatches {
        tracing::warn!(
            user_id = %mismatch.user_id,
            recorded = mismatch.recorded,
            actual = mismatch.actual,
            "Submission count does not match history"
        );
    }
    tracing::info!(
        users = document.users.len(),
        submissions = document.submissions.len(),
        mismatches = mismatches.len(),
        "Leaderboard loaded"
    );

    Ok(leaderboard_router(
        repo,
        Arc::new(SystemClock),
        config,
        insight,
    ))
}
