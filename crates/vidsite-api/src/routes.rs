//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{get_progress, health, list_videos, set_progress, upload};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    // The upload route carries its own large body limit; everything else
    // keeps the default.
    let upload_routes = Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(state.config.max_body_size));

    let api_routes = Router::new()
        .merge(upload_routes)
        .route("/progress/:video_id", get(get_progress))
        .route("/setprogress/:video_id", post(set_progress))
        .route("/videos", get(list_videos));

    Router::new()
        .nest("/api", api_routes)
        // Encoded artifacts are served straight off disk
        .nest_service("/video_data", ServeDir::new(&state.config.video_root))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
