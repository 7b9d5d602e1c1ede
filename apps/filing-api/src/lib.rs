//! Filing API: compile and readiness endpoints over the case database.

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod stamp;
pub mod state;

use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/cases/:case_id/drafts/:draft_id/compile",
            get(handlers::compile_draft),
        )
        .route(
            "/api/cases/:case_id/drafts/:draft_id/readiness",
            get(handlers::draft_readiness),
        )
        .route(
            "/api/cases/:case_id/filing-settings",
            patch(handlers::patch_filing_settings),
        )
        .route(
            "/api/cases/:case_id/issues/:issue_id/ignore",
            post(handlers::ignore_issue).delete(handlers::unignore_issue),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
