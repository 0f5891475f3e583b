pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats_handlers;
use crate::matching::handlers;
use crate::state::AppState;
use crate::text::handlers as text_handlers;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Core scoring
        .route("/api/v1/normalize", post(text_handlers::handle_normalize))
        .route("/api/v1/ats/report", post(ats_handlers::handle_ats_report))
        // Analyses
        .route("/api/v1/analyses", post(handlers::handle_create_analysis))
        .route(
            "/api/v1/analyses/upload",
            post(handlers::handle_upload_analysis),
        )
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        // Batches
        .route("/api/v1/batches", post(handlers::handle_create_batch))
        .route(
            "/api/v1/batches/:id/ranking",
            get(handlers::handle_batch_ranking),
        )
        .layer(body_limit)
        .with_state(state)
}
