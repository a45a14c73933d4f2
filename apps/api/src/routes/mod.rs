pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::casestudy::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Stepwise endpoints matching the SPA's original call sequence
        .route(
            "/api/generate-case-study",
            post(handlers::handle_generate_case_study),
        )
        .route(
            "/api/enhance-citations",
            post(handlers::handle_enhance_citations),
        )
        .route(
            "/api/integrate-citations",
            post(handlers::handle_integrate_citations),
        )
        .route(
            "/api/generate-questions",
            post(handlers::handle_generate_questions),
        )
        // Full pipeline + stored session results
        .route("/api/case-studies", post(handlers::handle_create_case_study))
        .route(
            "/api/case-studies/:id",
            get(handlers::handle_get_case_study),
        )
        .route(
            "/api/case-studies/:id/download",
            get(handlers::handle_download_case_study),
        )
        .route(
            "/api/case-studies/:id/questions/download",
            get(handlers::handle_download_questions),
        )
        .with_state(state)
}
