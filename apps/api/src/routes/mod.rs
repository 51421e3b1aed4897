pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::errors::AppError;
use crate::generation::handlers as generation;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS API
        .route("/api/v1/ats/keywords", post(ats::handle_extract_keywords))
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/optimize", post(ats::handle_optimize))
        // Generation API
        .route("/api/v1/jobs/analyze", post(generation::handle_analyze_job))
        .route("/api/v1/resumes/parse", post(generation::handle_parse_resume))
        .route(
            "/api/v1/resumes/parse-pdf",
            post(generation::handle_parse_resume_pdf).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/keywords/select",
            post(generation::handle_select_keywords),
        )
        .route("/api/v1/resumes/tailor", post(generation::handle_tailor))
        .fallback(not_found)
        .with_state(state)
}
