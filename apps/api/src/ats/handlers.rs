//! Axum route handlers for the ATS API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ats::coverage::score;
use crate::ats::{AtsOptimizer, CoverageReport, KeywordExtractor, OptimizationOutcome, QuotaState};
use crate::errors::AppError;
use crate::models::job::JobDescription;
use crate::models::resume::Resume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job: JobDescription,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
    pub quota: QuotaState,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume: Resume,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub resume: Option<Resume>,
    pub job: JobDescription,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/keywords
///
/// Returns the ATS keyword set for a job. Falls back to local extraction when
/// the model is rate limited, so this never fails on remote trouble.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let mut extractor = KeywordExtractor::new(state.llm.clone());
    let keywords = extractor.extract(&request.job).await;

    Ok(Json(KeywordsResponse {
        keywords,
        quota: extractor.quota(),
    }))
}

/// POST /api/v1/ats/score
///
/// Pure coverage scoring; makes no remote calls.
pub async fn handle_score(Json(request): Json<ScoreRequest>) -> Json<CoverageReport> {
    Json(score(&request.resume, &request.keywords))
}

/// POST /api/v1/ats/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizationOutcome>, AppError> {
    let resume = request
        .resume
        .ok_or_else(|| AppError::Validation("resume is required".to_string()))?;

    let outcome = AtsOptimizer::new(state.llm.clone())
        .optimize(&resume, &request.job)
        .await;

    Ok(Json(outcome))
}
