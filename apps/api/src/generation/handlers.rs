//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{tailor_resume, TailorOutcome, TailorRunRequest};
use crate::generation::jd_parser::analyze_job;
use crate::generation::keyword_selector::{select_keywords, DEFAULT_MAX_KEYWORDS};
use crate::generation::resume_parser::{extract_pdf_text, parse_resume_text};
use crate::models::job::JobDescription;
use crate::models::resume::Resume;
use crate::state::AppState;

/// Multipart field carrying the resume PDF.
const PDF_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectKeywordsRequest {
    #[serde(default)]
    pub keywords: Vec<String>,
    pub job: JobDescription,
    pub max_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SelectKeywordsResponse {
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/analyze
///
/// Parses a raw job posting into a structured JobDescription.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobDescription>, AppError> {
    let job = analyze_job(&request.job_text, state.llm.as_ref()).await?;
    Ok(Json(job))
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<Resume>, AppError> {
    let resume = parse_resume_text(&request.resume_text, state.llm.as_ref()).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resumes/parse-pdf
///
/// Accepts a multipart upload with the PDF in the `file` field. Other fields
/// are ignored.
pub async fn handle_parse_resume_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Resume>, AppError> {
    let mut pdf = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(PDF_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            pdf = Some(bytes.to_vec());
            break;
        }
    }

    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{PDF_FIELD}' is required"))
    })?;

    let text = extract_pdf_text(pdf).await?;
    let resume = parse_resume_text(&text, state.llm.as_ref()).await?;
    Ok(Json(resume))
}

/// POST /api/v1/keywords/select
///
/// Ranks caller-supplied keywords against a job. No LLM involved.
pub async fn handle_select_keywords(
    Json(request): Json<SelectKeywordsRequest>,
) -> Json<SelectKeywordsResponse> {
    let max_count = request.max_count.unwrap_or(DEFAULT_MAX_KEYWORDS);
    Json(SelectKeywordsResponse {
        keywords: select_keywords(&request.keywords, &request.job, max_count),
    })
}

/// POST /api/v1/resumes/tailor
///
/// Full pipeline: job analysis (if needed) → keyword selection → LLM rewrite → ATS optimization.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRunRequest>,
) -> Result<Json<TailorOutcome>, AppError> {
    let outcome = tailor_resume(request, state.llm.clone()).await?;
    Ok(Json(outcome))
}
