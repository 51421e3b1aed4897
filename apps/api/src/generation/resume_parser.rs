//! Resume Parser: plain text or PDF in, structured `Resume` out.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};
use crate::llm_client::retry::{with_backoff, RetryPolicy};
use crate::llm_client::{call_json, JsonShape, TextGenerator};
use crate::models::resume::Resume;

/// Extracts structured resume data from plain text using the LLM.
pub async fn parse_resume_text(
    resume_text: &str,
    llm: &dyn TextGenerator,
) -> Result<Resume, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let prompt = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let resume: Resume = with_backoff(RetryPolicy::default(), "Resume parsing", || {
        call_json(llm, &prompt, RESUME_PARSE_SYSTEM, JsonShape::Object)
    })
    .await
    .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    info!(
        "Resume parsed: {} experience entries, {} technical skills",
        resume.experience.len(),
        resume.skills.technical.len()
    );
    Ok(resume)
}

/// Pulls the text layer out of a PDF. Runs on the blocking pool since
/// pdf-extract is synchronous and CPU-bound.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "PDF contains no extractable text".to_string(),
        ));
    }

    debug!("Extracted {} chars of text from {size} byte PDF", text.len());
    Ok(text)
}
