//! JD Parser: turns a raw job posting into a structured `JobDescription`.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{JOB_ANALYSIS_PROMPT_TEMPLATE, JOB_ANALYSIS_SYSTEM};
use crate::llm_client::retry::{with_backoff, RetryPolicy};
use crate::llm_client::{call_json, JsonShape, TextGenerator};
use crate::models::job::JobDescription;

/// Analyzes a job description with the LLM and returns its structured form.
pub async fn analyze_job(
    job_text: &str,
    llm: &dyn TextGenerator,
) -> Result<JobDescription, AppError> {
    if job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let prompt = JOB_ANALYSIS_PROMPT_TEMPLATE.replace("{job_text}", job_text);
    let job: JobDescription = with_backoff(RetryPolicy::default(), "Job analysis", || {
        call_json(llm, &prompt, JOB_ANALYSIS_SYSTEM, JsonShape::Object)
    })
    .await
    .map_err(|e| AppError::Llm(format!("Job analysis failed: {e}")))?;

    info!(
        "Job analyzed: title={:?}, {} required / {} preferred skills",
        job.title,
        job.required_skills.len(),
        job.preferred_skills.len()
    );
    Ok(job)
}
