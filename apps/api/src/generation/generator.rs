//! Resume Generation: orchestrates the full tailoring pipeline.
//!
//! Flow: resolve job (given, or analyze_job) → select_keywords →
//!       LLM rewrite → ATS optimization (unless skipped) → return outcome.
//!
//! Every step is awaited in order; nothing here fans out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::ats::{AtsOptimizer, OptimizationOutcome};
use crate::errors::AppError;
use crate::generation::jd_parser::analyze_job;
use crate::generation::keyword_selector::{select_keywords, DEFAULT_MAX_KEYWORDS};
use crate::generation::prompts::{GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM};
use crate::llm_client::json::parse_embedded_lenient;
use crate::llm_client::prompts::{fill_template, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::retry::{with_backoff, RetryPolicy};
use crate::llm_client::{JsonShape, TextGenerator};
use crate::models::job::JobDescription;
use crate::models::resume::Resume;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Input to a single LLM rewrite.
#[derive(Debug, Clone, Deserialize)]
pub struct TailorRequest {
    pub resume: Resume,
    #[serde(default)]
    pub job: Option<JobDescription>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Request body for the full tailoring pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct TailorRunRequest {
    pub resume: Option<Resume>,
    /// Structured job. Takes precedence over `job_text`.
    #[serde(default)]
    pub job: Option<JobDescription>,
    /// Raw posting, analyzed when `job` is absent.
    #[serde(default)]
    pub job_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub max_keywords: Option<usize>,
    #[serde(default)]
    pub skip_ats: bool,
}

/// Result of one tailoring run.
#[derive(Debug, Clone, Serialize)]
pub struct TailorOutcome {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub job: JobDescription,
    pub selected_keywords: Vec<String>,
    /// The LLM rewrite, before ATS optimization.
    pub initial_resume: Resume,
    pub resume: Resume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats: Option<OptimizationOutcome>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tailoring pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full tailoring pipeline.
///
/// Steps:
/// 1. Resolve the job: structured job, or analyze_job() on the raw text
/// 2. select_keywords() when the caller supplied any
/// 3. generate_tailored_resume() → initial resume
/// 4. AtsOptimizer::optimize() unless `skip_ats`
pub async fn tailor_resume(
    request: TailorRunRequest,
    llm: Arc<dyn TextGenerator>,
) -> Result<TailorOutcome, AppError> {
    let resume = request
        .resume
        .ok_or_else(|| AppError::Validation("resume is required".to_string()))?;

    // Step 1: Resolve job
    let job = match (request.job, request.job_text) {
        (Some(job), _) => job,
        (None, Some(text)) => analyze_job(&text, llm.as_ref()).await?,
        (None, None) => {
            return Err(AppError::Validation(
                "either job or job_text is required".to_string(),
            ))
        }
    };

    let run_id = Uuid::new_v4();
    info!("Tailoring run {run_id} for {:?}", job.title);

    // Step 2: Keyword selection
    let max_keywords = request.max_keywords.unwrap_or(DEFAULT_MAX_KEYWORDS);
    let selected_keywords = select_keywords(&request.keywords, &job, max_keywords);

    // Step 3: LLM rewrite
    let generation = TailorRequest {
        resume,
        job: Some(job.clone()),
        keywords: (!selected_keywords.is_empty()).then(|| selected_keywords.clone()),
    };
    let initial_resume = generate_tailored_resume(&generation, llm.as_ref()).await?;

    // Step 4: ATS optimization
    let ats = if request.skip_ats {
        info!("Run {run_id}: ATS optimization skipped by request");
        None
    } else {
        Some(AtsOptimizer::new(llm).optimize(&initial_resume, &job).await)
    };

    let resume = ats
        .as_ref()
        .map(|outcome| outcome.resume.clone())
        .unwrap_or_else(|| initial_resume.clone());

    info!("Tailoring run {run_id} complete");

    Ok(TailorOutcome {
        run_id,
        generated_at: Utc::now(),
        job,
        selected_keywords,
        initial_resume,
        resume,
        ats,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// LLM rewrite
// ────────────────────────────────────────────────────────────────────────────

/// Asks the LLM for a rewritten resume targeting the request's job.
/// The answer is parsed with the lenient JSON ladder.
pub async fn generate_tailored_resume(
    request: &TailorRequest,
    llm: &dyn TextGenerator,
) -> Result<Resume, AppError> {
    let prompt = build_generation_prompt(request)?;
    let prompt = &prompt;

    with_backoff(RetryPolicy::default(), "Resume generation", || async move {
        let text = llm.complete(prompt, GENERATION_SYSTEM).await?;
        parse_embedded_lenient::<Resume>(&text, JsonShape::Object)
    })
    .await
    .map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))
}

/// Fills the generation template with the serialized resume, job and keywords.
fn build_generation_prompt(request: &TailorRequest) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(&request.resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;

    let job_json = match &request.job {
        Some(job) => serde_json::to_string_pretty(job)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize job: {e}")))?,
        None => "{}".to_string(),
    };

    let keywords = match &request.keywords {
        Some(keywords) if !keywords.is_empty() => keywords.join(", "),
        _ => "None specified".to_string(),
    };

    Ok(fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("resume_json", resume_json.as_str()),
            ("job_json", job_json.as_str()),
            ("keywords", keywords.as_str()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{ScriptedGenerator, ScriptedReply};
    use crate::models::fixtures::{python_job, sample_resume, strings};

    /// The sample resume rewritten toward the Python job, with a trailing comma.
    const REWRITE: &str = r#"Sure! Here is the tailored resume:
    {
        "contact": {"name": "Sam Rivera", "email": "sam@example.com"},
        "summary": "Backend engineer moving into Python and AWS work.",
        "skills": {"technical": ["Java", "Python", "AWS",]},
        "experience": [{
            "title": "Software Engineer",
            "company": "Initech",
            "duration": "2019 - 2024",
            "responsibilities": ["Maintained billing services"]
        }],
        "education": []
    }"#;

    fn run_request() -> TailorRunRequest {
        TailorRunRequest {
            resume: Some(sample_resume()),
            job: Some(python_job()),
            job_text: None,
            keywords: Vec::new(),
            max_keywords: None,
            skip_ats: false,
        }
    }

    #[test]
    fn test_prompt_without_job_or_keywords() {
        let prompt = build_generation_prompt(&TailorRequest {
            resume: sample_resume(),
            job: None,
            keywords: None,
        })
        .unwrap();

        assert!(prompt.contains("Job Description:\n{}"));
        assert!(prompt.contains("None specified"));
        assert!(prompt.contains("Sam Rivera"));
        assert!(prompt.contains("Do NOT invent employers"));
    }

    #[test]
    fn test_prompt_lists_keywords() {
        let prompt = build_generation_prompt(&TailorRequest {
            resume: sample_resume(),
            job: Some(python_job()),
            keywords: Some(strings(&["Python", "Lambda"])),
        })
        .unwrap();

        assert!(prompt.contains("Python, Lambda"));
        assert!(prompt.contains("Python Developer"));
    }

    #[test]
    fn test_prompt_keeps_placeholder_text_from_resume() {
        let mut resume = sample_resume();
        resume.summary = "Built a {keywords} and {job_json} templating engine.".to_string();

        let prompt = build_generation_prompt(&TailorRequest {
            resume,
            job: Some(python_job()),
            keywords: Some(strings(&["Python"])),
        })
        .unwrap();

        assert!(prompt.contains("Built a {keywords} and {job_json} templating engine."));
        assert!(prompt.contains("(prioritize these):\nPython"));
    }

    #[tokio::test]
    async fn test_generation_repairs_trailing_commas() {
        let llm = ScriptedGenerator::new(vec![ScriptedReply::text(REWRITE)]);
        let request = TailorRequest {
            resume: sample_resume(),
            job: Some(python_job()),
            keywords: None,
        };

        let resume = generate_tailored_resume(&request, &llm).await.unwrap();

        assert_eq!(resume.skills.technical, strings(&["Java", "Python", "AWS"]));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_gives_up_on_unparseable_answers() {
        let llm = ScriptedGenerator::new(vec![
            ScriptedReply::text("I cannot help with that."),
            ScriptedReply::text("Still no JSON."),
            ScriptedReply::text("Nope."),
        ]);
        let request = TailorRequest {
            resume: sample_resume(),
            job: None,
            keywords: None,
        };

        let result = generate_tailored_resume(&request, &llm).await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn test_pipeline_runs_generation_then_ats() {
        let llm = Arc::new(ScriptedGenerator::new(vec![
            ScriptedReply::text(REWRITE),
            ScriptedReply::text(r#"["Python", "AWS"]"#),
        ]));

        let outcome = tailor_resume(run_request(), llm.clone()).await.unwrap();

        // The rewrite covers Python and AWS but not "Developer". The remote
        // patch finds the script empty, so the local patch fills the gap.
        assert_eq!(outcome.job, python_job());
        assert!(outcome.selected_keywords.is_empty());
        assert_eq!(outcome.initial_resume.skills.technical, strings(&["Java", "Python", "AWS"]));
        let ats = outcome.ats.as_ref().unwrap();
        assert_eq!(ats.keywords, strings(&["Python", "AWS", "Developer"]));
        assert!(!ats.skipped);
        assert_eq!(ats.after.score, 100.0);
        assert_eq!(outcome.resume, ats.resume);
        assert!(outcome.resume.summary.contains("Developer"));
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn test_pipeline_can_skip_ats() {
        let llm = Arc::new(ScriptedGenerator::new(vec![ScriptedReply::text(REWRITE)]));
        let mut request = run_request();
        request.skip_ats = true;
        request.keywords = strings(&["Cobol", "Python"]);

        let outcome = tailor_resume(request, llm.clone()).await.unwrap();

        assert!(outcome.ats.is_none());
        assert_eq!(outcome.resume, outcome.initial_resume);
        assert_eq!(outcome.selected_keywords, strings(&["Python", "Cobol"]));
        assert!(llm.last_prompt().unwrap().contains("Python, Cobol"));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_pipeline_analyzes_raw_job_text() {
        let llm = Arc::new(ScriptedGenerator::new(vec![
            ScriptedReply::text(r#"{"title": "Python Developer", "required_skills": ["Python", "AWS"]}"#),
            ScriptedReply::text(REWRITE),
        ]));
        let mut request = run_request();
        request.job = None;
        request.job_text = Some("Python Developer. Must know Python and AWS.".to_string());
        request.skip_ats = true;

        let outcome = tailor_resume(request, llm.clone()).await.unwrap();

        assert_eq!(outcome.job, python_job());
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_pipeline_requires_resume_and_job() {
        let llm: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator::silent());

        let mut missing_resume = run_request();
        missing_resume.resume = None;
        let result = tailor_resume(missing_resume, llm.clone()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let mut missing_job = run_request();
        missing_job.job = None;
        let result = tailor_resume(missing_job, llm).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
