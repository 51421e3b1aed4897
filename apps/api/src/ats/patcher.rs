//! Resume Patcher: closes keyword gaps found by the coverage scorer.
//!
//! Remote first: the model rewrites the summary and proposes skills.
//! Local fallback: append relevant missing skills and a one-sentence summary
//! addendum. The input resume is never modified; a new value is returned.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::ats::coverage::CoverageReport;
use crate::ats::prompts::PATCH_PROMPT_TEMPLATE;
use crate::ats::quota::QuotaState;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{call_json, JsonShape, LlmError, TextGenerator};
use crate::models::job::JobDescription;
use crate::models::resume::Resume;

/// Reports scoring above this go straight to the local patch.
pub const REMOTE_PATCH_MAX_SCORE: f64 = 70.0;
const PROMPT_MISSING_KEYWORDS: usize = 5;
const SUMMARY_KEYWORDS: usize = 3;

/// Shape the rewrite prompt asks for. At least one usable field must be
/// present. `skills` is kept loose so a bad list does not cost the summary.
#[derive(Debug, Deserialize)]
struct RemotePatch {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    skills: Option<Value>,
}

impl RemotePatch {
    /// String entries of `skills` when it is a list; `None` otherwise.
    fn skill_list(&self) -> Option<Vec<String>> {
        match &self.skills {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }
    }
}

pub struct ResumePatcher {
    llm: Arc<dyn TextGenerator>,
    quota: QuotaState,
}

impl ResumePatcher {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            llm,
            quota: QuotaState::Available,
        }
    }

    pub fn quota(&self) -> QuotaState {
        self.quota
    }

    pub fn absorb_quota(&mut self, other: QuotaState) {
        self.quota.absorb(other);
    }

    /// Returns a patched copy of `resume`. Never fails.
    pub async fn optimize(
        &mut self,
        resume: &Resume,
        job: &JobDescription,
        report: &CoverageReport,
    ) -> Resume {
        if self.quota.is_exhausted() || report.score > REMOTE_PATCH_MAX_SCORE {
            info!(
                "Local ATS optimization (score {:.1}%, quota {:?})",
                report.score, self.quota
            );
            return patch_locally(resume, job, report);
        }

        match self.patch_remotely(resume, job, report).await {
            Ok(patched) => patched,
            Err(e) => {
                if self.quota.observe(&e) {
                    warn!("API quota exhausted, using local optimization");
                } else {
                    warn!("Remote ATS rewrite failed ({e}). Using local optimization");
                }
                patch_locally(resume, job, report)
            }
        }
    }

    async fn patch_remotely(
        &self,
        resume: &Resume,
        job: &JobDescription,
        report: &CoverageReport,
    ) -> Result<Resume, LlmError> {
        let top_missing: Vec<&str> = report
            .missing
            .iter()
            .take(PROMPT_MISSING_KEYWORDS)
            .map(String::as_str)
            .collect();

        let prompt = fill_template(
            PATCH_PROMPT_TEMPLATE,
            &[
                ("no_fabrication", NO_FABRICATION_INSTRUCTION),
                ("resume_summary", resume.summary.as_str()),
                ("resume_skills", resume.combined_skills().join(", ").as_str()),
                ("job_title", job.title.as_str()),
                ("missing_keywords", top_missing.join(", ").as_str()),
            ],
        );

        let patch: RemotePatch =
            call_json(self.llm.as_ref(), &prompt, JSON_ONLY_SYSTEM, JsonShape::Object).await?;

        let skills = patch.skill_list();
        if patch.summary.is_none() && skills.is_none() {
            return Err(LlmError::MalformedResponse(
                "rewrite response has neither summary nor a skills list".to_string(),
            ));
        }
        if patch.skills.is_some() && skills.is_none() {
            warn!("Ignoring non-list skills in ATS rewrite response");
        }

        Ok(apply_remote_patch(resume, patch.summary, skills))
    }
}

fn apply_remote_patch(resume: &Resume, summary: Option<String>, skills: Option<Vec<String>>) -> Resume {
    let mut updated = resume.clone();

    if let Some(summary) = summary {
        updated.summary = summary;
    }

    if let Some(skills) = skills {
        let mut existing: HashSet<String> = updated.skills.technical.iter().cloned().collect();
        for skill in skills {
            if existing.insert(skill.clone()) {
                updated.skills.technical.push(skill);
            }
        }
    }

    updated
}

/// Deterministic patch with no remote calls.
pub fn patch_locally(resume: &Resume, job: &JobDescription, report: &CoverageReport) -> Resume {
    let mut updated = resume.clone();

    let mut existing: HashSet<String> = updated
        .skills
        .technical
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    for skill in relevant_missing(job, &report.missing) {
        if existing.insert(skill.to_lowercase()) {
            updated.skills.technical.push(skill.to_string());
        }
    }

    let critical = critical_missing(job, &report.missing);
    updated.summary = enhance_summary(&updated.summary, &critical, SUMMARY_KEYWORDS);

    updated
}

/// Missing keywords that name a required/preferred skill or occur in a responsibility.
fn relevant_missing<'a>(job: &JobDescription, missing: &'a [String]) -> Vec<&'a str> {
    let skills: HashSet<String> = job.all_skills().map(|s| s.to_lowercase()).collect();
    let responsibilities: Vec<String> = job
        .key_responsibilities
        .iter()
        .map(|r| r.to_lowercase())
        .collect();

    missing
        .iter()
        .filter(|keyword| {
            let keyword = keyword.to_lowercase();
            skills.contains(&keyword) || responsibilities.iter().any(|r| r.contains(&keyword))
        })
        .map(String::as_str)
        .collect()
}

/// Missing keywords that occur in the job title or name a required skill.
fn critical_missing<'a>(job: &JobDescription, missing: &'a [String]) -> Vec<&'a str> {
    let title = job.title.to_lowercase();
    let required: HashSet<String> = job.required_skills.iter().map(|s| s.to_lowercase()).collect();

    missing
        .iter()
        .filter(|keyword| {
            let keyword = keyword.to_lowercase();
            title.contains(&keyword) || required.contains(&keyword)
        })
        .map(String::as_str)
        .collect()
}

/// Appends a short sentence naming up to `max_keywords` keywords to the summary.
pub fn enhance_summary(summary: &str, keywords: &[&str], max_keywords: usize) -> String {
    let chosen = &keywords[..keywords.len().min(max_keywords)];

    let addition = match chosen {
        [] => return summary.to_string(),
        [only] => format!(" Proficient in {only}."),
        [first, second] => format!(" Skilled in {first} and {second}."),
        [init @ .., last] => format!(" Experienced with {}, and {last}.", init.join(", ")),
    };

    format!("{summary}{addition}")
}
