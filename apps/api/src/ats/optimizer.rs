//! ATS Optimizer: extraction, scoring, patch, then re-scoring.
//!
//! One optimizer per request: the quota state it carries is shared between
//! its extractor and patcher and dies with it.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::ats::coverage::{score, CoverageReport};
use crate::ats::keywords::KeywordExtractor;
use crate::ats::patcher::ResumePatcher;
use crate::ats::quota::QuotaState;
use crate::llm_client::TextGenerator;
use crate::models::job::JobDescription;
use crate::models::resume::Resume;

/// Resumes scoring above this are returned untouched.
pub const SKIP_OPTIMIZATION_ABOVE: f64 = 90.0;

/// Everything one optimization pass produced.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationOutcome {
    pub resume: Resume,
    pub keywords: Vec<String>,
    pub before: CoverageReport,
    pub after: CoverageReport,
    pub skipped: bool,
    pub quota: QuotaState,
}

impl OptimizationOutcome {
    pub fn improvement(&self) -> f64 {
        self.after.score - self.before.score
    }
}

pub struct AtsOptimizer {
    extractor: KeywordExtractor,
    patcher: ResumePatcher,
}

impl AtsOptimizer {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            extractor: KeywordExtractor::new(llm.clone()),
            patcher: ResumePatcher::new(llm),
        }
    }

    pub fn quota(&self) -> QuotaState {
        let mut quota = self.extractor.quota();
        quota.absorb(self.patcher.quota());
        quota
    }

    /// Optimizes `resume` for `job` and returns only the resulting resume.
    pub async fn run(&mut self, resume: &Resume, job: &JobDescription) -> Resume {
        self.optimize(resume, job).await.resume
    }

    /// Full pass with before/after reports.
    pub async fn optimize(&mut self, resume: &Resume, job: &JobDescription) -> OptimizationOutcome {
        let keywords = self.extractor.extract(job).await;
        self.patcher.absorb_quota(self.extractor.quota());

        let before = score(resume, &keywords);
        log_report("ATS Analysis", &before);

        if before.score > SKIP_OPTIMIZATION_ABOVE {
            info!(
                "ATS score is already excellent ({:.1}%). Skipping optimization.",
                before.score
            );
            return OptimizationOutcome {
                resume: resume.clone(),
                keywords,
                after: before.clone(),
                before,
                skipped: true,
                quota: self.quota(),
            };
        }

        let optimized = self.patcher.optimize(resume, job, &before).await;
        self.extractor.absorb_quota(self.patcher.quota());

        let after = score(&optimized, &keywords);
        let outcome = OptimizationOutcome {
            resume: optimized,
            keywords,
            before,
            after,
            skipped: false,
            quota: self.quota(),
        };
        info!(
            "Optimized resume score: {:.1}% (improvement: {:+.1}%)",
            outcome.after.score,
            outcome.improvement()
        );
        outcome
    }
}

fn log_report(label: &str, report: &CoverageReport) {
    info!("{label}: score {:.1}%", report.score);
    info!(
        "Matched keywords ({}): {}",
        report.matches.len(),
        report.matches.join(", ")
    );
    if !report.partial_matches.is_empty() {
        info!(
            "Partial matches ({}): {}",
            report.partial_matches.len(),
            report.partial_matches.join(", ")
        );
    }
    info!(
        "Missing keywords ({}): {}",
        report.missing.len(),
        report.missing.join(", ")
    );
}
