//! Keyword Extractor: derives the ATS keyword set for a job description.
//!
//! The local pass is deterministic and always runs. The remote pass asks the
//! model for more keywords when the local set is thin, and is abandoned for
//! good once the quota is exhausted.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tracing::{info, warn};

use crate::ats::prompts::KEYWORD_PROMPT_TEMPLATE;
use crate::ats::quota::QuotaState;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::retry::{with_backoff, RetryPolicy};
use crate::llm_client::{call_json, JsonShape, TextGenerator};
use crate::models::job::JobDescription;

/// Words ignored in titles and responsibilities (compared lowercase).
pub const STOP_WORDS: &[&str] = &["and", "the", "or", "for", "in", "at", "with", "to", "a", "an"];

/// Local sets at least this large skip the remote pass.
pub const REMOTE_SKIP_THRESHOLD: usize = 15;

/// Tokens must be longer than this many characters.
const MIN_TOKEN_LEN: usize = 2;

static CAPITALIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-zA-Z]+\b").expect("capitalized pattern is valid"));
static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("double quote pattern is valid"));
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").expect("single quote pattern is valid"));

/// Ordered keyword list with case-sensitive dedup.
#[derive(Default)]
struct KeywordSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordSet {
    fn insert(&mut self, keyword: &str) {
        if !keyword.trim().is_empty() && self.seen.insert(keyword.to_string()) {
            self.items.push(keyword.to_string());
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

fn is_significant(token: &str) -> bool {
    token.chars().count() > MIN_TOKEN_LEN && !STOP_WORDS.contains(&token.to_lowercase().as_str())
}

/// Local, deterministic keyword extraction. No external calls.
pub fn extract_local(job: &JobDescription) -> Vec<String> {
    local_set(job).into_vec()
}

fn local_set(job: &JobDescription) -> KeywordSet {
    let mut keywords = KeywordSet::default();

    for skill in job.all_skills() {
        keywords.insert(skill);
    }

    for word in job.title.split_whitespace().filter(|w| is_significant(w)) {
        keywords.insert(word);
    }

    for responsibility in &job.key_responsibilities {
        let capitalized = CAPITALIZED
            .find_iter(responsibility)
            .map(|m| m.as_str());
        let quoted = DOUBLE_QUOTED
            .captures_iter(responsibility)
            .chain(SINGLE_QUOTED.captures_iter(responsibility))
            .filter_map(|c| c.get(1).map(|m| m.as_str()));

        for term in capitalized.chain(quoted).filter(|t| is_significant(t)) {
            keywords.insert(term);
        }
    }

    keywords
}

fn job_prompt_text(job: &JobDescription) -> String {
    format!(
        "Title: {}\nRequired Skills: {}\nPreferred Skills: {}\nResponsibilities: {}",
        job.title,
        job.required_skills.join(", "),
        job.preferred_skills.join(", "),
        job.key_responsibilities.join(", ")
    )
}

/// Extracts ATS keywords for a job, with remote assistance while quota lasts.
pub struct KeywordExtractor {
    llm: Arc<dyn TextGenerator>,
    quota: QuotaState,
    retry: RetryPolicy,
}

impl KeywordExtractor {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            llm,
            quota: QuotaState::Available,
            retry: RetryPolicy {
                max_retries: 2,
                base_delay: Duration::from_secs(2),
            },
        }
    }

    pub fn quota(&self) -> QuotaState {
        self.quota
    }

    pub fn absorb_quota(&mut self, other: QuotaState) {
        self.quota.absorb(other);
    }

    /// Returns the keyword set for `job`. Never fails: remote problems fall
    /// back to the local set.
    pub async fn extract(&mut self, job: &JobDescription) -> Vec<String> {
        let mut keywords = local_set(job);

        if self.quota.is_exhausted() {
            info!("Using local keyword extraction due to API quota exhaustion");
            return keywords.into_vec();
        }

        if keywords.len() >= REMOTE_SKIP_THRESHOLD {
            info!(
                "Using local keyword extraction ({} keywords found)",
                keywords.len()
            );
            return keywords.into_vec();
        }

        let prompt = KEYWORD_PROMPT_TEMPLATE.replace("{job_description}", &job_prompt_text(job));
        let llm = self.llm.as_ref();

        let result = with_backoff(self.retry, "Keyword extraction", || {
            call_json::<Vec<String>>(llm, &prompt, JSON_ONLY_SYSTEM, JsonShape::Array)
        })
        .await;

        match result {
            Ok(remote) => {
                let local_count = keywords.len();
                for keyword in &remote {
                    keywords.insert(keyword.trim());
                }
                info!(
                    "Keyword extraction: {} local + {} remote-only keywords",
                    local_count,
                    keywords.len() - local_count
                );
            }
            Err(e) => {
                if self.quota.observe(&e) {
                    warn!("API quota exhausted. Switching to local keyword extraction.");
                } else {
                    warn!("API keyword extraction failed ({e}). Using local keywords.");
                }
            }
        }

        keywords.into_vec()
    }
}
