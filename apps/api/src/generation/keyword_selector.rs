//! Keyword Selector: ranks caller-supplied keywords by relevance to a job.
//!
//! Pure and synchronous. Scoring per keyword (case-insensitive):
//!   +10  equals a required or preferred skill
//!   +5   contains, or is contained by, any such skill
//!   +8   appears in the job title
//!   +3   appears in any key responsibility
//! An exact skill match also satisfies the containment rule, so it scores 15.

use std::collections::HashSet;

use tracing::debug;

use crate::models::job::JobDescription;

pub const DEFAULT_MAX_KEYWORDS: usize = 10;

const EXACT_SKILL_SCORE: u32 = 10;
const PARTIAL_SKILL_SCORE: u32 = 5;
const TITLE_SCORE: u32 = 8;
const RESPONSIBILITY_SCORE: u32 = 3;

/// Returns at most `max_count` keywords, highest score first. Ties keep the
/// caller's order.
pub fn select_keywords(keywords: &[String], job: &JobDescription, max_count: usize) -> Vec<String> {
    if keywords.is_empty() {
        return Vec::new();
    }

    let skills: HashSet<String> = job.all_skills().map(|s| s.to_lowercase()).collect();
    let title = job.title.to_lowercase();
    let responsibilities: Vec<String> = job
        .key_responsibilities
        .iter()
        .map(|r| r.to_lowercase())
        .collect();

    let mut scored: Vec<(&String, u32)> = keywords
        .iter()
        .map(|keyword| {
            let score = relevance(&keyword.to_lowercase(), &skills, &title, &responsibilities);
            (keyword, score)
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let selected: Vec<String> = scored
        .into_iter()
        .take(max_count)
        .map(|(keyword, _)| keyword.clone())
        .collect();

    debug!("Selected keywords: {}", selected.join(", "));
    selected
}

fn relevance(keyword: &str, skills: &HashSet<String>, title: &str, responsibilities: &[String]) -> u32 {
    let mut score = 0;

    if skills.contains(keyword) {
        score += EXACT_SKILL_SCORE;
    }
    if skills
        .iter()
        .any(|skill| skill.contains(keyword) || keyword.contains(skill.as_str()))
    {
        score += PARTIAL_SKILL_SCORE;
    }
    if title.contains(keyword) {
        score += TITLE_SCORE;
    }
    if responsibilities.iter().any(|r| r.contains(keyword)) {
        score += RESPONSIBILITY_SCORE;
    }

    score
}
