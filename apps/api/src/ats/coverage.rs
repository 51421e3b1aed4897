//! Coverage Scorer: how much of a keyword set a resume already contains.
//!
//! Pure and deterministic: no LLM call, no state.
//!
//! Algorithm:
//! 1. Serialize the resume to JSON and lowercase it.
//! 2. For each keyword:
//!    - exact substring → match
//!    - multi-word keyword whose every word longer than 3 chars is present → partial
//!    - otherwise → missing (single words never get partial credit)
//! 3. score = (matches + 0.5 × partial) / total × 100; an empty keyword set scores 100.

use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

/// Words at or below this length are ignored when checking partial matches.
const SHORT_WORD_LEN: usize = 3;
const PARTIAL_CREDIT: f64 = 0.5;

/// Keyword coverage of one resume against one keyword set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// 0 – 100
    pub score: f64,
    pub matches: Vec<String>,
    pub partial_matches: Vec<String>,
    pub missing: Vec<String>,
    pub total_keywords: usize,
}

impl CoverageReport {
    fn perfect_for_empty_set() -> Self {
        Self {
            score: 100.0,
            matches: vec![],
            partial_matches: vec![],
            missing: vec![],
            total_keywords: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCoverage {
    Matched,
    Partial,
    Missing,
}

/// Lowercased JSON dump of the whole resume. Unset optional fields appear as
/// `null`, so their keys are part of the searchable text.
pub fn resume_text(resume: &Resume) -> String {
    // Plain structs with string keys always serialize.
    serde_json::to_string(resume)
        .unwrap_or_default()
        .to_lowercase()
}

/// Classifies one keyword against an already-lowercased resume text.
pub fn classify(keyword: &str, text: &str) -> KeywordCoverage {
    let keyword = keyword.to_lowercase();

    if text.contains(&keyword) {
        return KeywordCoverage::Matched;
    }

    let words: Vec<&str> = keyword.split_whitespace().collect();
    let significant_words_present = words
        .iter()
        .filter(|w| w.chars().count() > SHORT_WORD_LEN)
        .all(|w| text.contains(*w));

    if words.len() > 1 && significant_words_present {
        KeywordCoverage::Partial
    } else {
        KeywordCoverage::Missing
    }
}

/// Scores `resume` against `keywords`. Report lists keep the keywords' original casing.
pub fn score(resume: &Resume, keywords: &[String]) -> CoverageReport {
    if keywords.is_empty() {
        return CoverageReport::perfect_for_empty_set();
    }

    let text = resume_text(resume);
    let mut matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut missing = Vec::new();

    for keyword in keywords {
        match classify(keyword, &text) {
            KeywordCoverage::Matched => matches.push(keyword.clone()),
            KeywordCoverage::Partial => partial_matches.push(keyword.clone()),
            KeywordCoverage::Missing => missing.push(keyword.clone()),
        }
    }

    let total_keywords = keywords.len();
    let credited = matches.len() as f64 + partial_matches.len() as f64 * PARTIAL_CREDIT;

    CoverageReport {
        score: credited / total_keywords as f64 * 100.0,
        matches,
        partial_matches,
        missing,
        total_keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{sample_resume, strings};

    #[test]
    fn test_empty_keyword_set_scores_100() {
        let report = score(&sample_resume(), &[]);
        assert_eq!(report, CoverageReport::perfect_for_empty_set());
    }

    #[test]
    fn test_missing_required_skills_score_zero() {
        let report = score(&sample_resume(), &strings(&["Python", "AWS"]));
        assert_eq!(report.score, 0.0);
        assert!(report.matches.is_empty());
        assert_eq!(report.missing, strings(&["Python", "AWS"]));
        assert_eq!(report.total_keywords, 2);
    }

    #[test]
    fn test_match_is_case_insensitive_and_keeps_casing() {
        let report = score(&sample_resume(), &strings(&["JAVA", "initech"]));
        assert_eq!(report.matches, strings(&["JAVA", "initech"]));
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_unset_section_names_still_match() {
        let resume = sample_resume();
        assert!(resume.certifications.is_none() && resume.projects.is_none());

        let report = score(&resume, &strings(&["Certifications", "Projects", "Location"]));

        assert_eq!(report.matches, strings(&["Certifications", "Projects", "Location"]));
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_all_present_keywords_score_100() {
        let keywords = strings(&["Java", "Billing Services", "Software Engineer", "Sam Rivera"]);
        assert_eq!(score(&sample_resume(), &keywords).score, 100.0);
    }

    #[test]
    fn test_multi_word_keyword_gets_partial_credit() {
        // "billing" and "services" both appear, but not as "services billing".
        let report = score(&sample_resume(), &strings(&["Services Billing", "Python"]));
        assert_eq!(report.partial_matches, strings(&["Services Billing"]));
        assert_eq!(report.missing, strings(&["Python"]));
        assert_eq!(report.score, 25.0);
    }

    #[test]
    fn test_short_words_are_ignored_for_partial_credit() {
        // "of" and "cs" are too short to matter; "computer" is present.
        assert_eq!(
            classify("Computer of CS", &resume_text(&sample_resume())),
            KeywordCoverage::Partial
        );
    }

    #[test]
    fn test_multi_word_with_absent_word_is_missing() {
        assert_eq!(
            classify("Billing Kubernetes", &resume_text(&sample_resume())),
            KeywordCoverage::Missing
        );
    }

    #[test]
    fn test_single_word_never_partial() {
        assert_eq!(
            classify("Javascript", &resume_text(&sample_resume())),
            KeywordCoverage::Missing
        );
    }

    #[test]
    fn test_lists_partition_keywords() {
        let keywords = strings(&[
            "Java",
            "Python",
            "Services Billing",
            "Initech",
            "Kubernetes Operators",
        ]);
        let report = score(&sample_resume(), &keywords);

        let mut union: Vec<String> = report
            .matches
            .iter()
            .chain(&report.partial_matches)
            .chain(&report.missing)
            .cloned()
            .collect();
        union.sort();
        let mut expected = keywords.clone();
        expected.sort();

        assert_eq!(union, expected);
        assert_eq!(report.total_keywords, keywords.len());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let keywords = strings(&["Java", "Services Billing", "Go"]);
        assert_eq!(
            score(&sample_resume(), &keywords),
            score(&sample_resume(), &keywords)
        );
    }
}
