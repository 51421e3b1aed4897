use std::sync::LazyLock;

use regex::{Captures, Regex};

// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that rewrites resume content.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Only rephrase, reorder, and emphasize facts already present in the resume. \
    Do NOT invent employers, titles, dates, degrees, metrics, or certifications. \
    A keyword may be added only where the existing experience plausibly supports it.";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Fills `{name}` placeholders in one pass. Substituted values are never
/// rescanned, so caller text containing `{job_title}` stays literal. Braces
/// that do not name a known value (JSON examples) are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_names() {
        let filled = fill_template("Title: {job_title}\nMissing: {missing}", &[
            ("job_title", "Python Developer"),
            ("missing", "AWS"),
        ]);
        assert_eq!(filled, "Title: Python Developer\nMissing: AWS");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template("Summary: {summary}\nTitle: {job_title}", &[
            ("summary", "I love {job_title} placeholders"),
            ("job_title", "Python Developer"),
        ]);
        assert_eq!(
            filled,
            "Summary: I love {job_title} placeholders\nTitle: Python Developer"
        );
    }

    #[test]
    fn test_fill_template_keeps_json_braces() {
        let template = "Return:\n{\n  \"summary\": \"...\"\n}\n{unknown}";
        assert_eq!(fill_template(template, &[("summary", "x")]), template);
    }
}
