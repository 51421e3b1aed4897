//! Best-effort extraction of JSON payloads from free-form model output.
//!
//! Fallback ladder:
//! 1. strip markdown fences, parse the whole text
//! 2. slice from the first opening delimiter to the last closing one, parse that
//! 3. give up with `LlmError::MalformedResponse` / `LlmError::Parse`
//!
//! `parse_embedded_lenient` adds one more rung before giving up: the sliced
//! payload with trailing commas removed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use super::LlmError;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"));

/// The top-level JSON value the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Object => ('{', '}'),
            JsonShape::Array => ('[', ']'),
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonShape::Object => f.write_str("object"),
            JsonShape::Array => f.write_str("array"),
        }
    }
}

/// Parses the JSON value of the given shape out of `text`.
pub fn parse_embedded<T: DeserializeOwned>(text: &str, shape: JsonShape) -> Result<T, LlmError> {
    if let Ok(value) = serde_json::from_str(strip_json_fences(text)) {
        return Ok(value);
    }

    let slice = slice_delimited(text, shape)
        .ok_or_else(|| LlmError::MalformedResponse(format!("no JSON {shape} found in response")))?;

    serde_json::from_str(slice).map_err(LlmError::Parse)
}

/// Like `parse_embedded`, but retries the sliced payload once with trailing
/// commas stripped. Used for whole-resume rewrites, where models most often
/// emit almost-valid JSON.
pub fn parse_embedded_lenient<T: DeserializeOwned>(
    text: &str,
    shape: JsonShape,
) -> Result<T, LlmError> {
    match parse_embedded(text, shape) {
        Ok(value) => Ok(value),
        Err(first_error) => {
            let Some(slice) = slice_delimited(text, shape) else {
                return Err(first_error);
            };
            let repaired = remove_trailing_commas(slice);
            serde_json::from_str(&repaired).map_err(|_| first_error)
        }
    }
}

fn slice_delimited(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_direct_parse() {
        let keywords: Vec<String> =
            parse_embedded(r#"["Python", "AWS"]"#, JsonShape::Array).unwrap();
        assert_eq!(keywords, vec!["Python", "AWS"]);
    }

    #[test]
    fn test_array_surrounded_by_prose() {
        let text = "Sure! Here are the keywords:\n[\"Kubernetes\", \"Terraform\"]\nHope this helps.";
        let keywords: Vec<String> = parse_embedded(text, JsonShape::Array).unwrap();
        assert_eq!(keywords, vec!["Kubernetes", "Terraform"]);
    }

    #[test]
    fn test_object_surrounded_by_prose() {
        let text = "Result: {\"summary\": \"Backend engineer.\", \"skills\": [\"Go\"]} -- done";
        let value: Value = parse_embedded(text, JsonShape::Object).unwrap();
        assert_eq!(value["summary"], "Backend engineer.");
    }

    #[test]
    fn test_missing_delimiters_is_malformed() {
        let result: Result<Vec<String>, _> = parse_embedded("no json here", JsonShape::Array);
        assert!(matches!(result, Err(LlmError::MalformedResponse(_))));
    }

    #[test]
    fn test_closing_before_opening_is_malformed() {
        let result: Result<Value, _> = parse_embedded("} oops {", JsonShape::Object);
        assert!(matches!(result, Err(LlmError::MalformedResponse(_))));
    }

    #[test]
    fn test_broken_slice_is_parse_error() {
        let result: Result<Value, _> = parse_embedded("{\"summary\": }", JsonShape::Object);
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let result: Result<Vec<String>, _> =
            parse_embedded("{\"keywords\": 1}", JsonShape::Array);
        assert!(result.is_err());
    }

    #[test]
    fn test_lenient_repairs_trailing_commas() {
        let text = "Here you go: {\"summary\": \"x\", \"skills\": [\"Rust\", \"Go\",],}";
        let value: Value = parse_embedded_lenient(text, JsonShape::Object).unwrap();
        assert_eq!(value["skills"][1], "Go");
    }

    #[test]
    fn test_lenient_keeps_first_error_when_repair_fails() {
        let result: Result<Value, _> = parse_embedded_lenient("{\"a\": ,}", JsonShape::Object);
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
