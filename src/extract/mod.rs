// src/extract/mod.rs
//
// Turns a raw LLM completion string into a typed result or a deterministic
// fallback. Models wrap their JSON in prose and markdown fences more often
// than not, so the candidate is located heuristically before parsing.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("candidate is not a JSON object")]
    NotAnObject,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("score is not numeric: {0}")]
    NonNumericScore(String),
}

/// Sentiment verdict for a piece of text. `message` is a short description
/// of the tone (the prompt asks for 10 words or fewer, not enforced here).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub message: String,
    pub score: f64,
}

impl SentimentResult {
    /// Neutral default returned when no sentiment could be recovered.
    pub fn fallback() -> Self {
        Self {
            message: "Could not parse sentiment".to_string(),
            score: 0.0,
        }
    }
}

/// A rewritten email body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailResult {
    pub email: String,
}

/// Locates the JSON candidate inside a completion string.
///
/// 1. If the input contains a triple-backtick fence, only the first fenced
///    segment is considered.
/// 2. The candidate is narrowed to the span from its first `{` to its last
///    `}` inclusive, stripping a leading language tag like `json` and any
///    trailing commentary. A fenced segment with no `{` stays unnarrowed.
/// 3. Without a fence, the whole input is searched the same way.
///
/// First-to-last brace is not balanced-brace matching: input with multiple
/// JSON fragments or literal braces inside string values can produce a
/// malformed span. Known limitation, kept deliberately. This function is the
/// seam to replace if a stricter locator is ever needed.
pub fn json_candidate(raw: &str) -> &str {
    let candidate = first_fenced_segment(raw).unwrap_or(raw);
    match (candidate.find('{'), candidate.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &candidate[start..=end],
        // No braces (or last `}` before first `{`): hand the candidate to
        // the parser as-is and let it fail.
        _ => candidate,
    }
}

/// Second segment of a split on the triple-backtick delimiter, i.e. the body
/// of the first fence. A lone unclosed fence still yields a segment.
fn first_fenced_segment(raw: &str) -> Option<&str> {
    let mut parts = raw.split("```");
    parts.next();
    parts.next()
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    let candidate = json_candidate(raw);
    let value: Value = serde_json::from_str(candidate)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractError::NotAnObject),
    }
}

fn coerce_score(value: &Value) -> Result<f64, ExtractError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ExtractError::NonNumericScore(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ExtractError::NonNumericScore(s.clone())),
        other => Err(ExtractError::NonNumericScore(other.to_string())),
    }
}

/// Extracts a sentiment verdict from a completion. Requires `message` and
/// `score`; a score supplied as a numeric string is coerced to f64, any
/// extra fields the model volunteered are dropped.
pub fn extract_sentiment(raw: &str) -> Result<SentimentResult, ExtractError> {
    let map = parse_object(raw)?;
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .ok_or(ExtractError::MissingField("message"))?
        .to_string();
    let score = coerce_score(map.get("score").ok_or(ExtractError::MissingField("score"))?)?;
    Ok(SentimentResult { message, score })
}

/// Extracts a rewritten email body from a completion. Requires `email`.
pub fn extract_email(raw: &str) -> Result<EmailResult, ExtractError> {
    let map = parse_object(raw)?;
    let email = map
        .get("email")
        .and_then(Value::as_str)
        .ok_or(ExtractError::MissingField("email"))?
        .to_string();
    Ok(EmailResult { email })
}

/// Sentiment extraction that never fails: a neutral default is always a
/// usable answer, so extraction errors collapse into the fallback record.
/// The unparsed completion is logged for diagnosis.
pub fn sentiment_or_fallback(raw: &str) -> SentimentResult {
    match extract_sentiment(raw) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, completion = raw, "sentiment extraction failed, returning fallback");
            SentimentResult::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_with_language_tag() {
        let raw = "```json\n{\"message\": \"positive tone\", \"score\": 0.8}\n```";
        let result = extract_sentiment(raw).unwrap();
        assert_eq!(result.message, "positive tone");
        assert_eq!(result.score, 0.8);
    }

    #[test]
    fn test_unfenced_json_with_prose_prefix() {
        let raw = "Sure! {\"score\": \"0.5\", \"message\": \"neutral\"}";
        let result = extract_sentiment(raw).unwrap();
        assert_eq!(result.message, "neutral");
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_string_score_coerced_to_number() {
        let raw = "{\"message\": \"upbeat\", \"score\": \"0.92\"}";
        let result = extract_sentiment(raw).unwrap();
        assert_eq!(result.score, 0.92);
    }

    #[test]
    fn test_non_numeric_score_is_coercion_failure() {
        let raw = "{\"message\": \"upbeat\", \"score\": \"very high\"}";
        let err = extract_sentiment(raw).unwrap_err();
        assert!(matches!(err, ExtractError::NonNumericScore(_)));
    }

    #[test]
    fn test_no_braces_falls_back() {
        let raw = "I cannot help with that.";
        assert!(extract_sentiment(raw).is_err());
        assert_eq!(sentiment_or_fallback(raw), SentimentResult::fallback());
    }

    #[test]
    fn test_malformed_braces_fall_back() {
        let raw = "{not json}";
        assert!(extract_sentiment(raw).is_err());
        let result = sentiment_or_fallback(raw);
        assert_eq!(result.message, "Could not parse sentiment");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_missing_message_falls_back() {
        let raw = "{\"score\": 0.3}";
        let err = extract_sentiment(raw).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField("message")));
    }

    #[test]
    fn test_fenced_email() {
        let raw = "```\n{\"email\": \"Dear team, ...\"}\n```";
        let result = extract_email(raw).unwrap();
        assert_eq!(result.email, "Dear team, ...");
    }

    #[test]
    fn test_email_unparsable_is_error() {
        assert!(extract_email("I cannot help with that.").is_err());
    }

    #[test]
    fn test_only_first_fence_is_considered() {
        let raw = "```json\n{\"message\": \"calm\", \"score\": 0.1}\n```\nand also\n```json\n{\"message\": \"angry\", \"score\": -0.9}\n```";
        let result = extract_sentiment(raw).unwrap();
        assert_eq!(result.message, "calm");
        assert_eq!(result.score, 0.1);
    }

    #[test]
    fn test_fence_without_brace_stays_unnarrowed() {
        // The fenced segment has no `{`, so it goes to the parser whole and
        // fails, even though valid JSON follows the fence.
        let raw = "```\nplain text\n```\n{\"message\": \"hidden\", \"score\": 1}";
        assert_eq!(json_candidate(raw), "\nplain text\n");
        assert!(extract_sentiment(raw).is_err());
    }

    #[test]
    fn test_trailing_commentary_inside_fence_is_stripped() {
        let raw = "```json\n{\"message\": \"fine\", \"score\": 0}\nHope this helps!\n```";
        let result = extract_sentiment(raw).unwrap();
        assert_eq!(result.message, "fine");
    }

    #[test]
    fn test_first_to_last_brace_is_not_balanced() {
        // Two objects in one candidate produce a malformed span. Accepted
        // limitation of the first-to-last heuristic.
        let raw = "{\"message\": \"a\", \"score\": 1} {\"message\": \"b\", \"score\": 2}";
        assert!(extract_sentiment(raw).is_err());
    }

    #[test]
    fn test_reversed_braces_fall_back() {
        let raw = "} backwards {";
        assert_eq!(sentiment_or_fallback(raw), SentimentResult::fallback());
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        // An array parses but is not an object; candidate search requires a
        // `{` so force it through the fence path unnarrowed.
        let raw = "```\n[1, 2, 3]\n```";
        let err = extract_sentiment(raw).unwrap_err();
        assert!(matches!(err, ExtractError::NotAnObject));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let raw = "```json\n{\"message\": \"steady\", \"score\": \"0.4\"}\n```";
        let first = extract_sentiment(raw).unwrap();
        let second = extract_sentiment(raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let raw = "{\"message\": \"ok\", \"score\": 0.2, \"reasoning\": \"because\"}";
        let result = extract_sentiment(raw).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["message", "score"]
        );
    }

    #[test]
    fn test_empty_input_falls_back() {
        assert_eq!(sentiment_or_fallback(""), SentimentResult::fallback());
    }
}
