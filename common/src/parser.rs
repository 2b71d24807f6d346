//! Turns the model's free-text reply into [`ExtractedFields`].
//!
//! Models often wrap JSON in a markdown code block, so a single leading
//! fence (with or without a `json` tag) is removed before a strict JSON
//! object parse. No other recovery is attempted.

use crate::model::extraction::ExtractedFields;
use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// The reply could not be read as a JSON object.
///
/// `raw` is the model output exactly as received so it can be shown to the
/// user or a reviewer.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("could not parse model response as JSON: {reason}")]
pub struct ParseFailure {
    pub raw: String,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

/// Removes a surrounding markdown code fence and an optional `json` tag.
///
/// Text that does not start with a fence is only trimmed.
///
/// ```
/// use common::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": \"1\"}\n```"), "{\"a\": \"1\"}");
/// assert_eq!(strip_code_fence("  {\"a\": \"1\"} "), "{\"a\": \"1\"}");
/// ```
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }
    let inner = trimmed.trim_matches('`').trim();
    match inner.strip_prefix(JSON_TAG) {
        Some(rest) => rest.trim(),
        None => inner,
    }
}

/// Parses a model reply into fields.
///
/// # Returns
/// * `Ok(ExtractedFields)` - the reply (after fence stripping) is a JSON object
/// * `Err(ParseFailure)` - anything else; carries the untouched reply
pub fn parse_response(text: &str) -> Result<ExtractedFields, ParseFailure> {
    let body = strip_code_fence(text);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(ExtractedFields::new(map)),
        Ok(other) => Err(ParseFailure::new(
            text,
            format!("expected a JSON object, found {}", kind_of(&other)),
        )),
        Err(e) => Err(ParseFailure::new(text, e.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
