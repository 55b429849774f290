//! Locate and parse the JSON object in free-form model output.
//!
//! The candidate is everything from the first `{` to the last `}`. This is
//! not a tokenizer: two separate objects, or braces in surrounding prose,
//! produce a span that fails to parse. That failure is reported, not repaired.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON object found")]
    NoJsonFound,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),
}

/// The first-`{`-to-last-`}` span, inclusive.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extract and strictly parse the brace span of `text`.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ExtractionError> {
    let span = brace_span(text).ok_or(ExtractionError::NoJsonFound)?;
    serde_json::from_str(span).map_err(|e| ExtractionError::MalformedJson(e.to_string()))
}
