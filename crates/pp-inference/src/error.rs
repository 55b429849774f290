//! Translation error taxonomy.

use thiserror::Error;

use crate::completion::CompletionError;
use crate::extract::ExtractionError;

/// Why a message could not be turned into a usable result.
///
/// Never surfaced raw: the intent parser maps these to a `ParseError`, the
/// agent to a fallback reply with no action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("transport error: {0}")]
    Transport(#[from] CompletionError),

    #[error("no JSON object found in model output")]
    NoJsonFound,

    #[error("malformed JSON in model output: {0}")]
    MalformedJson(String),

    /// Parsed fine but failed a schema check (agent recipient address).
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl From<ExtractionError> for InferenceError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::NoJsonFound => InferenceError::NoJsonFound,
            ExtractionError::MalformedJson(reason) => InferenceError::MalformedJson(reason),
        }
    }
}

pub type InferenceResult<T> = Result<T, InferenceError>;
