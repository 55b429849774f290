//! Model completion client seam.

use async_trait::async_trait;
use serde::Serialize;

/// One chat-completion call: a system instruction plus a single user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Sampling temperature. Kept low so the model favors strict formatting.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// Errors raised by a completion backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    /// Network failure, DNS, TLS or timeout.
    #[error("completion request failed: {0}")]
    Transport(String),

    /// Non-2xx answer (bad key, quota, rate limit, outage).
    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid completion response body: {0}")]
    Decode(String),

    #[error("completion client setup failed: {0}")]
    Setup(String),
}

/// A hosted chat-completion service.
///
/// Implementations return the raw text of the first choice, which may or may
/// not contain JSON. No retries: one call, one result.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
