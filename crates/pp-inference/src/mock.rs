//! Scripted completion client for tests and offline runs.
//!
//! Replies are served from a queue; once it is empty the default reply is
//! repeated. Every request is recorded for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::completion::{CompletionClient, CompletionError, CompletionRequest};

pub struct MockCompletionClient {
    queued: Mutex<VecDeque<Result<String, CompletionError>>>,
    default_reply: Result<String, CompletionError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_default(Ok(text.into()))
    }

    /// Always fail with `err`.
    pub fn failing(err: CompletionError) -> Self {
        Self::with_default(Err(err))
    }

    fn with_default(default_reply: Result<String, CompletionError>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            default_reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-shot reply ahead of the default.
    pub fn push_reply(&self, reply: Result<String, CompletionError>) {
        self.queued.lock().unwrap().push_back(reply);
    }

    /// All requests seen so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        let queued = self.queued.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.default_reply.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
