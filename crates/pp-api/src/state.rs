//! Shared application state for the Axum server.
//!
//! Everything here is read-only after startup; each request runs its own
//! parser or agent call against the shared clients.

use std::sync::Arc;

use pp_inference::{
    Agent, CompletionClient, IntentParser, MockCompletionClient, OpenAiClient, RecipientPolicy,
};

use crate::bridge::{LifiClient, MockQuoteService, QuoteService};
use crate::config::ApiConfig;

/// Shared application state, cheap to clone into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Single-intent parser backing `/api/parse`.
    pub parser: Arc<IntentParser>,
    /// Conversational agent backing `/api/agent`.
    pub agent: Arc<Agent>,
    /// Bridge quote relay backing `/api/quote` and `/api/chains`.
    pub quotes: Arc<dyn QuoteService>,
}

impl AppState {
    /// Wire the parser and agent to one completion client.
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        policy: RecipientPolicy,
        quotes: Arc<dyn QuoteService>,
    ) -> Self {
        Self {
            parser: Arc::new(IntentParser::new(completion.clone())),
            agent: Arc::new(Agent::new(completion, policy)),
            quotes,
        }
    }

    /// Build production clients from configuration.
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let completion = OpenAiClient::new(config.openai.clone())?;
        let quotes = LifiClient::new(config.bridge.clone())?;
        Ok(Self::new(
            Arc::new(completion),
            config.agent.policy(),
            Arc::new(quotes),
        ))
    }

    /// State backed by a scripted completion client and a fixed quote (for tests).
    pub fn with_mock(completion: Arc<MockCompletionClient>, policy: RecipientPolicy) -> Self {
        Self::new(completion, policy, Arc::new(MockQuoteService::new()))
    }
}
