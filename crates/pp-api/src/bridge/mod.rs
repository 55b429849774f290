//! Cross-chain bridge quotes, relayed from a routing service.
//!
//! Quotes always target USDC on Sepolia, where the vault lives. The agent
//! never calls this; only the HTTP boundary does.

pub mod lifi;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use lifi::{LifiClient, LifiConfig};
pub use mock::MockQuoteService;

/// A deposit quote request from a source chain into the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub from_chain_id: u64,
    /// Token address or symbol on the source chain.
    pub from_token: String,
    /// Amount in the token's smallest unit, as a decimal string.
    pub from_amount: String,
    pub from_address: String,
}

/// Estimate fields passed back to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEstimate {
    pub from_amount: String,
    pub to_amount: String,
    #[serde(default)]
    pub gas_costs: Vec<serde_json::Value>,
    #[serde(default)]
    pub execution_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub estimate: QuoteEstimate,
    /// Bridge or DEX the route uses.
    pub tool: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSummary {
    pub id: u64,
    pub name: String,
    pub native_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("unknown source chain: {0}")]
    UnknownChain(String),

    #[error("quote request failed: {0}")]
    Transport(String),

    #[error("quote service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid quote response: {0}")]
    Decode(String),
}

/// Source of bridge quotes and supported chains.
#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteSummary, QuoteError>;

    async fn chains(&self) -> Result<Vec<ChainSummary>, QuoteError>;
}
