//! In-memory quote service for tests and offline development.

use std::sync::Mutex;

use async_trait::async_trait;

use pp_protocol::SOURCE_CHAINS;

use super::{ChainSummary, QuoteError, QuoteEstimate, QuoteRequest, QuoteService, QuoteSummary};

/// Returns a fixed quote (or error) and records every request.
pub struct MockQuoteService {
    result: Result<QuoteSummary, QuoteError>,
    requests: Mutex<Vec<QuoteRequest>>,
}

impl MockQuoteService {
    /// A fixed 100 USDC -> 99.8 USDC quote.
    pub fn new() -> Self {
        Self {
            result: Ok(QuoteSummary {
                estimate: QuoteEstimate {
                    from_amount: "100000000".into(),
                    to_amount: "99800000".into(),
                    gas_costs: vec![],
                    execution_duration: 60.0,
                },
                tool: "mock-bridge".into(),
                kind: "lifi".into(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: QuoteError) -> Self {
        Self {
            result: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<QuoteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockQuoteService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteService for MockQuoteService {
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteSummary, QuoteError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }

    async fn chains(&self) -> Result<Vec<ChainSummary>, QuoteError> {
        if let Err(e) = &self.result {
            return Err(e.clone());
        }
        Ok(SOURCE_CHAINS
            .iter()
            .map(|c| ChainSummary {
                id: c.id,
                name: c.name.to_string(),
                native_token: None,
            })
            .collect())
    }
}
