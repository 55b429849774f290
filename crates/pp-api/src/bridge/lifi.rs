//! LI.FI REST client (`/quote`, `/chains`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use pp_protocol::{SEPOLIA_CHAIN_ID, SEPOLIA_USDC};

use super::{ChainSummary, QuoteError, QuoteRequest, QuoteService, QuoteSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct LifiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Integrator tag sent with every quote.
    #[serde(default = "default_integrator")]
    pub integrator: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://li.quest/v1".into()
}
fn default_integrator() -> String {
    "paypilot".into()
}
fn default_timeout_secs() -> u64 {
    15
}

impl Default for LifiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            integrator: default_integrator(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LifiConfig {
    /// Load from `LIFI_BASE_URL`, `LIFI_INTEGRATOR`, `LIFI_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("LIFI_BASE_URL").unwrap_or(defaults.base_url),
            integrator: std::env::var("LIFI_INTEGRATOR").unwrap_or(defaults.integrator),
            timeout_secs: std::env::var("LIFI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Deserialize)]
struct ChainsResponse {
    #[serde(default)]
    chains: Vec<LifiChain>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LifiChain {
    id: u64,
    name: String,
    native_token: Option<NativeToken>,
}

#[derive(Deserialize)]
struct NativeToken {
    symbol: String,
}

pub struct LifiClient {
    client: reqwest::Client,
    config: LifiConfig,
}

impl LifiClient {
    pub fn new(config: LifiConfig) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuoteError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, QuoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| QuoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl QuoteService for LifiClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteSummary, QuoteError> {
        let query = [
            ("fromChain", request.from_chain_id.to_string()),
            ("toChain", SEPOLIA_CHAIN_ID.to_string()),
            ("fromToken", request.from_token.clone()),
            ("toToken", SEPOLIA_USDC.to_string()),
            ("fromAmount", request.from_amount.clone()),
            ("fromAddress", request.from_address.clone()),
            ("integrator", self.config.integrator.clone()),
        ];

        let summary: QuoteSummary = self
            .get_json(self.client.get(self.url("quote")).query(&query))
            .await?;

        tracing::info!(
            from_chain = request.from_chain_id,
            tool = %summary.tool,
            to_amount = %summary.estimate.to_amount,
            "bridge quote received"
        );
        Ok(summary)
    }

    async fn chains(&self) -> Result<Vec<ChainSummary>, QuoteError> {
        let resp: ChainsResponse = self.get_json(self.client.get(self.url("chains"))).await?;
        Ok(resp
            .chains
            .into_iter()
            .map(|c| ChainSummary {
                id: c.id,
                name: c.name,
                native_token: c.native_token.map(|t| t.symbol),
            })
            .collect())
    }
}
