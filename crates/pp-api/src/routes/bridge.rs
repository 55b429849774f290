//! Cross-chain deposit quote endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use pp_protocol::{chain_by_name, is_evm_address};

use crate::bridge::{ChainSummary, QuoteError, QuoteRequest, QuoteSummary};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Token symbol quoted when the request names none.
const DEFAULT_FROM_TOKEN: &str = "USDC";

/// Request body for a deposit quote. The source chain is given by name or ID.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    pub from_chain: Option<String>,
    pub from_chain_id: Option<u64>,
    pub from_token: Option<String>,
    pub from_amount: Option<String>,
    pub from_address: Option<String>,
}

/// Chain ID for a source chain name from the shared vocabulary.
fn resolve_chain(name: &str) -> Result<u64, QuoteError> {
    chain_by_name(name)
        .map(|c| c.id)
        .ok_or_else(|| QuoteError::UnknownChain(name.trim().to_string()))
}

impl QuoteBody {
    fn into_request(self) -> Result<QuoteRequest, ApiError> {
        let from_chain_id = match (self.from_chain_id, self.from_chain.as_deref()) {
            (Some(id), _) => id,
            (None, Some(name)) => resolve_chain(name)?,
            (None, None) => {
                return Err(ApiError::BadRequest(
                    "fromChain or fromChainId is required".into(),
                ));
            }
        };

        let from_amount = self
            .from_amount
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("fromAmount is required".into()))?;

        let from_address = self
            .from_address
            .filter(|a| is_evm_address(a))
            .ok_or_else(|| ApiError::BadRequest("fromAddress must be a 0x address".into()))?;

        Ok(QuoteRequest {
            from_chain_id,
            from_token: self
                .from_token
                .unwrap_or_else(|| DEFAULT_FROM_TOKEN.to_string()),
            from_amount,
            from_address,
        })
    }
}

/// POST /api/quote: bridge quote into the Sepolia vault.
pub async fn get_quote(
    State(state): State<AppState>,
    body: Result<Json<QuoteBody>, JsonRejection>,
) -> ApiResult<Json<QuoteSummary>> {
    let Json(body) = body?;
    let request = body.into_request()?;

    state.quotes.quote(&request).await.map(Json).map_err(|e| {
        tracing::warn!(
            error = %e,
            from_chain = request.from_chain_id,
            "bridge quote failed"
        );
        ApiError::from(e)
    })
}

/// GET /api/chains: chains the routing service supports. Empty on failure.
pub async fn list_chains(State(state): State<AppState>) -> Json<Vec<ChainSummary>> {
    match state.quotes.chains().await {
        Ok(chains) => Json(chains),
        Err(e) => {
            tracing::warn!(error = %e, "chain list unavailable");
            Json(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(chain: Option<&str>, chain_id: Option<u64>) -> QuoteBody {
        QuoteBody {
            from_chain: chain.map(str::to_string),
            from_chain_id: chain_id,
            from_token: None,
            from_amount: Some("1000000".into()),
            from_address: Some("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into()),
        }
    }

    #[test]
    fn resolve_known_and_unknown_chains() {
        assert_eq!(resolve_chain(" Polygon "), Ok(137));
        assert_eq!(
            resolve_chain(" solana "),
            Err(QuoteError::UnknownChain("solana".into()))
        );
    }

    #[test]
    fn unknown_chain_name_is_bad_request() {
        let err = body(Some("solana"), None).into_request().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m == "unknown source chain: solana"));
    }

    #[test]
    fn chain_id_wins_over_name() {
        let request = body(Some("solana"), Some(8_453)).into_request().unwrap();
        assert_eq!(request.from_chain_id, 8_453);
        assert_eq!(request.from_token, "USDC");
    }
}
