//! Payment intent parsing endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;

use super::MessageRequest;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/parse: turn a message into a payment intent.
///
/// Responds 200 with the extracted object on success and 200 with
/// `{"error": "..."}` when the parser could not produce one.
pub async fn parse_intent(
    State(state): State<AppState>,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;
    let message = req.require_message()?;
    tracing::info!(message = %message, "parsing payment intent");

    let body = match state.parser.parse(&message).await {
        Ok(payload) => payload.into_value(),
        Err(e) => serde_json::to_value(&e).map_err(|e| ApiError::Internal(e.to_string()))?,
    };

    tracing::info!(result = %body, "parse result");
    Ok(Json(body))
}
