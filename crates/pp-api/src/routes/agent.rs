//! Conversational agent endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use pp_protocol::AgentResponse;

use super::MessageRequest;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/agent: one chat turn. Always 200 once the message is present.
pub async fn converse(
    State(state): State<AppState>,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> ApiResult<Json<AgentResponse>> {
    let Json(req) = body?;
    let message = req.require_message()?;
    tracing::info!(message = %message, "agent message");

    let response = state.agent.converse(&message).await;
    Ok(Json(response))
}
