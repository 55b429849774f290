//! API route definitions and router builder.

pub mod agent;
pub mod bridge;
pub mod health;
pub mod parse;

use axum::Router;
use axum::http::{HeaderValue, Uri};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body shared by `/api/parse` and `/api/agent`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageRequest {
    /// The message, or 400 when it is absent or blank.
    pub fn require_message(self) -> ApiResult<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("A message is required".into()))
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {uri}"))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Build the Axum router with all routes and middleware, allowing any origin.
pub fn build_router(state: AppState) -> Router {
    build_router_with_origins(state, &[])
}

/// Build the router restricted to the given CORS origins (empty = any).
pub fn build_router_with_origins(state: AppState, origins: &[String]) -> Router {
    let api = Router::new()
        .route("/parse", post(parse::parse_intent))
        .route("/agent", post(agent::converse))
        .route("/quote", post(bridge::get_quote))
        .route("/chains", get(bridge::list_chains));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(origins))
        .with_state(state)
}
