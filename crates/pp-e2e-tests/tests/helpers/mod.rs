//! Shared test harness for E2E integration tests.
//!
//! Wires the real `OpenAiClient` to a wiremock completion server and serves
//! the full router through `tower::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pp_api::bridge::MockQuoteService;
use pp_api::routes::build_router;
use pp_api::state::AppState;
use pp_inference::{OpenAiClient, OpenAiConfig, RecipientPolicy};

pub const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

/// End-to-end harness: router + mock completion server.
pub struct TestHarness {
    pub server: MockServer,
    pub router: Router,
}

/// OpenAI chat-completion body wrapping `content`.
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-e2e",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

impl TestHarness {
    /// Start a mock server and build the router against it.
    pub async fn start(policy: RecipientPolicy) -> Self {
        let server = MockServer::start().await;
        let client = OpenAiClient::new(OpenAiConfig {
            api_key: "sk-e2e".into(),
            base_url: server.uri(),
            model: "gpt-4o-mini".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let state = AppState::new(Arc::new(client), policy, Arc::new(MockQuoteService::new()));
        Self {
            server,
            router: build_router(state),
        }
    }

    /// Every completion call returns `content`.
    pub async fn model_says(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .mount(&self.server)
            .await;
    }

    /// Every completion call fails with `status`.
    pub async fn model_fails(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream error"))
            .mount(&self.server)
            .await;
    }

    /// Completion calls outlive the client timeout.
    pub async fn model_hangs(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("{}"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&self.server)
            .await;
    }

    /// POST a JSON body and return status + decoded JSON.
    pub async fn post(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn parse(&self, message: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/parse", serde_json::json!({"message": message}))
            .await
    }

    pub async fn agent(&self, message: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/agent", serde_json::json!({"message": message}))
            .await
    }

    /// Number of requests the completion server received.
    pub async fn completion_calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}
