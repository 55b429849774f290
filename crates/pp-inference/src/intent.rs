//! Single payment-intent parser.
//!
//! One completion call per message, brace-span extraction, and no field
//! validation: whatever JSON object the model produced is handed back.

use std::sync::Arc;

use pp_protocol::{IntentPayload, ParseError};

use crate::completion::{CompletionClient, CompletionRequest};
use crate::error::InferenceError;
use crate::extract::extract_json;
use crate::prompt::PromptTemplate;

pub const INTENT_TEMPERATURE: f64 = 0.1;
pub const INTENT_MAX_TOKENS: u32 = 200;

pub const MSG_SERVICE_ERROR: &str = "AI service error. Please try again in a moment.";
pub const MSG_NO_JSON: &str = "Failed to parse the AI response";
pub const MSG_MALFORMED_JSON: &str = "The AI response was not valid JSON";

pub struct IntentParser {
    client: Arc<dyn CompletionClient>,
    system_prompt: String,
    prompt_version: &'static str,
}

impl IntentParser {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::with_template(client, &PromptTemplate::intent_v1())
    }

    pub fn with_template(client: Arc<dyn CompletionClient>, template: &PromptTemplate) -> Self {
        Self {
            client,
            system_prompt: template.render(),
            prompt_version: template.version,
        }
    }

    pub fn prompt_version(&self) -> &'static str {
        self.prompt_version
    }

    /// Parse `message` into a payment intent payload.
    ///
    /// Every failure, including transport errors, comes back as a `ParseError`.
    pub async fn parse(&self, message: &str) -> Result<IntentPayload, ParseError> {
        let request = CompletionRequest {
            system: self.system_prompt.clone(),
            user: message.to_string(),
            temperature: INTENT_TEMPERATURE,
            max_tokens: INTENT_MAX_TOKENS,
        };

        match self.client.complete(&request).await {
            Ok(raw) => self.interpret_completion(&raw),
            Err(e) => {
                tracing::warn!(client = self.client.name(), error = %e, "intent completion failed");
                Err(to_parse_error(&InferenceError::Transport(e)))
            }
        }
    }

    /// Extract the payload from raw model output. Pure; no I/O.
    pub fn interpret_completion(&self, raw: &str) -> Result<IntentPayload, ParseError> {
        tracing::debug!(prompt = self.prompt_version, raw = %raw, "intent raw completion");

        match extract_json(raw) {
            Ok(value) => {
                let payload = IntentPayload::new(value);
                tracing::info!(payload = %payload.as_value(), "intent parsed");
                Ok(payload)
            }
            Err(e) => {
                let e = InferenceError::from(e);
                tracing::warn!(error = %e, "intent extraction failed");
                Err(to_parse_error(&e))
            }
        }
    }
}

fn to_parse_error(e: &InferenceError) -> ParseError {
    let message = match e {
        InferenceError::Transport(_) => MSG_SERVICE_ERROR,
        InferenceError::NoJsonFound | InferenceError::ValidationFailed(_) => MSG_NO_JSON,
        InferenceError::MalformedJson(_) => MSG_MALFORMED_JSON,
    };
    ParseError::new(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionError;
    use crate::mock::MockCompletionClient;
    use serde_json::json;

    fn parser(mock: &Arc<MockCompletionClient>) -> IntentParser {
        IntentParser::new(mock.clone())
    }

    #[tokio::test]
    async fn parses_weekly_payment() {
        let mock = Arc::new(MockCompletionClient::replying(
            r#"{"recipient": "alice.eth", "amount": 100, "token": "USDC", "interval": 604800, "description": "Weekly payment to Alice", "confidence": 0.95}"#,
        ));
        let payload = parser(&mock)
            .parse("pay alice.eth 100 USDC every week")
            .await
            .unwrap();

        let intent = payload.typed().unwrap();
        assert_eq!(intent.recipient, "alice.eth");
        assert_eq!(intent.interval, 604_800);
        assert!((intent.confidence - 0.95).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn sends_low_temperature_bounded_request() {
        let mock = Arc::new(MockCompletionClient::replying("{}"));
        parser(&mock).parse("send bob 5").await.unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.user, "send bob 5");
        assert_eq!(req.temperature, 0.1);
        assert_eq!(req.max_tokens, 200);
        assert!(req.system.contains("payment intent parser"));
    }

    #[tokio::test]
    async fn transport_failure_is_parse_error() {
        let mock = Arc::new(MockCompletionClient::failing(CompletionError::Status {
            status: 429,
            body: "rate limited".into(),
        }));
        let err = parser(&mock).parse("pay bob").await.unwrap_err();
        assert_eq!(err.message, MSG_SERVICE_ERROR);
    }

    #[tokio::test]
    async fn no_json_is_parse_error() {
        let mock = Arc::new(MockCompletionClient::replying("I'm not sure what you mean."));
        let err = parser(&mock).parse("hmm").await.unwrap_err();
        assert_eq!(err.message, MSG_NO_JSON);
    }

    #[tokio::test]
    async fn malformed_json_is_distinct_parse_error() {
        let mock = Arc::new(MockCompletionClient::replying(r#"{"token": USDC}"#));
        let err = parser(&mock).parse("pay bob").await.unwrap_err();
        assert_eq!(err.message, MSG_MALFORMED_JSON);
        assert_ne!(MSG_MALFORMED_JSON, MSG_NO_JSON);
    }

    #[test]
    fn error_key_passes_through() {
        let mock = Arc::new(MockCompletionClient::replying(""));
        let raw = r#"{"error": "Could not understand. Please specify recipient and amount.", "confidence": 0}"#;
        let payload = parser(&mock).interpret_completion(raw).unwrap();
        assert_eq!(
            payload.into_value(),
            json!({"error": "Could not understand. Please specify recipient and amount.", "confidence": 0})
        );
    }

    #[test]
    fn missing_fields_are_not_normalized() {
        let mock = Arc::new(MockCompletionClient::replying(""));
        let payload = parser(&mock)
            .interpret_completion(r#"{"recipient": "bob.eth"}"#)
            .unwrap();
        assert_eq!(payload.as_value(), &json!({"recipient": "bob.eth"}));
        assert!(payload.typed().is_err());
    }

    #[test]
    fn uses_template_version() {
        let mock = Arc::new(MockCompletionClient::replying(""));
        assert_eq!(parser(&mock).prompt_version(), "intent-v1");
    }
}
