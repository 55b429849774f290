//! Conversational agent: one reply message plus an optional action.
//!
//! Stateless. Each call sends the fixed instruction and the user's message,
//! then decodes `{"message": ..., "action": ...}` from the reply. It never
//! fails: errors become a fallback message with no action.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pp_protocol::{AgentAction, AgentResponse, is_canonical_interval};

use crate::completion::{CompletionClient, CompletionRequest};
use crate::error::{InferenceError, InferenceResult};
use crate::extract::extract_json;
use crate::prompt::PromptTemplate;

pub const AGENT_TEMPERATURE: f64 = 0.3;
pub const AGENT_MAX_TOKENS: u32 = 500;

pub const MSG_DEFAULT: &str = "I'm here to help!";
pub const MSG_NOT_UNDERSTOOD: &str = "I didn't quite understand that. Could you rephrase?";
pub const MSG_SERVICE_ERROR: &str = "Sorry, I encountered an error. Please try again.";
pub const MSG_NEED_ADDRESS: &str = "To set up that payment I need the recipient's full wallet address (0x followed by 40 hex characters). Could you share it?";

/// How `create_rule` recipients are checked before the action is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientPolicy {
    /// Accept whatever the model produced, ENS names included.
    #[default]
    Lenient,
    /// Require a 0x address; otherwise drop the action and ask for one.
    Strict,
}

pub struct Agent {
    client: Arc<dyn CompletionClient>,
    system_prompt: String,
    prompt_version: &'static str,
    policy: RecipientPolicy,
}

impl Agent {
    pub fn new(client: Arc<dyn CompletionClient>, policy: RecipientPolicy) -> Self {
        Self::with_template(client, &PromptTemplate::agent_v1(), policy)
    }

    pub fn with_template(
        client: Arc<dyn CompletionClient>,
        template: &PromptTemplate,
        policy: RecipientPolicy,
    ) -> Self {
        Self {
            client,
            system_prompt: template.render(),
            prompt_version: template.version,
            policy,
        }
    }

    pub fn policy(&self) -> RecipientPolicy {
        self.policy
    }

    /// Answer one user message.
    pub async fn converse(&self, message: &str) -> AgentResponse {
        let request = CompletionRequest {
            system: self.system_prompt.clone(),
            user: message.to_string(),
            temperature: AGENT_TEMPERATURE,
            max_tokens: AGENT_MAX_TOKENS,
        };

        match self.client.complete(&request).await {
            Ok(raw) => self.interpret_completion(&raw),
            Err(e) => fallback(&InferenceError::Transport(e)),
        }
    }

    /// Turn raw model output into a response. Pure; no I/O.
    pub fn interpret_completion(&self, raw: &str) -> AgentResponse {
        tracing::debug!(prompt = self.prompt_version, raw = %raw, "agent raw completion");

        match self.decode(raw) {
            Ok(response) => {
                tracing::info!(
                    action = ?response.action.as_ref().map(AgentAction::type_name),
                    "agent replied"
                );
                response
            }
            Err(e) => fallback(&e),
        }
    }

    fn decode(&self, raw: &str) -> InferenceResult<AgentResponse> {
        let parsed = extract_json(raw)?;

        let message = parsed
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(MSG_DEFAULT)
            .to_string();

        let action = match parsed.get("action") {
            None | Some(Value::Null) => None,
            Some(raw_action) => match AgentAction::deserialize(raw_action) {
                Ok(action) => Some(action),
                Err(e) => {
                    tracing::warn!(error = %e, action = %raw_action, "dropping undecodable action");
                    None
                }
            },
        };

        if let Some(AgentAction::CreateRule { interval, .. }) = &action {
            if !is_canonical_interval(*interval) {
                tracing::debug!(interval, "passing through non-canonical interval");
            }
        }

        if self.policy == RecipientPolicy::Strict {
            if let Some(action) = action.as_ref().filter(|a| !a.has_valid_recipient()) {
                return Err(InferenceError::ValidationFailed(format!(
                    "recipient {:?} is not a 0x address",
                    action.recipient().unwrap_or_default()
                )));
            }
        }

        Ok(AgentResponse { message, action })
    }
}

fn fallback(e: &InferenceError) -> AgentResponse {
    tracing::warn!(error = %e, "agent falling back");
    let message = match e {
        InferenceError::Transport(_) => MSG_SERVICE_ERROR,
        InferenceError::NoJsonFound | InferenceError::MalformedJson(_) => MSG_NOT_UNDERSTOOD,
        InferenceError::ValidationFailed(_) => MSG_NEED_ADDRESS,
    };
    AgentResponse::reply(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionError;
    use crate::mock::MockCompletionClient;

    const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    fn agent(policy: RecipientPolicy) -> Agent {
        Agent::new(Arc::new(MockCompletionClient::replying("")), policy)
    }

    fn create_rule_reply(recipient: &str) -> String {
        create_rule_every(recipient, serde_json::json!(604800))
    }

    fn create_rule_every(recipient: &str, interval: Value) -> String {
        serde_json::json!({
            "message": "ok",
            "action": {
                "type": "create_rule",
                "recipient": recipient,
                "amount": 50,
                "token": "USDC",
                "interval": interval,
                "description": "Weekly payment"
            }
        })
        .to_string()
    }

    fn interval_of(resp: &AgentResponse) -> Option<u64> {
        match resp.action {
            Some(AgentAction::CreateRule { interval, .. }) => Some(interval),
            _ => None,
        }
    }

    #[tokio::test]
    async fn converse_sends_agent_request() {
        let mock = Arc::new(MockCompletionClient::replying(
            r#"{"message": "Let me check your vault balance.", "action": {"type": "check_balance"}}"#,
        ));
        let agent = Agent::new(mock.clone(), RecipientPolicy::Lenient);
        let resp = agent.converse("what's my balance?").await;

        assert_eq!(resp.message, "Let me check your vault balance.");
        assert_eq!(resp.action, Some(AgentAction::CheckBalance));

        let req = mock.last_request().unwrap();
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.max_tokens, 500);
        assert!(req.system.contains("cross_chain_quote"));
    }

    #[tokio::test]
    async fn transport_error_yields_service_message() {
        let mock = Arc::new(MockCompletionClient::failing(CompletionError::Transport(
            "connection reset".into(),
        )));
        let resp = Agent::new(mock, RecipientPolicy::Strict).converse("hi").await;
        assert_eq!(resp, AgentResponse::reply(MSG_SERVICE_ERROR));
    }

    #[test]
    fn no_json_falls_back() {
        let resp = agent(RecipientPolicy::Lenient).interpret_completion("Hello there!");
        assert_eq!(resp.message, MSG_NOT_UNDERSTOOD);
        assert!(resp.action.is_none());
    }

    #[test]
    fn malformed_json_falls_back_same_as_no_json() {
        let resp = agent(RecipientPolicy::Lenient)
            .interpret_completion(r#"{"message": "ok", "action": {"type": "help"}"#);
        assert_eq!(resp, AgentResponse::reply(MSG_NOT_UNDERSTOOD));
    }

    #[test]
    fn missing_message_uses_default() {
        let resp = agent(RecipientPolicy::Lenient)
            .interpret_completion(r#"{"action": {"type": "list_rules"}}"#);
        assert_eq!(resp.message, MSG_DEFAULT);
        assert_eq!(resp.action, Some(AgentAction::ListRules));
    }

    #[test]
    fn empty_message_uses_default() {
        let resp = agent(RecipientPolicy::Lenient)
            .interpret_completion(r#"{"message": "", "action": null}"#);
        assert_eq!(resp, AgentResponse::reply(MSG_DEFAULT));
    }

    #[test]
    fn lenient_accepts_ens_recipient() {
        let resp =
            agent(RecipientPolicy::Lenient).interpret_completion(&create_rule_reply("alice.eth"));
        assert_eq!(resp.message, "ok");
        assert_eq!(
            resp.action.as_ref().and_then(AgentAction::recipient),
            Some("alice.eth")
        );
    }

    #[test]
    fn strict_downgrades_ens_recipient() {
        let resp =
            agent(RecipientPolicy::Strict).interpret_completion(&create_rule_reply("alice.eth"));
        assert!(resp.action.is_none());
        assert_eq!(resp.message, MSG_NEED_ADDRESS);
    }

    #[test]
    fn strict_accepts_hex_recipient_unchanged() {
        let resp = agent(RecipientPolicy::Strict).interpret_completion(&create_rule_reply(VITALIK));
        assert_eq!(
            resp.action,
            Some(AgentAction::CreateRule {
                recipient: VITALIK.into(),
                amount: 50.0,
                token: "USDC".into(),
                interval: 604_800,
                description: "Weekly payment".into(),
            })
        );
    }

    #[test]
    fn strict_ignores_non_rule_actions() {
        let resp = agent(RecipientPolicy::Strict).interpret_completion(
            r#"{"message": "Bridging", "action": {"type": "cross_chain_quote", "fromChain": "base", "amount": 20}}"#,
        );
        assert_eq!(
            resp.action,
            Some(AgentAction::CrossChainQuote {
                from_chain: "base".into(),
                amount: 20.0
            })
        );
    }

    #[test]
    fn unknown_action_is_dropped_message_kept() {
        let resp = agent(RecipientPolicy::Lenient).interpret_completion(
            r#"{"message": "Sending funds now", "action": {"type": "drain_vault"}}"#,
        );
        assert_eq!(resp, AgentResponse::reply("Sending funds now"));
    }

    #[test]
    fn create_rule_without_amount_is_dropped() {
        let resp = agent(RecipientPolicy::Lenient).interpret_completion(
            r#"{"message": "ok", "action": {"type": "create_rule", "recipient": "bob.eth"}}"#,
        );
        assert!(resp.action.is_none());
    }

    #[test]
    fn interval_as_float_or_string_keeps_action() {
        let agent = agent(RecipientPolicy::Lenient);
        for interval in [serde_json::json!(604800.0), serde_json::json!("604800")] {
            let resp = agent.interpret_completion(&create_rule_every("alice.eth", interval));
            assert_eq!(resp.message, "ok");
            assert_eq!(interval_of(&resp), Some(604_800));
        }
    }

    #[test]
    fn non_canonical_interval_passes_through() {
        let resp = agent(RecipientPolicy::Lenient)
            .interpret_completion(&create_rule_every("alice.eth", serde_json::json!(1209600)));
        assert_eq!(interval_of(&resp), Some(1_209_600));
    }

    #[test]
    fn negative_or_fractional_interval_drops_action() {
        let agent = agent(RecipientPolicy::Lenient);
        for interval in [serde_json::json!(-60), serde_json::json!(1.5)] {
            let resp = agent.interpret_completion(&create_rule_every(VITALIK, interval));
            assert_eq!(resp, AgentResponse::reply("ok"));
        }
    }

    #[test]
    fn interpretation_is_repeatable() {
        let agent = agent(RecipientPolicy::Strict);
        let raw = create_rule_reply("alice.eth");
        assert_eq!(agent.interpret_completion(&raw), agent.interpret_completion(&raw));
        let raw = create_rule_reply(VITALIK);
        assert_eq!(agent.interpret_completion(&raw), agent.interpret_completion(&raw));
    }

    #[test]
    fn policy_deserializes_snake_case() {
        let p: RecipientPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(p, RecipientPolicy::Strict);
        assert_eq!(RecipientPolicy::default(), RecipientPolicy::Lenient);
    }
}
