use serde::{Deserialize, Serialize};

use crate::address::is_evm_address;
use crate::intent::{default_token, deserialize_amount, deserialize_interval};

/// Every `type` tag an [`AgentAction`] can carry.
pub const ACTION_TYPES: &[&str] = &[
    "create_rule",
    "check_balance",
    "list_rules",
    "cross_chain_quote",
    "help",
];

/// An operation the agent asks the front end to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentAction {
    /// Create a one-time or recurring payment rule on the vault.
    CreateRule {
        recipient: String,
        #[serde(deserialize_with = "deserialize_amount")]
        amount: f64,
        #[serde(default = "default_token")]
        token: String,
        #[serde(default, deserialize_with = "deserialize_interval")]
        interval: u64,
        #[serde(default)]
        description: String,
    },
    CheckBalance,
    ListRules,
    /// Quote a bridge deposit from another chain into the vault.
    CrossChainQuote {
        #[serde(rename = "fromChain")]
        from_chain: String,
        #[serde(deserialize_with = "deserialize_amount")]
        amount: f64,
    },
    Help,
}

impl AgentAction {
    /// The wire `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            AgentAction::CreateRule { .. } => "create_rule",
            AgentAction::CheckBalance => "check_balance",
            AgentAction::ListRules => "list_rules",
            AgentAction::CrossChainQuote { .. } => "cross_chain_quote",
            AgentAction::Help => "help",
        }
    }

    /// Recipient of a `create_rule` action.
    pub fn recipient(&self) -> Option<&str> {
        match self {
            AgentAction::CreateRule { recipient, .. } => Some(recipient),
            _ => None,
        }
    }

    /// False only for a `create_rule` whose recipient is not a raw address.
    pub fn has_valid_recipient(&self) -> bool {
        self.recipient().is_none_or(is_evm_address)
    }
}

/// One agent turn: text for the user plus an optional action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub message: String,
    pub action: Option<AgentAction>,
}

impl AgentResponse {
    /// A conversational reply with no action.
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(message: impl Into<String>, action: AgentAction) -> Self {
        Self {
            message: message.into(),
            action: Some(action),
        }
    }
}
