//! Versioned system-instruction templates.
//!
//! A template is a preamble, a list of labelled example payloads and a
//! footer. Examples are kept as JSON values so tests and mock completions can
//! reuse exactly what the model was shown.

use serde_json::{Value, json};

use pp_protocol::{CANONICAL_INTERVALS, chain_names};

/// One few-shot example.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptExample {
    /// Heading shown to the model.
    pub label: &'static str,
    /// The `AgentAction` tag this example demonstrates, if any.
    pub action_type: Option<&'static str>,
    pub payload: Value,
    /// Extra guidance printed under the payload.
    pub note: Option<String>,
}

impl PromptExample {
    fn new(label: &'static str, payload: Value) -> Self {
        Self {
            label,
            action_type: None,
            payload,
            note: None,
        }
    }

    fn for_action(mut self, action_type: &'static str) -> Self {
        self.action_type = Some(action_type);
        self
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub version: &'static str,
    pub preamble: String,
    pub examples: Vec<PromptExample>,
    pub footer: String,
}

/// `0 = one-time, 60 = every minute, ...`
pub fn interval_table() -> String {
    CANONICAL_INTERVALS
        .iter()
        .map(|(secs, label)| format!("{secs} = {label}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl PromptTemplate {
    /// Render the full system instruction.
    pub fn render(&self) -> String {
        let mut out = self.preamble.trim_end().to_string();
        for (i, example) in self.examples.iter().enumerate() {
            out.push_str(&format!("\n\n{}. {}:\n{}", i + 1, example.label, example.payload));
            if let Some(note) = &example.note {
                out.push_str("\n\n");
                out.push_str(note);
            }
        }
        if !self.footer.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.footer);
        }
        out
    }

    pub fn example(&self, label: &str) -> Option<&PromptExample> {
        self.examples.iter().find(|e| e.label == label)
    }

    /// The example payload shown for an action tag.
    pub fn example_for(&self, action_type: &str) -> Option<&Value> {
        self.examples
            .iter()
            .find(|e| e.action_type == Some(action_type))
            .map(|e| &e.payload)
    }

    /// Single-intent parser instruction.
    pub fn intent_v1() -> Self {
        let intervals = CANONICAL_INTERVALS
            .iter()
            .map(|(secs, label)| format!("- {label} = {secs}"))
            .collect::<Vec<_>>()
            .join("\n");

        let preamble = format!(
            "You are a payment intent parser for PayPilot, a crypto payment automation app.

Parse the user's message into structured payment data. Extract:
- recipient: Ethereum address or ENS name (like alice.eth)
- amount: numeric value
- token: the token mentioned (USDC, ETH, BTC); default to USDC if not specified
- interval: payment frequency in seconds (0 = one-time)
- description: a brief description of the payment
- confidence: how sure you are, from 0.0 to 1.0

Interval values:
{intervals}

Respond ONLY with valid JSON, no other text."
        );

        Self {
            version: "intent-v1",
            preamble,
            examples: vec![
                PromptExample::new(
                    "A parsed payment",
                    json!({
                        "recipient": "alice.eth",
                        "amount": 100,
                        "token": "USDC",
                        "interval": 604800,
                        "description": "Weekly payment to Alice",
                        "confidence": 0.95
                    }),
                ),
                PromptExample::new(
                    "A message you cannot parse",
                    json!({
                        "error": "Could not understand. Please specify recipient and amount.",
                        "confidence": 0
                    }),
                ),
            ],
            footer: String::new(),
        }
    }

    /// Conversational agent instruction with one example per action.
    pub fn agent_v1() -> Self {
        let preamble = "You are PayPilot, an AI-powered crypto payment assistant. You help users manage their payment vault through natural conversation.

You can help users with:
1. Creating payment rules (one-time or recurring payments)
2. Checking their vault balance
3. Listing their active payment rules
4. Getting cross-chain deposit quotes (bridge from other chains)
5. General questions about how PayPilot works

Always respond with a JSON object containing:
- \"message\": a friendly response to show the user
- \"action\": the action to perform, or null for plain conversation

Examples:"
            .to_string();

        let help = "Here's what I can do for you:\n\n\
• Create payments: 'Pay vitalik.eth 100 USDC weekly'\n\
• Check balance: 'What's my balance?'\n\
• List rules: 'Show my payment rules'\n\
• Bridge funds: 'Bridge 50 USDC from Arbitrum'\n\n\
Just tell me what you need!";

        Self {
            version: "agent-v1",
            preamble,
            examples: vec![
                PromptExample::new(
                    "Create a payment rule",
                    json!({
                        "message": "I'll set up a weekly payment of 50 USDC to vitalik.eth for you.",
                        "action": {
                            "type": "create_rule",
                            "recipient": "vitalik.eth",
                            "amount": 50,
                            "token": "USDC",
                            "interval": 604800,
                            "description": "Weekly payment to vitalik.eth"
                        }
                    }),
                )
                .for_action("create_rule")
                .with_note(format!(
                    "Intervals (seconds): {}. Use 60 only for testing.",
                    interval_table()
                )),
                PromptExample::new(
                    "Check balance",
                    json!({
                        "message": "Let me check your vault balance.",
                        "action": {"type": "check_balance"}
                    }),
                )
                .for_action("check_balance"),
                PromptExample::new(
                    "List rules",
                    json!({
                        "message": "Here are your active payment rules.",
                        "action": {"type": "list_rules"}
                    }),
                )
                .for_action("list_rules"),
                PromptExample::new(
                    "Cross-chain quote",
                    json!({
                        "message": "I'll get you a quote to bridge from Arbitrum.",
                        "action": {"type": "cross_chain_quote", "fromChain": "arbitrum", "amount": 100}
                    }),
                )
                .for_action("cross_chain_quote")
                .with_note(format!("Chain names: {}", chain_names())),
                PromptExample::new(
                    "Just conversation (no action needed)",
                    json!({
                        "message": "PayPilot is your AI-powered payment assistant! I can help you set up automatic payments, check balances, and bridge funds from other chains.",
                        "action": null
                    }),
                ),
                PromptExample::new(
                    "Help",
                    json!({"message": help, "action": {"type": "help"}}),
                )
                .for_action("help"),
            ],
            footer: "Always respond with valid JSON only. Be friendly and concise.".into(),
        }
    }
}
