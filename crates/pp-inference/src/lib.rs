//! Natural-language translation for PayPilot.
//!
//! Turns free text into one of two outputs via a hosted chat-completion model:
//! - **Intent parser**: a single payment instruction used to pre-fill a form.
//! - **Agent**: a chat reply plus an optional action from a closed set
//!   (create_rule, check_balance, list_rules, cross_chain_quote, help).
//!
//! Both share the same brace-span JSON extraction. Every failure is turned
//! into a caller-safe value; nothing here returns a raw transport error.

pub mod agent;
pub mod completion;
pub mod error;
pub mod extract;
pub mod intent;
pub mod mock;
pub mod openai;
pub mod prompt;

pub use agent::{Agent, RecipientPolicy};
pub use completion::{CompletionClient, CompletionError, CompletionRequest};
pub use error::{InferenceError, InferenceResult};
pub use extract::{ExtractionError, extract_json};
pub use intent::IntentParser;
pub use mock::MockCompletionClient;
pub use openai::{OpenAiClient, OpenAiConfig};
pub use prompt::{PromptExample, PromptTemplate};
