use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::interval::interval_label;

/// Token assumed when the user does not name one.
pub const DEFAULT_TOKEN: &str = "USDC";

pub(crate) fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

/// Deserialize an amount given either as a JSON number or a numeric string.
///
/// Models occasionally quote numbers (`"amount": "50"`).
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid amount: {s:?}"))),
    }
}

/// Deserialize an interval in seconds given as an integer, a whole float
/// (`604800.0`) or a numeric string (`"604800"`).
///
/// Negative and fractional values are rejected.
pub fn deserialize_interval<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Interval {
        Whole(u64),
        Number(f64),
        Text(String),
    }

    fn whole_seconds(n: f64) -> Option<u64> {
        let whole = n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64;
        whole.then_some(n as u64)
    }

    let secs = match Interval::deserialize(deserializer)? {
        Interval::Whole(n) => Some(n),
        Interval::Number(n) => whole_seconds(n),
        Interval::Text(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_seconds))
        }
    };
    secs.ok_or_else(|| de::Error::custom("interval must be whole non-negative seconds"))
}

/// One parsed payment instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Ethereum address or ENS-style name.
    pub recipient: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default = "default_token")]
    pub token: String,
    /// Seconds between payments; 0 means one-time.
    #[serde(default, deserialize_with = "deserialize_interval")]
    pub interval: u64,
    #[serde(default)]
    pub description: String,
    /// Model confidence, 0.0 - 1.0.
    #[serde(default)]
    pub confidence: f64,
}

impl PaymentIntent {
    pub fn is_recurring(&self) -> bool {
        self.interval > 0
    }

    pub fn interval_label(&self) -> Option<&'static str> {
        interval_label(self.interval)
    }
}

/// The JSON object the intent parser extracted, passed through verbatim.
///
/// Nothing about its fields is guaranteed beyond being valid JSON. A model
/// reply of `{"error": "...", "confidence": 0}` is a payload like any other;
/// use [`IntentPayload::typed`] to view it as a [`PaymentIntent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentPayload(serde_json::Value);

impl IntentPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Decode the payload as a [`PaymentIntent`].
    pub fn typed(&self) -> Result<PaymentIntent, serde_json::Error> {
        PaymentIntent::deserialize(&self.0)
    }

    /// The model's own `error` string, if it replied with one.
    pub fn error_reply(&self) -> Option<&str> {
        self.0.get("error").and_then(|v| v.as_str())
    }
}

/// Failure to get a usable intent out of a message.
///
/// Serializes as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    #[serde(rename = "error")]
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
