//! Backend configuration.
//!
//! Resolved once at startup, from a TOML file when `PAYPILOT_CONFIG` names
//! one, otherwise from environment variables.

use serde::Deserialize;

use pp_inference::{OpenAiConfig, RecipientPolicy};

use crate::bridge::LifiConfig;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Chat-completion API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub agent: AgentSettings,
    /// Bridge quote service settings.
    #[serde(default)]
    pub bridge: LifiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentSettings {
    /// Require 0x addresses for `create_rule` recipients.
    #[serde(default)]
    pub strict_recipient: bool,
}

impl AgentSettings {
    pub fn policy(&self) -> RecipientPolicy {
        if self.strict_recipient {
            RecipientPolicy::Strict
        } else {
            RecipientPolicy::Lenient
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port,
            cors_origins,
            openai: OpenAiConfig::from_env(),
            agent: AgentSettings {
                strict_recipient: env_flag("AGENT_STRICT_RECIPIENT"),
            },
            bridge: LifiConfig::from_env(),
        }
    }

    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// File named by `PAYPILOT_CONFIG` if set, else environment.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("PAYPILOT_CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::from_env()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            openai: OpenAiConfig::default(),
            agent: AgentSettings::default(),
            bridge: LifiConfig::default(),
        }
    }
}
