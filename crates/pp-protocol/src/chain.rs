//! Chain vocabulary shared by the agent prompt and the bridge quote relay.

use serde::Serialize;

/// Sepolia testnet, where the payment vault lives.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// USDC token contract on Sepolia (quote destination).
pub const SEPOLIA_USDC: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";

/// A source chain funds can be bridged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    /// Lowercase name used in prompts and agent actions.
    pub name: &'static str,
    /// EVM chain ID.
    pub id: u64,
}

pub const SOURCE_CHAINS: &[Chain] = &[
    Chain { name: "arbitrum", id: 42_161 },
    Chain { name: "base", id: 8_453 },
    Chain { name: "optimism", id: 10 },
    Chain { name: "polygon", id: 137 },
    Chain { name: "bsc", id: 56 },
    Chain { name: "avalanche", id: 43_114 },
];

/// Look up a source chain by name, ignoring case and surrounding whitespace.
pub fn chain_by_name(name: &str) -> Option<&'static Chain> {
    let name = name.trim();
    SOURCE_CHAINS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Comma-separated chain names, as listed in prompts.
pub fn chain_names() -> String {
    SOURCE_CHAINS
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}
