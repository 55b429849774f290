//! EVM address checks.

use std::sync::LazyLock;

use regex::Regex;

/// `0x` followed by exactly 40 hex digits. Checksum casing is not verified.
static RE_EVM_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap());

/// Whether `s` is a 42-character `0x`-prefixed hexadecimal address.
///
/// ENS names (`alice.eth`) and anything with surrounding whitespace fail.
pub fn is_evm_address(s: &str) -> bool {
    RE_EVM_ADDRESS.is_match(s)
}
