//! EVM account address with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AgoraError;

/// A 20-byte EVM address, stored lowercase with its `0x` prefix.
///
/// Subgraph entity ids for delegates and token holders are addresses in this
/// form, so normalizing on construction lets ids compare byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The standard prefix for hex-encoded addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of raw bytes in an address.
    pub const LEN: usize = 20;

    /// Parse and normalize an address string.
    pub fn parse(raw: &str) -> Result<Self, AgoraError> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix(Self::PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AgoraError::InvalidAddress(raw.to_string()))?;
        let bytes = hex::decode(body).map_err(|_| AgoraError::InvalidAddress(raw.to_string()))?;
        if bytes.len() != Self::LEN {
            return Err(AgoraError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(format!("{}{}", Self::PREFIX, hex::encode(bytes))))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = AgoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AgoraError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        let addr = Address::parse("0xABCDEFabcdef0123456789012345678901234567").unwrap();
        assert_eq!(addr.as_str(), "0xabcdefabcdef0123456789012345678901234567");
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert!(Address::parse("abcdefabcdef0123456789012345678901234567").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(Address::parse("0x1234").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(Address::parse("0xzzcdefabcdef0123456789012345678901234567").is_err());
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let addr = Address::parse("0x000000000000000000000000000000000000dead").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x000000000000000000000000000000000000dead\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
