// ── EUI-64 identity type ──
//
// Devices and gateways are keyed by 64-bit extended unique identifiers,
// written as 16 hex digits. Normalized to lowercase on construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A 64-bit extended unique identifier (device EUI or gateway ID),
/// normalized to 16 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Eui64(String);

impl Eui64 {
    /// Parse an EUI from hex input. Accepts colon- or dash-separated
    /// groups and an optional `0x` prefix.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let cleaned: String = raw
            .trim()
            .trim_start_matches("0x")
            .chars()
            .filter(|c| *c != ':' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        if cleaned.len() != 16 || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::validation(format!(
                "'{raw}' is not a valid EUI-64 (expected 16 hex digits)"
            )));
        }
        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Eui64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Eui64 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Eui64 {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Eui64> for String {
    fn from(eui: Eui64) -> Self {
        eui.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_separators() {
        let eui = Eui64::parse("AA-11-BB-22-CC-33-DD-44").unwrap();
        assert_eq!(eui.as_str(), "aa11bb22cc33dd44");

        let eui = Eui64::parse("0xAA11BB22CC33DD44").unwrap();
        assert_eq!(eui.as_str(), "aa11bb22cc33dd44");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(Eui64::parse("aa11bb22").is_err());
        assert!(Eui64::parse("").is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!(Eui64::parse("gg11bb22cc33dd44").is_err());
    }
}
