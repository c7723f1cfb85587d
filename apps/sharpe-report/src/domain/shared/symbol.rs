//! Symbol value object for instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticker symbol (equity or index).
///
/// Examples:
/// - Equity: "AAPL", "MSFT"
/// - Index: "^GSPC", "^IXIC"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol.
    ///
    /// The symbol is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is an index symbol (Yahoo `^` prefix convention).
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.0.starts_with('^')
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_normalizes_to_uppercase() {
        let symbol = Symbol::new(" aapl ");
        assert_eq!(symbol.as_str(), "AAPL");
    }

    #[test]
    fn index_symbol_detection() {
        assert!(Symbol::new("^GSPC").is_index());
        assert!(!Symbol::new("AAPL").is_index());
    }

    #[test]
    fn symbol_display_and_conversions() {
        let symbol: Symbol = "msft".into();
        assert_eq!(symbol.to_string(), "MSFT");
        assert_eq!(Symbol::from(String::from("spy")).as_ref(), "SPY");
    }

    #[test]
    fn symbol_serde_is_transparent() {
        let symbol = Symbol::new("^GSPC");
        let json = serde_json::to_string(&symbol).unwrap_or_default();
        assert_eq!(json, "\"^GSPC\"");
    }
}
