//! Identifier newtypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Market symbol in `BASE/QUOTE` form, e.g. `XAU/USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse a symbol, normalising to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSymbol`] unless the input has exactly one
    /// `/` with non-empty sides.
    pub fn try_new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref().trim();
        match raw.split_once('/') {
            Some((base, quote))
                if !base.is_empty() && !quote.is_empty() && !quote.contains('/') =>
            {
                Ok(Self(raw.to_ascii_uppercase()))
            }
            _ => Err(DomainError::InvalidSymbol(raw.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The currency or asset being priced (`XAU` in `XAU/USD`).
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(b, _)| b)
    }

    /// The currency the price is expressed in (`USD` in `XAU/USD`).
    #[must_use]
    pub fn quote_currency(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, q)| q)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Opaque subscriber identifier.
///
/// Telegram chats are numeric, but the registry treats ids as strings so
/// other channels can be plugged in without a schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipientId(String);

impl RecipientId {
    /// Create an id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyRecipientId`] for blank input and
    /// [`DomainError::InvalidRecipientId`] when the id contains control
    /// characters such as tabs or newlines.
    pub fn try_new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(DomainError::EmptyRecipientId);
        }
        if raw.chars().any(char::is_control) {
            return Err(DomainError::InvalidRecipientId(raw.escape_debug().to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form of the id, if it has one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<i64> for RecipientId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipientId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl TryFrom<String> for RecipientId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RecipientId> for String {
    fn from(id: RecipientId) -> Self {
        id.0
    }
}
