//! Domain validation errors.
//!
//! Returned by `try_new` constructors when a value would violate a domain
//! invariant, for example a quote with a non-positive price.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Prices must be positive; zero means the provider had no data.
    #[error("price for {symbol} must be positive, got {price}")]
    NonPositivePrice {
        /// Symbol the price was quoted for.
        symbol: String,
        /// The rejected price.
        price: Decimal,
    },

    /// Symbols are written as `BASE/QUOTE`.
    #[error("invalid symbol `{0}`, expected BASE/QUOTE")]
    InvalidSymbol(String),

    /// Recipient identifiers cannot be blank.
    #[error("recipient id cannot be empty")]
    EmptyRecipientId,

    /// Recipient identifiers are single-line printable text.
    #[error("recipient id `{0}` contains control characters")]
    InvalidRecipientId(String),
}
