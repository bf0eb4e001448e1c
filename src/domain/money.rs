//! Monetary types.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Conversion rate from one currency into the local currency.
pub type Rate = Decimal;
