//! Market quotes.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::id::Symbol;
use super::money::Price;

/// A validated market quote.
///
/// Providers report missing data as a zero price, so construction rejects
/// non-positive prices instead of carrying a fake zero through the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    symbol: Symbol,
    price: Price,
    percent_change: Option<Decimal>,
}

impl Quote {
    /// Build a quote.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositivePrice`] when `price <= 0`.
    pub fn try_new(
        symbol: Symbol,
        price: Price,
        percent_change: Option<Decimal>,
    ) -> Result<Self, DomainError> {
        if price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice {
                symbol: symbol.to_string(),
                price,
            });
        }
        Ok(Self {
            symbol,
            price,
            percent_change,
        })
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn percent_change(&self) -> Option<Decimal> {
        self.percent_change
    }
}
