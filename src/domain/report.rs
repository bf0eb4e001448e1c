//! Market report with builder.
//!
//! A [`Report`] is assembled once per aggregation and never mutated
//! afterwards. Derived local-currency values are computed by
//! [`ReportBuilder::build`] so they always agree with the quotes and the
//! rate they came from.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::id::Symbol;
use super::money::Rate;
use super::quote::Quote;

/// A news headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Local-currency conversion rate used for derived values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalRate {
    /// Pair the rate was quoted for, e.g. `USD/VND`.
    pub pair: Symbol,
    pub value: Rate,
    /// True when the rate is a last-known value reused after a failed refresh.
    pub stale: bool,
}

/// Whether the report carries market data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
    Available,
    /// The anchor quote could not be obtained; no figures are included.
    Unavailable { reason: String },
}

/// An assembled market report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    generated_at: DateTime<Utc>,
    status: ReportStatus,
    anchor: Symbol,
    headlines: Vec<Headline>,
    quotes: BTreeMap<Symbol, Quote>,
    rate: Option<LocalRate>,
    derived_values: BTreeMap<Symbol, Decimal>,
}

impl Report {
    /// Start building an available report around the anchor quote.
    pub fn builder(generated_at: DateTime<Utc>, anchor: Quote) -> ReportBuilder {
        ReportBuilder::new(generated_at, anchor)
    }

    /// A degraded report: no headlines, quotes or derived values.
    pub fn unavailable(
        generated_at: DateTime<Utc>,
        anchor: Symbol,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            generated_at,
            status: ReportStatus::Unavailable {
                reason: reason.into(),
            },
            anchor,
            headlines: Vec::new(),
            quotes: BTreeMap::new(),
            rate: None,
            derived_values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub fn status(&self) -> &ReportStatus {
        &self.status
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.status, ReportStatus::Available)
    }

    #[must_use]
    pub fn anchor(&self) -> &Symbol {
        &self.anchor
    }

    /// The anchor quote, present on every available report.
    #[must_use]
    pub fn anchor_quote(&self) -> Option<&Quote> {
        self.quotes.get(&self.anchor)
    }

    #[must_use]
    pub fn headlines(&self) -> &[Headline] {
        &self.headlines
    }

    #[must_use]
    pub fn quotes(&self) -> &BTreeMap<Symbol, Quote> {
        &self.quotes
    }

    #[must_use]
    pub fn quote(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    #[must_use]
    pub fn rate(&self) -> Option<&LocalRate> {
        self.rate.as_ref()
    }

    #[must_use]
    pub fn derived_values(&self) -> &BTreeMap<Symbol, Decimal> {
        &self.derived_values
    }

    #[must_use]
    pub fn derived_value(&self, symbol: &Symbol) -> Option<Decimal> {
        self.derived_values.get(symbol).copied()
    }
}

/// Builder for available reports.
#[derive(Debug)]
pub struct ReportBuilder {
    generated_at: DateTime<Utc>,
    anchor: Symbol,
    quotes: BTreeMap<Symbol, Quote>,
    headlines: Vec<Headline>,
    rate: Option<LocalRate>,
}

impl ReportBuilder {
    fn new(generated_at: DateTime<Utc>, anchor: Quote) -> Self {
        let symbol = anchor.symbol().clone();
        let mut quotes = BTreeMap::new();
        quotes.insert(symbol.clone(), anchor);
        Self {
            generated_at,
            anchor: symbol,
            quotes,
            headlines: Vec::new(),
            rate: None,
        }
    }

    /// Add a secondary quote. The anchor quote is never replaced.
    pub fn quote(mut self, quote: Quote) -> Self {
        if quote.symbol() != &self.anchor {
            self.quotes.insert(quote.symbol().clone(), quote);
        }
        self
    }

    pub fn headlines(mut self, headlines: Vec<Headline>) -> Self {
        self.headlines = headlines;
        self
    }

    pub fn rate(mut self, rate: LocalRate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Build the report, deriving local-currency values.
    ///
    /// A quote gets a derived value when it is priced in the rate's base
    /// currency: with `USD/VND`, `XAU/USD` converts and `XAU/EUR` does not.
    /// The rate pair itself maps to the rate (one unit of base). A product
    /// that does not fit in a `Decimal` is left out.
    pub fn build(self) -> Report {
        let mut derived_values = BTreeMap::new();
        if let Some(rate) = &self.rate {
            derived_values.insert(rate.pair.clone(), rate.value);
            for quote in self.quotes.values() {
                if quote.symbol().quote_currency() != rate.pair.base() {
                    continue;
                }
                match quote.price().checked_mul(rate.value) {
                    Some(local) => {
                        derived_values.insert(quote.symbol().clone(), local);
                    }
                    None => warn!(
                        symbol = %quote.symbol(),
                        price = %quote.price(),
                        rate = %rate.value,
                        "Local value out of range, omitting"
                    ),
                }
            }
        }

        Report {
            generated_at: self.generated_at,
            status: ReportStatus::Available,
            anchor: self.anchor,
            headlines: self.headlines,
            quotes: self.quotes,
            rate: self.rate,
            derived_values,
        }
    }
}
