//! Market data ports: quotes, news and headline translation.

use async_trait::async_trait;

use crate::domain::{Headline, Quote, Symbol};
use crate::error::Result;

/// Source of market quotes.
///
/// Implementations must return an error rather than a quote when the
/// provider reports no price; [`Quote`] cannot hold a non-positive price.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, rate limits, malformed
    /// payloads or missing prices.
    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote>;
}

/// Source of news headlines, in feed order.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch at most `limit` headlines, preserving feed order.
    ///
    /// # Errors
    ///
    /// Returns an error when the feed cannot be fetched or parsed.
    async fn fetch_headlines(&self, limit: usize) -> Result<Vec<Headline>>;
}

/// Headline translation.
///
/// Callers treat translation as best-effort and fall back to the original
/// text on error.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text`.
    ///
    /// # Errors
    ///
    /// Returns an error when the service fails or answers with something
    /// that is not a translation.
    async fn translate(&self, text: &str) -> Result<String>;
}
