use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marketpulse::domain::{Headline, Quote, Symbol};
use marketpulse::error::{Result, UpstreamError};
use marketpulse::port::outbound::market::{NewsSource, QuoteSource, Translator};
use rust_decimal::Decimal;

/// Quote source answering from a mutable price table.
///
/// Symbols without a price fail with a rate-limit error, the way the quote
/// provider answers once the daily credits are spent.
#[derive(Clone, Default)]
pub struct ScriptedQuotes {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.set_price(symbol, price);
        self
    }

    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .lock()
            .expect("lock prices")
            .insert(symbol.to_string(), price);
    }

    pub fn remove(&self, symbol: &str) {
        self.prices.lock().expect("lock prices").remove(symbol);
    }

    pub fn calls_for(&self, symbol: &str) -> usize {
        self.calls
            .lock()
            .expect("lock calls")
            .iter()
            .filter(|s| *s == symbol)
            .count()
    }
}

#[async_trait]
impl QuoteSource for ScriptedQuotes {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote> {
        self.calls
            .lock()
            .expect("lock calls")
            .push(symbol.to_string());
        let price = self
            .prices
            .lock()
            .expect("lock prices")
            .get(symbol.as_str())
            .copied();
        match price {
            Some(price) => Ok(Quote::try_new(symbol.clone(), price, Some(Decimal::ONE))?),
            None => Err(UpstreamError::RateLimited {
                provider: "scripted",
            }
            .into()),
        }
    }
}

/// News source returning a fixed list, or failing when empty-handed.
#[derive(Clone, Default)]
pub struct ScriptedNews {
    headlines: Option<Vec<Headline>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedNews {
    pub fn with(titles: &[&str]) -> Self {
        Self {
            headlines: Some(
                titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| Headline::new(*t, format!("https://news.example/{i}")))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for ScriptedNews {
    async fn fetch_headlines(&self, limit: usize) -> Result<Vec<Headline>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.headlines {
            Some(headlines) => Ok(headlines.iter().take(limit).cloned().collect()),
            None => Err(UpstreamError::Unavailable {
                provider: "scripted-news",
                reason: "connection refused".into(),
            }
            .into()),
        }
    }
}

/// Translator that prefixes titles, fails for titles containing `fail`
/// and answers with an HTML page for titles containing `html`.
#[derive(Clone, Default)]
pub struct PrefixTranslator;

#[async_trait]
impl Translator for PrefixTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        if text.contains("fail") {
            return Err(UpstreamError::Unavailable {
                provider: "scripted-translator",
                reason: "quota".into(),
            }
            .into());
        }
        if text.contains("html") {
            return Ok("<!DOCTYPE html><html><body>Sign in</body></html>".into());
        }
        Ok(format!("VI: {text}"))
    }
}
