//! Market report assembly.
//!
//! [`MarketAggregator`] pulls quotes, the local-currency rate and news
//! headlines from the outbound ports and assembles a [`Report`]. It never
//! fails: a missing anchor quote yields an unavailable report, every other
//! upstream failure only removes the affected item.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use super::cache::rate::RateCache;
use crate::domain::{Headline, LocalRate, Quote, Report, Symbol};
use crate::error::{Result, UpstreamError};
use crate::port::outbound::market::{NewsSource, QuoteSource, Translator};

/// What to aggregate and how long to wait for it.
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Quote whose absence marks the whole report unavailable.
    pub anchor: Symbol,
    /// Additional quotes; failures are skipped.
    pub symbols: Vec<Symbol>,
    /// Pair used to convert quotes into the local currency, e.g. `USD/VND`.
    pub rate_pair: Symbol,
    /// Extra age allowed for a last-known rate after a failed refresh.
    pub rate_stale_grace: Duration,
    /// Maximum number of headlines.
    pub news_limit: usize,
    /// Timeout applied to every upstream call.
    pub upstream_timeout: StdDuration,
}

/// Builds reports from the market data ports.
pub struct MarketAggregator {
    quotes: Arc<dyn QuoteSource>,
    news: Arc<dyn NewsSource>,
    translator: Option<Arc<dyn Translator>>,
    rate_cache: Arc<RateCache>,
    settings: AggregatorSettings,
}

impl MarketAggregator {
    #[must_use]
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        news: Arc<dyn NewsSource>,
        translator: Option<Arc<dyn Translator>>,
        rate_cache: Arc<RateCache>,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            quotes,
            news,
            translator,
            rate_cache,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Assemble a report as of `now`.
    pub async fn produce_report(&self, now: DateTime<Utc>) -> Report {
        let anchor = &self.settings.anchor;
        let anchor_quote = match self.fetch_quote(anchor).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(symbol = %anchor, error = %e, "Anchor quote unavailable, degrading report");
                return Report::unavailable(now, anchor.clone(), e.to_string());
            }
        };

        let (quotes, rate, headlines) = tokio::join!(
            self.secondary_quotes(),
            self.local_rate(now),
            self.headlines()
        );

        let mut builder = Report::builder(now, anchor_quote).headlines(headlines);
        for quote in quotes {
            builder = builder.quote(quote);
        }
        if let Some(rate) = rate {
            builder = builder.rate(rate);
        }

        let report = builder.build();
        info!(
            quotes = report.quotes().len(),
            headlines = report.headlines().len(),
            derived = report.derived_values().len(),
            "Report assembled"
        );
        report
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote> {
        bounded(
            "quote fetch",
            self.settings.upstream_timeout,
            self.quotes.fetch_quote(symbol),
        )
        .await
    }

    async fn secondary_quotes(&self) -> Vec<Quote> {
        let symbols = self
            .settings
            .symbols
            .iter()
            .filter(|s| **s != self.settings.anchor);

        let results = join_all(symbols.map(|symbol| async move {
            (symbol, self.fetch_quote(symbol).await)
        }))
        .await;

        results
            .into_iter()
            .filter_map(|(symbol, result)| match result {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Quote unavailable, skipping");
                    None
                }
            })
            .collect()
    }

    async fn local_rate(&self, now: DateTime<Utc>) -> Option<LocalRate> {
        let pair = &self.settings.rate_pair;
        let fetch = || async move { self.fetch_quote(pair).await.map(|q| q.price()) };

        match self.rate_cache.get(now, fetch).await {
            Ok(value) => Some(LocalRate {
                pair: pair.clone(),
                value,
                stale: false,
            }),
            Err(e) => {
                let fallback = self
                    .rate_cache
                    .usable_stale(now, self.settings.rate_stale_grace);
                match fallback {
                    Some(entry) => {
                        warn!(
                            pair = %pair,
                            error = %e,
                            age_secs = entry.age(now).num_seconds(),
                            "Rate refresh failed, using last known rate"
                        );
                        Some(LocalRate {
                            pair: pair.clone(),
                            value: entry.value,
                            stale: true,
                        })
                    }
                    None => {
                        warn!(pair = %pair, error = %e, "Rate unavailable, omitting local values");
                        None
                    }
                }
            }
        }
    }

    async fn headlines(&self) -> Vec<Headline> {
        let limit = self.settings.news_limit;
        let fetched = bounded(
            "news fetch",
            self.settings.upstream_timeout,
            self.news.fetch_headlines(limit),
        )
        .await;

        let mut headlines = match fetched {
            Ok(headlines) => headlines,
            Err(e) => {
                warn!(error = %e, "News feed unavailable, sending without headlines");
                return Vec::new();
            }
        };
        headlines.truncate(limit);

        join_all(headlines.into_iter().map(|h| self.translate_headline(h))).await
    }

    async fn translate_headline(&self, headline: Headline) -> Headline {
        let Some(translator) = &self.translator else {
            return headline;
        };

        let translated = bounded(
            "translation",
            self.settings.upstream_timeout,
            translator.translate(&headline.title),
        )
        .await;

        match translated {
            Ok(text) if looks_like_translation(&text) => Headline {
                title: text.trim().to_string(),
                link: headline.link,
            },
            Ok(_) => {
                debug!(title = %headline.title, "Translator returned unusable text, keeping original");
                headline
            }
            Err(e) => {
                debug!(title = %headline.title, error = %e, "Translation failed, keeping original");
                headline
            }
        }
    }
}

/// Reject empty answers and markup (error pages, login walls).
fn looks_like_translation(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower = trimmed.to_ascii_lowercase();
    !(lower.contains("<html") || lower.contains("<!doctype") || lower.starts_with("<?xml"))
}

/// Run an upstream call with a hard timeout.
async fn bounded<T>(
    operation: &'static str,
    limit: StdDuration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout {
            operation,
            secs: limit.as_secs(),
        }
        .into()),
    }
}
