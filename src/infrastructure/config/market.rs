//! Market data, news and translation configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::market::rss::DEFAULT_FEED_URL;
use crate::adapter::outbound::market::twelvedata::DEFAULT_BASE_URL;

/// Quotes and the local-currency rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Symbol whose absence makes the report unavailable.
    pub anchor: String,
    /// Additional symbols; each is optional in the report.
    pub symbols: Vec<String>,
    /// Conversion pair into the local currency.
    pub rate_pair: String,
    /// How long a fetched rate is served from cache (default: 6h).
    pub rate_ttl_secs: u64,
    /// Extra age allowed for the last known rate after a failed refresh.
    pub rate_stale_grace_secs: u64,
    /// Quote provider REST root.
    pub base_url: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            anchor: "XAU/USD".into(),
            symbols: vec!["EUR/USD".into(), "BTC/USD".into()],
            rate_pair: "USD/VND".into(),
            rate_ttl_secs: 6 * 60 * 60,
            rate_stale_grace_secs: 24 * 60 * 60,
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// News feed settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub feed_url: String,
    /// Maximum headlines per report.
    pub max_items: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.into(),
            max_items: 7,
        }
    }
}

/// Headline translation settings.
///
/// The script URL comes from `GOOGLE_SCRIPT_URL`; without it headlines are
/// sent untranslated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub source: String,
    pub target: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: "en".into(),
            target: "vi".into(),
        }
    }
}

/// Limits applied to every upstream call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}
