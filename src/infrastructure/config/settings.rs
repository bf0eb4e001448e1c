//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; secrets (bot token,
//! quote API key, translation script URL) are only read from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use marketpulse::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::delivery::{DispatchConfig, TelegramConfig};
use super::logging::LoggingConfig;
use super::market::{MarketConfig, NewsConfig, TranslationConfig, UpstreamConfig};
use super::registry::RegistryConfig;
use super::schedule::ScheduleConfig;
use crate::domain::Symbol;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; a missing file section falls back to its
/// defaults. Load from a TOML file using [`Config::load`] or parse directly
/// with [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,
    /// Quote symbols and the conversion rate.
    pub market: MarketConfig,
    /// News feed.
    pub news: NewsConfig,
    /// Headline translation.
    pub translation: TranslationConfig,
    /// Upstream call limits.
    pub upstream: UpstreamConfig,
    /// Broadcast fan-out.
    pub dispatch: DispatchConfig,
    /// Timer trigger.
    pub schedule: ScheduleConfig,
    /// Subscriber storage.
    pub registry: RegistryConfig,
    /// Telegram channel.
    pub telegram: TelegramConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.market.anchor.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "anchor" }.into());
        }
        self.anchor()?;
        self.symbols()?;
        self.rate_pair()?;

        if self.market.rate_ttl_secs == 0 {
            return Err(positive("rate_ttl_secs"));
        }
        if self.market.rate_ttl_secs > MAX_RATE_AGE_SECS {
            return Err(at_most_a_year("rate_ttl_secs"));
        }
        if self.market.rate_stale_grace_secs > MAX_RATE_AGE_SECS {
            return Err(at_most_a_year("rate_stale_grace_secs"));
        }
        if self.news.max_items == 0 {
            return Err(positive("max_items"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(positive("timeout_secs"));
        }
        if self.dispatch.concurrency == 0 {
            return Err(positive("concurrency"));
        }
        if self.dispatch.send_timeout_secs == 0 {
            return Err(positive("send_timeout_secs"));
        }
        if self.schedule.cycle_timeout_secs == 0 {
            return Err(positive("cycle_timeout_secs"));
        }
        self.schedule.offset()?;
        self.schedule.cadence()?;

        Ok(())
    }

    /// Anchor symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is not `BASE/QUOTE`.
    pub fn anchor(&self) -> Result<Symbol> {
        parse_symbol("anchor", &self.market.anchor)
    }

    /// Secondary symbols, in configuration order.
    ///
    /// # Errors
    ///
    /// Returns an error if any symbol is not `BASE/QUOTE`.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        self.market
            .symbols
            .iter()
            .map(|raw| parse_symbol("symbols", raw))
            .collect()
    }

    /// Local-currency conversion pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair is not `BASE/QUOTE`.
    pub fn rate_pair(&self) -> Result<Symbol> {
        parse_symbol("rate_pair", &self.market.rate_pair)
    }

    /// Initialize the tracing subscriber with this configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn parse_symbol(field: &'static str, raw: &str) -> Result<Symbol> {
    Symbol::try_new(raw).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Upper bound for rate ages, one year.
const MAX_RATE_AGE_SECS: u64 = 365 * 24 * 60 * 60;

fn at_most_a_year(field: &'static str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: format!("must be at most {MAX_RATE_AGE_SECS}"),
    }
    .into()
}

fn positive(field: &'static str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: "must be greater than 0".to_string(),
    }
    .into()
}
