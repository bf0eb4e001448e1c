//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use crate::adapter::outbound::market::rss::RssFeed;
use crate::adapter::outbound::market::translate::AppsScriptTranslator;
use crate::adapter::outbound::market::twelvedata::TwelveData;
use crate::adapter::outbound::market::http_client;
use crate::adapter::outbound::notifier::log::LogMessenger;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{
    bot_token_from_env, TelegramFormatter, TelegramMessenger,
};
use crate::adapter::outbound::registry::file::FileRegistry;
use crate::adapter::outbound::registry::memory::MemoryRegistry;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::registry::SqliteSubscriberRegistry;
use crate::application::aggregator::{AggregatorSettings, MarketAggregator};
use crate::application::cache::rate::RateCache;
use crate::application::cycle::ReportCycle;
use crate::application::dispatcher::BroadcastDispatcher;
use crate::application::render::PlainTextFormatter;
use crate::error::Result;
use crate::infrastructure::config::registry::RegistryBackend;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::market::Translator;
use crate::port::outbound::messenger::{Messenger, ReportFormatter};
use crate::port::outbound::registry::SubscriberRegistry;

/// Where reports are delivered.
#[derive(Debug, Clone)]
pub enum Channel {
    /// Deliveries are logged, nothing is sent.
    Log,
    /// Telegram bot.
    #[cfg(feature = "telegram")]
    Telegram(teloxide::Bot),
}

impl Channel {
    /// Select the channel from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if Telegram is enabled but no bot token is set.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config, dry_run: bool) -> Result<Self> {
        if dry_run || !config.telegram.enabled {
            info!(dry_run, "Deliveries will be logged only");
            return Ok(Self::Log);
        }

        #[cfg(feature = "telegram")]
        {
            let token = bot_token_from_env()?;
            Ok(Self::Telegram(teloxide::Bot::new(token)))
        }

        #[cfg(not(feature = "telegram"))]
        {
            warn!("Telegram enabled in config but the telegram feature is not compiled in");
            Ok(Self::Log)
        }
    }

    fn messenger(&self) -> Arc<dyn Messenger> {
        match self {
            Self::Log => Arc::new(LogMessenger),
            #[cfg(feature = "telegram")]
            Self::Telegram(bot) => Arc::new(TelegramMessenger::new(bot.clone())),
        }
    }

    fn formatter(&self, config: &Config) -> Result<Arc<dyn ReportFormatter>> {
        let offset = config.schedule.offset()?;
        Ok(match self {
            Self::Log => Arc::new(PlainTextFormatter::new(offset)),
            #[cfg(feature = "telegram")]
            Self::Telegram(_) => Arc::new(TelegramFormatter::new(offset)),
        })
    }
}

/// Open the configured subscriber registry.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated.
#[allow(clippy::result_large_err)]
pub fn build_registry(config: &Config) -> Result<Arc<dyn SubscriberRegistry>> {
    let path = config.registry.path();
    let registry: Arc<dyn SubscriberRegistry> = match config.registry.backend {
        RegistryBackend::File => Arc::new(FileRegistry::new(path)),
        RegistryBackend::Sqlite => {
            let pool = create_pool(path)?;
            run_migrations(&pool)?;
            Arc::new(SqliteSubscriberRegistry::new(pool))
        }
        RegistryBackend::Memory => {
            warn!("Memory registry selected, subscribers are lost on exit");
            Arc::new(MemoryRegistry::new())
        }
    };
    info!(backend = registry.name(), path, "Subscriber registry ready");
    Ok(registry)
}

/// Build the market aggregator with the HTTP adapters.
///
/// # Errors
///
/// Returns an error if `TWELVE_DATA_API_KEY` is missing or a symbol in the
/// configuration is invalid.
#[allow(clippy::result_large_err)]
pub fn build_aggregator(config: &Config) -> Result<MarketAggregator> {
    let client = http_client(config.upstream.timeout())?;

    let quotes = Arc::new(TwelveData::from_env(client.clone(), &config.market.base_url)?);
    let news = Arc::new(RssFeed::new(client.clone(), &config.news.feed_url));
    let translator = build_translator(config, client);

    let settings = AggregatorSettings {
        anchor: config.anchor()?,
        symbols: config.symbols()?,
        rate_pair: config.rate_pair()?,
        rate_stale_grace: seconds(config.market.rate_stale_grace_secs),
        news_limit: config.news.max_items,
        upstream_timeout: config.upstream.timeout(),
    };
    let rate_cache = Arc::new(RateCache::new(seconds(config.market.rate_ttl_secs)));

    Ok(MarketAggregator::new(
        quotes, news, translator, rate_cache, settings,
    ))
}

fn build_translator(config: &Config, client: reqwest::Client) -> Option<Arc<dyn Translator>> {
    if !config.translation.enabled {
        return None;
    }
    match AppsScriptTranslator::from_env(
        client,
        &config.translation.source,
        &config.translation.target,
    ) {
        Ok(translator) => Some(Arc::new(translator)),
        Err(e) => {
            warn!(error = %e, "Translation disabled, headlines stay untranslated");
            None
        }
    }
}

/// Wire the full report cycle for `channel`.
///
/// # Errors
///
/// Returns an error if any component cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_cycle(config: &Config, channel: &Channel) -> Result<Arc<ReportCycle>> {
    let registry = build_registry(config)?;
    let aggregator = build_aggregator(config)?;
    let dispatcher = BroadcastDispatcher::new(
        channel.messenger(),
        channel.formatter(config)?,
        config.dispatch.settings(),
    );
    Ok(Arc::new(ReportCycle::new(aggregator, dispatcher, registry)))
}

fn seconds(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1000))
}
