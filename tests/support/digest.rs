use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use marketpulse::application::aggregator::{AggregatorSettings, MarketAggregator};
use marketpulse::application::cache::rate::RateCache;
use marketpulse::application::cycle::ReportCycle;
use marketpulse::application::dispatcher::{BroadcastDispatcher, DispatchSettings};
use marketpulse::application::render::PlainTextFormatter;
use marketpulse::domain::Symbol;
use marketpulse::port::outbound::market::{NewsSource, QuoteSource, Translator};
use marketpulse::port::outbound::messenger::Messenger;
use marketpulse::port::outbound::registry::SubscriberRegistry;

pub fn symbol(s: &str) -> Symbol {
    Symbol::try_new(s).expect("valid symbol")
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub fn settings() -> AggregatorSettings {
    AggregatorSettings {
        anchor: symbol("XAU/USD"),
        symbols: vec![symbol("XAU/USD"), symbol("BTC/USD"), symbol("EUR/USD")],
        rate_pair: symbol("USD/VND"),
        rate_stale_grace: Duration::hours(24),
        news_limit: 7,
        upstream_timeout: StdDuration::from_secs(2),
    }
}

pub fn aggregator(
    quotes: Arc<dyn QuoteSource>,
    news: Arc<dyn NewsSource>,
    translator: Option<Arc<dyn Translator>>,
    cache: Arc<RateCache>,
) -> MarketAggregator {
    MarketAggregator::new(quotes, news, translator, cache, settings())
}

pub fn cycle(
    aggregator: MarketAggregator,
    messenger: Arc<dyn Messenger>,
    registry: Arc<dyn SubscriberRegistry>,
) -> ReportCycle {
    let offset = chrono::FixedOffset::east_opt(7 * 3600).expect("valid offset");
    let dispatcher = BroadcastDispatcher::new(
        messenger,
        Arc::new(PlainTextFormatter::new(offset)),
        DispatchSettings::default(),
    );
    ReportCycle::new(aggregator, dispatcher, registry)
}
