mod harness;
mod support;

use std::sync::Arc;

use chrono::Duration;
use harness::recording_messenger::RecordingMessenger;
use harness::scripted_market::{PrefixTranslator, ScriptedNews, ScriptedQuotes};
use marketpulse::adapter::outbound::registry::memory::MemoryRegistry;
use marketpulse::application::cache::rate::RateCache;
use marketpulse::domain::{Recipient, RecipientId, ReportStatus};
use marketpulse::port::inbound::digest::{CycleOutcome, DigestService};
use rust_decimal_macros::dec;
use support::digest::{aggregator, at, cycle, symbol};

fn market() -> ScriptedQuotes {
    ScriptedQuotes::new()
        .with_price("XAU/USD", dec!(2000))
        .with_price("BTC/USD", dec!(60000))
        .with_price("EUR/USD", dec!(1.08))
        .with_price("USD/VND", dec!(25000))
}

fn cache() -> Arc<RateCache> {
    Arc::new(RateCache::new(Duration::hours(6)))
}

#[tokio::test]
async fn full_report_converts_usd_quotes() {
    let quotes = market();
    let agg = aggregator(
        Arc::new(quotes.clone()),
        Arc::new(ScriptedNews::with(&["Gold rallies"])),
        None,
        cache(),
    );

    let report = agg.produce_report(at("2026-03-02T01:00:00Z")).await;

    assert!(report.is_available());
    assert_eq!(report.quotes().len(), 3);
    assert_eq!(report.derived_value(&symbol("XAU/USD")), Some(dec!(50000000)));
    assert_eq!(report.derived_value(&symbol("USD/VND")), Some(dec!(25000)));
    assert_eq!(report.headlines()[0].title, "Gold rallies");
    assert!(!report.rate().unwrap().stale);
}

#[tokio::test]
async fn anchor_failure_degrades_without_fetching_news() {
    let quotes = market();
    quotes.remove("XAU/USD");
    let news = ScriptedNews::with(&["Gold rallies"]);
    let agg = aggregator(Arc::new(quotes.clone()), Arc::new(news.clone()), None, cache());

    let report = agg.produce_report(at("2026-03-02T01:00:00Z")).await;

    assert!(matches!(report.status(), ReportStatus::Unavailable { .. }));
    assert!(report.quotes().is_empty());
    assert!(report.headlines().is_empty());
    assert!(report.derived_values().is_empty());
    assert_eq!(news.calls(), 0);
    assert_eq!(quotes.calls_for("USD/VND"), 0);
}

#[tokio::test]
async fn zero_anchor_price_degrades_without_fetching_news() {
    let quotes = market();
    quotes.set_price("XAU/USD", dec!(0));
    let news = ScriptedNews::with(&["Gold rallies"]);
    let agg = aggregator(Arc::new(quotes.clone()), Arc::new(news.clone()), None, cache());

    let report = agg.produce_report(at("2026-03-02T01:00:00Z")).await;

    let ReportStatus::Unavailable { reason } = report.status() else {
        panic!("expected an unavailable report, got {:?}", report.status());
    };
    assert!(reason.contains("XAU/USD"));
    assert!(report.quotes().is_empty());
    assert!(report.headlines().is_empty());
    assert!(report.derived_values().is_empty());
    assert_eq!(news.calls(), 0);
    assert_eq!(quotes.calls_for("USD/VND"), 0);
}

#[tokio::test]
async fn secondary_quote_failure_only_drops_that_quote() {
    let quotes = market();
    quotes.remove("BTC/USD");
    let agg = aggregator(Arc::new(quotes), Arc::new(ScriptedNews::failing()), None, cache());

    let report = agg.produce_report(at("2026-03-02T01:00:00Z")).await;

    assert!(report.is_available());
    assert!(report.quote(&symbol("BTC/USD")).is_none());
    assert!(report.quote(&symbol("EUR/USD")).is_some());
    assert!(report.headlines().is_empty());
}

#[tokio::test]
async fn rate_is_fetched_once_within_ttl() {
    let quotes = market();
    let agg = aggregator(Arc::new(quotes.clone()), Arc::new(ScriptedNews::failing()), None, cache());

    agg.produce_report(at("2026-03-02T01:00:00Z")).await;
    agg.produce_report(at("2026-03-02T05:59:00Z")).await;
    assert_eq!(quotes.calls_for("USD/VND"), 1);

    agg.produce_report(at("2026-03-02T07:00:00Z")).await;
    assert_eq!(quotes.calls_for("USD/VND"), 2);
}

#[tokio::test]
async fn failed_refresh_uses_last_known_rate_within_grace() {
    let quotes = market();
    let agg = aggregator(Arc::new(quotes.clone()), Arc::new(ScriptedNews::failing()), None, cache());
    agg.produce_report(at("2026-03-02T01:00:00Z")).await;

    quotes.remove("USD/VND");
    quotes.set_price("XAU/USD", dec!(2100));

    let stale = agg.produce_report(at("2026-03-02T08:00:00Z")).await;
    let rate = stale.rate().expect("last known rate");
    assert!(rate.stale);
    assert_eq!(rate.value, dec!(25000));
    assert_eq!(stale.derived_value(&symbol("XAU/USD")), Some(dec!(52500000)));

    let expired = agg.produce_report(at("2026-03-03T08:00:00Z")).await;
    assert!(expired.is_available());
    assert!(expired.rate().is_none());
    assert!(expired.derived_values().is_empty());
}

#[tokio::test]
async fn translation_falls_back_to_original_titles() {
    let agg = aggregator(
        Arc::new(market()),
        Arc::new(ScriptedNews::with(&["Gold up", "Fed fail", "html page"])),
        Some(Arc::new(PrefixTranslator)),
        cache(),
    );

    let report = agg.produce_report(at("2026-03-02T01:00:00Z")).await;

    let titles: Vec<&str> = report.headlines().iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["VI: Gold up", "Fed fail", "html page"]);
    assert_eq!(report.headlines()[1].link, "https://news.example/1");
}

#[tokio::test]
async fn cycle_without_subscribers_skips_production() {
    let quotes = market();
    let messenger = RecordingMessenger::new();
    let service = cycle(
        aggregator(Arc::new(quotes.clone()), Arc::new(ScriptedNews::failing()), None, cache()),
        Arc::new(messenger.clone()),
        Arc::new(MemoryRegistry::new()),
    );

    let outcome = service.run_cycle(at("2026-03-02T01:00:00Z")).await.unwrap();

    assert!(matches!(outcome, CycleOutcome::NoSubscribers));
    assert_eq!(quotes.calls_for("XAU/USD"), 0);
    assert_eq!(messenger.len(), 0);
}

#[tokio::test]
async fn cycle_isolates_failing_subscribers() {
    let now = at("2026-03-02T01:00:00Z");
    let registry = MemoryRegistry::with_recipients(
        [1_i64, 2, 3].map(|id| Recipient::new(RecipientId::from(id), now)),
    );
    let messenger = RecordingMessenger::failing_for(&["2"]);
    let service = cycle(
        aggregator(Arc::new(market()), Arc::new(ScriptedNews::failing()), None, cache()),
        Arc::new(messenger.clone()),
        Arc::new(registry),
    );

    let outcome = service.run_cycle(now).await.unwrap();

    let CycleOutcome::Broadcast {
        report_available,
        summary,
    } = outcome
    else {
        panic!("expected a broadcast");
    };
    assert!(report_available);
    assert_eq!(summary.succeeded(), 2);
    let failed: Vec<&str> = summary
        .failures()
        .map(|r| r.recipient.id.as_str())
        .collect();
    assert_eq!(failed, vec!["2"]);

    let sent = messenger.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent.windows(2).all(|pair| pair[0].1 == pair[1].1));
}

#[tokio::test]
async fn unavailable_report_is_still_broadcast() {
    let now = at("2026-03-02T01:00:00Z");
    let quotes = market();
    quotes.remove("XAU/USD");
    let messenger = RecordingMessenger::new();
    let service = cycle(
        aggregator(Arc::new(quotes), Arc::new(ScriptedNews::failing()), None, cache()),
        Arc::new(messenger.clone()),
        Arc::new(MemoryRegistry::with_recipients([Recipient::new(
            RecipientId::from(7),
            now,
        )])),
    );

    let outcome = service.run_cycle(now).await.unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::Broadcast {
            report_available: false,
            ..
        }
    ));
    assert!(messenger.sent()[0].1.contains("temporarily unavailable"));
}

#[tokio::test]
async fn subscribe_adds_recipient_to_next_cycle() {
    let now = at("2026-03-02T01:00:00Z");
    let messenger = RecordingMessenger::new();
    let service = cycle(
        aggregator(Arc::new(market()), Arc::new(ScriptedNews::failing()), None, cache()),
        Arc::new(messenger.clone()),
        Arc::new(MemoryRegistry::new()),
    );

    let id = RecipientId::try_new("-100200300").unwrap();
    assert!(service.subscribe(id.clone(), now).await.unwrap().is_new());
    assert!(!service.subscribe(id, now).await.unwrap().is_new());

    let outcome = service.run_cycle(now).await.unwrap();
    assert_eq!(outcome.failed(), 0);
    assert_eq!(messenger.sent()[0].0, "-100200300");
}
