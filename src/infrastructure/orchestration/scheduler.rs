//! Timer trigger.
//!
//! Fires the report cycle on a fixed cadence. Cycles never overlap: the next
//! fire time is computed only after the previous cycle has finished or has
//! been abandoned at the cycle timeout.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeZone, Utc};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::port::inbound::digest::{CycleOutcome, DigestService};

/// When the timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Once a day at a wall-clock time in a fixed timezone.
    Daily { at: NaiveTime, offset: FixedOffset },
    /// Repeatedly, with a fixed gap between fire times.
    Every(Duration),
}

impl Cadence {
    /// First fire time strictly after `now`.
    #[must_use]
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Cadence::Every(gap) => {
                now + chrono::Duration::from_std(gap).unwrap_or_else(|_| chrono::Duration::days(1))
            }
            Cadence::Daily { at, offset } => {
                let local = now.with_timezone(&offset);
                let today = local.date_naive().and_time(at);
                let naive = if today > local.naive_local() {
                    today
                } else {
                    today + Days::new(1)
                };
                match offset.from_local_datetime(&naive).single() {
                    Some(fire) => fire.with_timezone(&Utc),
                    None => now + chrono::Duration::days(1),
                }
            }
        }
    }
}

/// Runs report cycles on a [`Cadence`] until shut down.
pub struct Scheduler {
    service: Arc<dyn DigestService>,
    cadence: Cadence,
    cycle_timeout: Duration,
}

impl Scheduler {
    #[must_use]
    pub fn new(service: Arc<dyn DigestService>, cadence: Cadence, cycle_timeout: Duration) -> Self {
        Self {
            service,
            cadence,
            cycle_timeout,
        }
    }

    /// Loop until `shutdown` turns true or its sender is dropped.
    ///
    /// A cycle in progress when shutdown arrives is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(cadence = ?self.cadence, "Scheduler started");

        loop {
            let now = Utc::now();
            let next = self.cadence.next_after(now);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next = %next, "Next broadcast scheduled");

            tokio::select! {
                () = tokio::time::sleep(wait) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            tokio::select! {
                _ = self.tick(Utc::now()) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        warn!("Shutdown during broadcast, abandoning cycle");
                        break;
                    }
                }
            }
        }

        info!("Scheduler stopped");
    }

    /// Run one cycle under the cycle timeout and log its outcome.
    pub async fn tick(&self, now: DateTime<Utc>) -> Option<CycleOutcome> {
        match tokio::time::timeout(self.cycle_timeout, self.service.run_cycle(now)).await {
            Ok(Ok(outcome)) => {
                log_outcome(&outcome);
                Some(outcome)
            }
            Ok(Err(e)) => {
                error!(error = %e, "Broadcast cycle failed");
                None
            }
            Err(_) => {
                error!(
                    timeout_secs = self.cycle_timeout.as_secs(),
                    "Broadcast cycle timed out, abandoned"
                );
                None
            }
        }
    }
}

/// Log a finished cycle at the level its result deserves.
pub fn log_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::NoSubscribers => info!("Cycle skipped, no subscribers"),
        CycleOutcome::Broadcast {
            report_available,
            summary,
        } => {
            if summary.failed() > 0 {
                warn!(
                    available = report_available,
                    succeeded = summary.succeeded(),
                    failed = summary.failed(),
                    "Cycle finished with delivery failures"
                );
            } else {
                info!(
                    available = report_available,
                    succeeded = summary.succeeded(),
                    "Cycle finished"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DispatchSummary, RecipientId, Registration, Report, Symbol};
    use crate::error::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn eight_am_ict() -> Cadence {
        Cadence::Daily {
            at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            offset: FixedOffset::east_opt(7 * 3600).unwrap(),
        }
    }

    #[test]
    fn daily_fires_later_today() {
        // 06:00 ICT
        let next = eight_am_ict().next_after(at("2026-03-01T23:00:00Z"));
        assert_eq!(next, at("2026-03-02T01:00:00Z"));
    }

    #[test]
    fn daily_rolls_to_tomorrow_after_fire_time() {
        // 09:00 ICT
        let next = eight_am_ict().next_after(at("2026-03-02T02:00:00Z"));
        assert_eq!(next, at("2026-03-03T01:00:00Z"));
    }

    #[test]
    fn daily_exactly_at_fire_time_waits_a_day() {
        let next = eight_am_ict().next_after(at("2026-03-02T01:00:00Z"));
        assert_eq!(next, at("2026-03-03T01:00:00Z"));
    }

    #[test]
    fn every_adds_the_gap() {
        let now = at("2026-03-02T01:00:00Z");
        let next = Cadence::Every(Duration::from_secs(60)).next_after(now);
        assert_eq!(next, at("2026-03-02T01:01:00Z"));
    }

    struct CountingService {
        cycles: AtomicUsize,
        cycle_time: Duration,
    }

    #[async_trait]
    impl DigestService for CountingService {
        async fn produce_report(&self, now: DateTime<Utc>) -> Report {
            Report::unavailable(now, Symbol::try_new("XAU/USD").unwrap(), "test")
        }

        fn render(&self, _report: &Report) -> String {
            String::new()
        }

        async fn run_cycle(&self, _now: DateTime<Utc>) -> Result<CycleOutcome> {
            tokio::time::sleep(self.cycle_time).await;
            self.cycles.fetch_add(1, Ordering::SeqCst);
            Ok(CycleOutcome::Broadcast {
                report_available: false,
                summary: DispatchSummary::default(),
            })
        }

        async fn subscribe(&self, _id: RecipientId, _now: DateTime<Utc>) -> Result<Registration> {
            Ok(Registration::New)
        }
    }

    #[tokio::test]
    async fn tick_abandons_slow_cycle() {
        let service = Arc::new(CountingService {
            cycles: AtomicUsize::new(0),
            cycle_time: Duration::from_secs(30),
        });
        let scheduler = Scheduler::new(
            service.clone(),
            Cadence::Every(Duration::from_secs(1)),
            Duration::from_millis(20),
        );

        assert!(scheduler.tick(Utc::now()).await.is_none());
        assert_eq!(service.cycles.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn interval_runs_cycles_until_shutdown() {
        let service = Arc::new(CountingService {
            cycles: AtomicUsize::new(0),
            cycle_time: Duration::from_millis(1),
        });
        let scheduler = Scheduler::new(
            service.clone(),
            Cadence::Every(Duration::from_millis(20)),
            Duration::from_secs(5),
        );
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { scheduler.run(rx).await });
        tokio::time::sleep(Duration::from_millis(150)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        let cycles = service.cycles.load(Ordering::SeqCst);
        assert!(cycles >= 2, "expected several cycles, got {cycles}");
    }
}
