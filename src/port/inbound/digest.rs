//! Digest use cases exposed to triggers.
//!
//! Every trigger (timer, single invocation, chat command) drives the same
//! [`DigestService`], so the core never knows which one called it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{DispatchSummary, RecipientId, Registration, Report};
use crate::error::Result;

/// Outcome of one produce-and-broadcast cycle.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// Nobody is subscribed; no report was produced.
    NoSubscribers,
    /// A report was produced and fanned out.
    Broadcast {
        /// Whether the report carried market data.
        report_available: bool,
        /// Per-recipient delivery results.
        summary: DispatchSummary,
    },
}

impl CycleOutcome {
    /// Number of failed deliveries, zero when nothing was sent.
    #[must_use]
    pub fn failed(&self) -> usize {
        match self {
            Self::NoSubscribers => 0,
            Self::Broadcast { summary, .. } => summary.failed(),
        }
    }
}

/// Report production, broadcast and subscription.
#[async_trait]
pub trait DigestService: Send + Sync {
    /// Assemble a fresh report. Never fails; degraded data yields an
    /// unavailable report.
    async fn produce_report(&self, now: DateTime<Utc>) -> Report;

    /// Render a report for the delivery channel.
    fn render(&self, report: &Report) -> String;

    /// Produce a report and deliver it to every subscriber.
    ///
    /// # Errors
    ///
    /// Fails only when the subscriber list cannot be read. Individual
    /// delivery failures are reported in the outcome.
    async fn run_cycle(&self, now: DateTime<Utc>) -> Result<CycleOutcome>;

    /// Register a subscriber. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns the registry error when the subscriber could not be stored.
    async fn subscribe(&self, id: RecipientId, now: DateTime<Utc>) -> Result<Registration>;
}
