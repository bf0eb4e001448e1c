//! Produce-and-broadcast cycle.
//!
//! [`ReportCycle`] is the single entry point every trigger calls: it reads
//! the subscriber snapshot, asks the aggregator for a report and hands it to
//! the dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use super::aggregator::MarketAggregator;
use super::dispatcher::BroadcastDispatcher;
use crate::domain::{RecipientId, Registration, Report};
use crate::error::Result;
use crate::port::inbound::digest::{CycleOutcome, DigestService};
use crate::port::outbound::registry::SubscriberRegistry;

/// Report production and delivery wired to concrete ports.
pub struct ReportCycle {
    aggregator: MarketAggregator,
    dispatcher: BroadcastDispatcher,
    registry: Arc<dyn SubscriberRegistry>,
}

impl ReportCycle {
    #[must_use]
    pub fn new(
        aggregator: MarketAggregator,
        dispatcher: BroadcastDispatcher,
        registry: Arc<dyn SubscriberRegistry>,
    ) -> Self {
        Self {
            aggregator,
            dispatcher,
            registry,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<dyn SubscriberRegistry> {
        &self.registry
    }
}

#[async_trait]
impl DigestService for ReportCycle {
    async fn produce_report(&self, now: DateTime<Utc>) -> Report {
        self.aggregator.produce_report(now).await
    }

    fn render(&self, report: &Report) -> String {
        self.dispatcher.render(report)
    }

    async fn run_cycle(&self, now: DateTime<Utc>) -> Result<CycleOutcome> {
        let recipients = self.registry.all().await?;
        if recipients.is_empty() {
            info!(registry = self.registry.name(), "No subscribers, skipping report");
            return Ok(CycleOutcome::NoSubscribers);
        }

        info!(recipients = recipients.len(), "Starting broadcast cycle");
        let report = self.aggregator.produce_report(now).await;
        let summary = self.dispatcher.broadcast(&report, &recipients).await;

        Ok(CycleOutcome::Broadcast {
            report_available: report.is_available(),
            summary,
        })
    }

    async fn subscribe(&self, id: RecipientId, now: DateTime<Utc>) -> Result<Registration> {
        let registration = self.registry.register(&id, now).await?;
        info!(
            recipient = %id,
            new = registration.is_new(),
            registry = self.registry.name(),
            "Subscriber registered"
        );
        Ok(registration)
    }
}
