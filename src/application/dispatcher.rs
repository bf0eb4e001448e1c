//! Broadcast fan-out with per-recipient failure isolation.
//!
//! The report is rendered once and the same text is sent to every recipient.
//! Sends run concurrently up to a fixed limit, each under its own timeout,
//! and the call returns only after every recipient has an outcome. Each
//! recipient is attempted exactly once.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::{DispatchOutcome, DispatchResult, DispatchSummary, Recipient, Report};
use crate::error::DeliveryError;
use crate::port::outbound::messenger::{Messenger, ReportFormatter};

/// Fan-out limits.
#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    /// Maximum sends in flight at once.
    pub concurrency: usize,
    /// Timeout for a single send.
    pub send_timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            concurrency: 8,
            send_timeout: Duration::from_secs(10),
        }
    }
}

/// Delivers rendered reports to recipients.
pub struct BroadcastDispatcher {
    messenger: Arc<dyn Messenger>,
    formatter: Arc<dyn ReportFormatter>,
    settings: DispatchSettings,
}

impl BroadcastDispatcher {
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        formatter: Arc<dyn ReportFormatter>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            messenger,
            formatter,
            settings,
        }
    }

    /// Render a report with the channel formatter.
    #[must_use]
    pub fn render(&self, report: &Report) -> String {
        self.formatter.format(report)
    }

    /// Render `report` once and deliver it to every recipient.
    ///
    /// Results are returned in the order of `recipients`.
    pub async fn broadcast(&self, report: &Report, recipients: &[Recipient]) -> DispatchSummary {
        let text = self.render(report);
        self.deliver(&text, recipients).await
    }

    /// Deliver pre-rendered text to every recipient.
    pub async fn deliver(&self, text: &str, recipients: &[Recipient]) -> DispatchSummary {
        let concurrency = self.settings.concurrency.max(1);

        let results: Vec<DispatchResult> = stream::iter(recipients.iter().cloned())
            .map(|recipient| async move {
                let outcome = self.send_one(&recipient, text).await;
                DispatchResult { recipient, outcome }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let summary = DispatchSummary::new(results);
        info!(
            channel = self.messenger.name(),
            total = summary.total(),
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "Broadcast finished"
        );
        summary
    }

    async fn send_one(&self, recipient: &Recipient, text: &str) -> DispatchOutcome {
        let timeout = self.settings.send_timeout;
        let sent = tokio::time::timeout(timeout, self.messenger.send(&recipient.id, text)).await;

        let error = match sent {
            Ok(Ok(())) => {
                debug!(recipient = %recipient.id, "Delivered");
                return DispatchOutcome::Success;
            }
            Ok(Err(e)) => e,
            Err(_) => DeliveryError::Timeout {
                secs: timeout.as_secs(),
            },
        };

        warn!(recipient = %recipient.id, error = %error, "Delivery failed");
        DispatchOutcome::Failure(error.to_string())
    }
}
