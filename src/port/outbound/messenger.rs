//! Delivery channel ports.

use async_trait::async_trait;

use crate::domain::{RecipientId, Report};
use crate::error::DeliveryError;

/// Sends rendered text to one recipient.
///
/// Implementations must not retry internally: the dispatcher attempts each
/// recipient exactly once per broadcast.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Channel name for logging.
    fn name(&self) -> &'static str;

    /// Deliver `text` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] describing why this recipient could not be
    /// reached.
    async fn send(&self, recipient: &RecipientId, text: &str) -> Result<(), DeliveryError>;
}

/// Renders a report into the markup understood by a channel.
pub trait ReportFormatter: Send + Sync {
    fn format(&self, report: &Report) -> String;
}
