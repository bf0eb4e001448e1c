//! Messenger that only logs deliveries.

use async_trait::async_trait;
use tracing::info;

use crate::domain::RecipientId;
use crate::error::DeliveryError;
use crate::port::outbound::messenger::Messenger;

/// Dry-run channel: every send succeeds and is written to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMessenger;

#[async_trait]
impl Messenger for LogMessenger {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, recipient: &RecipientId, text: &str) -> Result<(), DeliveryError> {
        info!(recipient = %recipient, chars = text.chars().count(), "Dry-run delivery");
        Ok(())
    }
}
