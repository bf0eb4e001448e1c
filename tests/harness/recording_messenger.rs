use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marketpulse::domain::RecipientId;
use marketpulse::error::DeliveryError;
use marketpulse::port::outbound::messenger::Messenger;

/// Thread-safe delivery collector; fails for the configured chat ids.
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    failing: Arc<Vec<String>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            sent: Arc::default(),
            failing: Arc::new(ids.iter().map(|id| (*id).to_string()).collect()),
        }
    }

    /// Every attempted delivery, in completion order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("lock sent messages").clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().expect("lock sent messages").len()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, recipient: &RecipientId, text: &str) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .expect("lock sent messages")
            .push((recipient.to_string(), text.to_string()));
        if self.failing.iter().any(|id| id == recipient.as_str()) {
            return Err(DeliveryError::Rejected("Forbidden: bot was blocked by the user".into()));
        }
        Ok(())
    }
}
