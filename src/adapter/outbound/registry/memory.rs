//! In-memory subscriber registry.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{Recipient, RecipientId, Registration};
use crate::error::Result;
use crate::port::outbound::registry::SubscriberRegistry;

/// Ephemeral registry; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: RwLock<BTreeMap<RecipientId, DateTime<Utc>>>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with `recipients`.
    #[must_use]
    pub fn with_recipients(recipients: impl IntoIterator<Item = Recipient>) -> Self {
        let entries = recipients
            .into_iter()
            .map(|r| (r.id, r.registered_at))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl SubscriberRegistry for MemoryRegistry {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn register(&self, id: &RecipientId, at: DateTime<Utc>) -> Result<Registration> {
        let previous = self.entries.write().insert(id.clone(), at);
        Ok(if previous.is_some() {
            Registration::Refreshed
        } else {
            Registration::New
        })
    }

    async fn all(&self) -> Result<Vec<Recipient>> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(id, at)| Recipient::new(id.clone(), *at))
            .collect())
    }
}
