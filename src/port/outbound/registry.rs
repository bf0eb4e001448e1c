//! Subscriber registry port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Recipient, RecipientId, Registration};
use crate::error::Result;

/// Durable set of subscribers.
///
/// # Contract
///
/// - `register` is an idempotent upsert: registering a known id refreshes its
///   timestamp and never creates a second entry.
/// - `all` returns a consistent snapshot; implementations serialize it against
///   concurrent `register` calls.
/// - A failed `register` leaves existing entries untouched.
#[async_trait]
pub trait SubscriberRegistry: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Insert or refresh a subscriber.
    ///
    /// # Errors
    ///
    /// Returns a registry error when the backing store cannot be written.
    async fn register(&self, id: &RecipientId, at: DateTime<Utc>) -> Result<Registration>;

    /// Snapshot of all subscribers, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns a registry error when the backing store cannot be read.
    async fn all(&self) -> Result<Vec<Recipient>>;
}
