//! Subscribers and per-recipient dispatch outcomes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::RecipientId;

/// A registered subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub id: RecipientId,
    pub registered_at: DateTime<Utc>,
}

impl Recipient {
    pub fn new(id: RecipientId, registered_at: DateTime<Utc>) -> Self {
        Self { id, registered_at }
    }
}

/// Result of registering a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The id was not known before.
    New,
    /// The id already existed; its timestamp was refreshed.
    Refreshed,
}

impl Registration {
    #[must_use]
    pub fn is_new(self) -> bool {
        matches!(self, Self::New)
    }
}

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    Failure(String),
}

/// Delivery result for one recipient in one broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub recipient: Recipient,
    pub outcome: DispatchOutcome,
}

impl DispatchResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, DispatchOutcome::Success)
    }
}

/// All results of a broadcast, in recipient order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    results: Vec<DispatchResult>,
}

impl DispatchSummary {
    pub fn new(results: Vec<DispatchResult>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn results(&self) -> &[DispatchResult] {
        &self.results
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Failed deliveries only.
    pub fn failures(&self) -> impl Iterator<Item = &DispatchResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, outcome: DispatchOutcome) -> DispatchResult {
        DispatchResult {
            recipient: Recipient::new(RecipientId::from(id), Utc::now()),
            outcome,
        }
    }

    #[test]
    fn summary_counts_outcomes() {
        let summary = DispatchSummary::new(vec![
            result(1, DispatchOutcome::Success),
            result(2, DispatchOutcome::Failure("blocked".into())),
            result(3, DispatchOutcome::Success),
        ]);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        let failed: Vec<_> = summary.failures().map(|r| r.recipient.id.as_str()).collect();
        assert_eq!(failed, vec!["2"]);
    }

    #[test]
    fn empty_summary() {
        let summary = DispatchSummary::default();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.failed(), 0);
    }
}
