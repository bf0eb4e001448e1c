//! TTL cache for the local-currency conversion rate.
//!
//! The rate changes slowly and the quote provider bills per request, so the
//! value is memoized for a configurable TTL. Refreshes are single-flight:
//! callers that find the entry expired while another refresh is running wait
//! for that refresh and reuse its result instead of issuing their own fetch.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Rate;
use crate::error::{Result, UpstreamError};

/// A cached rate with the time it was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedRate {
    pub value: Rate,
    pub obtained_at: DateTime<Utc>,
}

impl CachedRate {
    /// Age of the entry at `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.obtained_at
    }

    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.value > Decimal::ZERO && self.age(now) < ttl
    }
}

/// Single-value TTL cache with serialized refreshes.
#[derive(Debug)]
pub struct RateCache {
    /// Value and timestamp, always replaced together.
    entry: RwLock<Option<CachedRate>>,
    /// Held for the duration of an upstream refresh.
    refresh: Mutex<()>,
    ttl: Duration,
}

impl RateCache {
    /// Create an empty cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached rate if fresh, otherwise refresh it with `fetch`.
    ///
    /// On failure the previous entry is left untouched and the error is
    /// returned; use [`last_known`](Self::last_known) or
    /// [`usable_stale`](Self::usable_stale) to decide on a fallback.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error, or returns [`UpstreamError::Malformed`]
    /// when the fetched rate is not positive.
    pub async fn get<F, Fut>(&self, now: DateTime<Utc>, fetch: F) -> Result<Rate>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Rate>>,
    {
        if let Some(value) = self.fresh(now) {
            return Ok(value);
        }

        let _guard = self.refresh.lock().await;

        // A concurrent caller may have refreshed while we waited.
        if let Some(value) = self.fresh(now) {
            debug!(rate = %value, "Rate refreshed by concurrent caller");
            return Ok(value);
        }

        let value = fetch().await?;
        if value <= Decimal::ZERO {
            return Err(UpstreamError::Malformed {
                provider: "rate",
                reason: format!("non-positive rate {value}"),
            }
            .into());
        }

        *self.entry.write() = Some(CachedRate {
            value,
            obtained_at: now,
        });
        debug!(rate = %value, "Rate cache refreshed");
        Ok(value)
    }

    /// Last successfully fetched entry, regardless of age.
    #[must_use]
    pub fn last_known(&self) -> Option<CachedRate> {
        *self.entry.read()
    }

    /// Last known entry if it is younger than `ttl + grace`.
    #[must_use]
    pub fn usable_stale(&self, now: DateTime<Utc>, grace: Duration) -> Option<CachedRate> {
        self.last_known()
            .filter(|entry| entry.value > Decimal::ZERO && entry.age(now) < self.ttl + grace)
    }

    fn fresh(&self, now: DateTime<Utc>) -> Option<Rate> {
        (*self.entry.read())
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value)
    }
}
