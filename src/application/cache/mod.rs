//! Runtime caches used by application services.
//!
//! - [`rate::RateCache`]: single-flight TTL cache for the local-currency rate

pub mod rate;
