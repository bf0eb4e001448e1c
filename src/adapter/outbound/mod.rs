//! Outbound adapters (driven side).

pub mod market;
pub mod notifier;
pub mod registry;
pub mod sqlite;
