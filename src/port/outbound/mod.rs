//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the I/O edges: market data providers, the
//! translation service, the messaging channel and subscriber storage.

pub mod market;
pub mod messenger;
pub mod registry;
