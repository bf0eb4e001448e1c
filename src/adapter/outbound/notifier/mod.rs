//! Messenger adapters.
//!
//! Implements the `port::outbound::messenger` traits for the delivery
//! channels.

pub mod log;

#[cfg(feature = "telegram")]
pub mod telegram;
