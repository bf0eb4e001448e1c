//! Application orchestration.
//!
//! Triggers that drive the report cycle: the timer, a single invocation,
//! and the long-running service that combines the timer with the Telegram
//! command listener.

pub mod runtime;
pub mod scheduler;
