//! Inbound (driving) ports consumed by the CLI, the scheduler and the
//! Telegram command listener.

pub mod digest;
