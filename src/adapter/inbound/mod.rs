//! Driving adapters: the command-line interface and the Telegram command
//! listener.

pub mod cli;
pub mod telegram;
