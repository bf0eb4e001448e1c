//! Telegram command trigger.
//!
//! Listens for chat commands and drives the digest service: `/start`
//! subscribes the chat, `/update` replies with a fresh report to that chat
//! only, `/help` lists the commands.

mod command;
mod handler;

#[cfg(feature = "telegram")]
mod listener;

pub use command::{bot_commands, command_help, parse_command, CommandParseError, TelegramCommand};
pub use handler::{reply_for_message, Reply};

#[cfg(feature = "telegram")]
pub use listener::run_listener;
