//! Telegram delivery.
//!
//! Provides the [`TelegramMessenger`] used by the broadcast dispatcher and
//! the MarkdownV2 [`TelegramFormatter`] for reports.
//!
//! Requires the `telegram` feature to be enabled.

mod format;
mod messenger;

pub use format::{escape_markdown, TelegramFormatter};
pub use messenger::{bot_token_from_env, TelegramMessenger};
pub(crate) use messenger::no_preview;
