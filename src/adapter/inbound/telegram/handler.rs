//! Channel-independent command handling.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};
use crate::domain::RecipientId;
use crate::port::inbound::digest::DigestService;

/// Message to send back to the chat that issued a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Text is rendered report markup rather than plain text.
    pub markup: bool,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: false,
        }
    }
}

const WELCOME: &str = "👋 Welcome! You are subscribed to the market digest.\n\n\
    Type /update to see it now.";

const REGISTRATION_FAILED: &str =
    "⚠️ Sorry, we could not save your subscription. Please try /start again later.";

/// Process a chat message and return the reply, if any.
///
/// Returns `None` for messages that are not commands.
pub async fn reply_for_message(
    service: &dyn DigestService,
    chat: &RecipientId,
    text: &str,
    now: DateTime<Utc>,
) -> Option<Reply> {
    let command = match parse_command(text) {
        Ok(command) => command,
        Err(CommandParseError::NotACommand) => return None,
        Err(err) => {
            return Some(Reply::plain(format!(
                "Invalid command: {err}\n\n{}",
                command_help()
            )))
        }
    };

    let reply = match command {
        TelegramCommand::Start => match service.subscribe(chat.clone(), now).await {
            Ok(_) => Reply::plain(WELCOME),
            Err(e) => {
                error!(chat = %chat, error = %e, "Subscription failed");
                Reply::plain(REGISTRATION_FAILED)
            }
        },
        TelegramCommand::Update => {
            info!(chat = %chat, "On-demand report requested");
            let report = service.produce_report(now).await;
            if !report.is_available() {
                warn!(chat = %chat, "Replying with unavailable report");
            }
            Reply {
                text: service.render(&report),
                markup: true,
            }
        }
        TelegramCommand::Help => Reply::plain(command_help()),
    };
    Some(reply)
}
