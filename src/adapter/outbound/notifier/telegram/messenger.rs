//! Telegram Bot API messenger.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, ParseMode};

use crate::domain::RecipientId;
use crate::error::{ConfigError, DeliveryError, Error, Result};
use crate::port::outbound::messenger::Messenger;

/// Read the bot token from `TELEGRAM_BOT_TOKEN`, falling back to the legacy
/// `TELEGRAM_TOKEN`.
///
/// # Errors
///
/// Returns an error if neither variable is set.
pub fn bot_token_from_env() -> Result<String> {
    ["TELEGRAM_BOT_TOKEN", "TELEGRAM_TOKEN"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .ok_or(Error::Config(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        }))
}

/// Sends MarkdownV2 messages with link previews disabled.
#[derive(Debug, Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::new(Bot::new(token))
    }

    #[must_use]
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

/// Send options with link previews disabled.
pub(crate) fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, recipient: &RecipientId, text: &str) -> std::result::Result<(), DeliveryError> {
        let chat_id = recipient
            .as_i64()
            .ok_or_else(|| DeliveryError::InvalidRecipient(recipient.to_string()))?;

        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::MarkdownV2)
            .link_preview_options(no_preview())
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::Rejected(e.to_string()))
    }
}
