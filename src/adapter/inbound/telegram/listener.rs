//! Telegram long-polling listener.

use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tracing::{error, info, warn};

use super::command::bot_commands;
use super::handler::reply_for_message;
use crate::adapter::outbound::notifier::telegram::no_preview;
use crate::domain::RecipientId;
use crate::port::inbound::digest::DigestService;

/// Answer chat commands until the process exits.
pub async fn run_listener(bot: Bot, service: Arc<dyn DigestService>) {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!("Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let service = Arc::clone(&service);
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            let chat = RecipientId::from(msg.chat.id.0);
            let Some(reply) = reply_for_message(service.as_ref(), &chat, text, Utc::now()).await
            else {
                return respond(());
            };

            let request = bot.send_message(msg.chat.id, reply.text);
            let sent = if reply.markup {
                request
                    .parse_mode(ParseMode::MarkdownV2)
                    .link_preview_options(no_preview())
                    .await
            } else {
                request.await
            };
            if let Err(e) = sent {
                error!(chat = %chat, error = %e, "Failed to send Telegram command response");
            }

            respond(())
        }
    })
    .await;
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
