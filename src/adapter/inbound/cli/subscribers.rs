//! Handlers for `subscribers list` and `subscribers add`.

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{AddSubscriberArgs, ConfigPathArg};
use super::output;
use crate::domain::{Recipient, RecipientId};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_registry;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct SubscriberRow {
    #[tabled(rename = "Chat ID")]
    id: String,
    #[tabled(rename = "Registered")]
    registered_at: String,
}

impl From<&Recipient> for SubscriberRow {
    fn from(recipient: &Recipient) -> Self {
        Self {
            id: recipient.id.to_string(),
            registered_at: if recipient.registered_at.timestamp() == 0 {
                "unknown".to_string()
            } else {
                recipient.registered_at.format("%Y-%m-%d %H:%M UTC").to_string()
            },
        }
    }
}

/// List registered subscribers.
pub async fn list(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let registry = build_registry(&config)?;
    let recipients = registry.all().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "subscribers.list",
            "backend": registry.name(),
            "subscribers": recipients,
        }));
        return Ok(());
    }

    output::section(&format!("Subscribers ({})", recipients.len()));
    if recipients.is_empty() {
        output::warning("No subscribers registered");
        return Ok(());
    }
    let rows: Vec<SubscriberRow> = recipients.iter().map(SubscriberRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Register a subscriber by id.
pub async fn add(args: &AddSubscriberArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let id = RecipientId::try_new(&args.id)?;
    let registry = build_registry(&config)?;
    let registration = registry.register(&id, Utc::now()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "subscribers.add",
            "id": id.to_string(),
            "new": registration.is_new(),
        }));
    } else if registration.is_new() {
        output::success(&format!("Registered {id}"));
    } else {
        output::success(&format!("{id} was already registered, timestamp refreshed"));
    }
    Ok(())
}
