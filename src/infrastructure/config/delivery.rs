//! Dispatch and Telegram configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::dispatcher::DispatchSettings;

/// Broadcast fan-out limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum sends in flight (default: 8).
    pub concurrency: usize,
    /// Timeout for one send (default: 10).
    pub send_timeout_secs: u64,
}

impl DispatchConfig {
    #[must_use]
    pub fn settings(&self) -> DispatchSettings {
        DispatchSettings {
            concurrency: self.concurrency,
            send_timeout: Duration::from_secs(self.send_timeout_secs),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            send_timeout_secs: 10,
        }
    }
}

/// Telegram channel settings. The bot token comes from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Deliver reports through Telegram. When false, deliveries are only logged.
    pub enabled: bool,
    /// Listen for `/start`, `/update` and `/help` while running.
    pub commands: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commands: true,
        }
    }
}
