//! Subscriber registry configuration.

use serde::Deserialize;

/// Storage backend for subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    /// Flat text file, one subscriber per line.
    #[default]
    File,
    /// SQLite database.
    Sqlite,
    /// Process memory; lost on exit.
    Memory,
}

/// Subscriber registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub backend: RegistryBackend,
    /// File or database path. Defaults depend on the backend.
    pub path: Option<String>,
}

impl RegistryConfig {
    /// Effective storage path for the selected backend.
    #[must_use]
    pub fn path(&self) -> &str {
        match (&self.path, self.backend) {
            (Some(path), _) => path,
            (None, RegistryBackend::Sqlite) => "marketpulse.db",
            (None, _) => "users.txt",
        }
    }
}
