//! Flat-file subscriber registry.
//!
//! One subscriber per line, `id<TAB>registered_at` with an RFC 3339
//! timestamp. Bare-id lines written by older deployments are accepted and
//! read with the Unix epoch as their registration time. Every write replaces
//! the file through a temporary sibling and a rename, so readers never see a
//! half-written list.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::{Recipient, RecipientId, Registration};
use crate::error::{RegistryError, Result};
use crate::port::outbound::registry::SubscriberRegistry;

/// Registry stored in a text file.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRegistry {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<RecipientId, DateTime<Utc>>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(parse_entries(&contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(RegistryError::Read(format!("{}: {e}", self.path.display())).into()),
        }
    }

    async fn store(&self, entries: &BTreeMap<RecipientId, DateTime<Utc>>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, render_entries(entries)).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }
}

fn parse_entries(contents: &str) -> BTreeMap<RecipientId, DateTime<Utc>> {
    let mut entries = BTreeMap::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (raw_id, raw_at) = match line.split_once('\t') {
            Some((id, at)) => (id, Some(at)),
            None => (line, None),
        };
        let Ok(id) = RecipientId::try_new(raw_id) else {
            warn!(line = index + 1, "Skipping subscriber line without a valid id");
            continue;
        };
        let registered_at = match raw_at.map(DateTime::parse_from_rfc3339) {
            Some(Ok(at)) => at.with_timezone(&Utc),
            Some(Err(e)) => {
                warn!(line = index + 1, error = %e, "Unreadable registration time, keeping subscriber");
                DateTime::<Utc>::UNIX_EPOCH
            }
            None => DateTime::<Utc>::UNIX_EPOCH,
        };
        entries.insert(id, registered_at);
    }
    entries
}

fn render_entries(entries: &BTreeMap<RecipientId, DateTime<Utc>>) -> String {
    entries
        .iter()
        .map(|(id, at)| format!("{id}\t{}\n", at.to_rfc3339()))
        .collect()
}

#[async_trait]
impl SubscriberRegistry for FileRegistry {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn register(&self, id: &RecipientId, at: DateTime<Utc>) -> Result<Registration> {
        let _guard = self.lock.lock().await;

        let mut entries = self.load().await?;
        let previous = entries.insert(id.clone(), at);
        self.store(&entries)
            .await
            .map_err(|e| RegistryError::Write {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(if previous.is_some() {
            Registration::Refreshed
        } else {
            Registration::New
        })
    }

    async fn all(&self) -> Result<Vec<Recipient>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .load()
            .await?
            .into_iter()
            .map(|(id, at)| Recipient::new(id, at))
            .collect())
    }
}
