//! SQLite subscriber registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::SubscriberRow;
use crate::adapter::outbound::sqlite::database::schema::subscribers;
use crate::domain::{Recipient, RecipientId, Registration};
use crate::error::{Error, RegistryError, Result};
use crate::port::outbound::registry::SubscriberRegistry;

/// SQLite-backed subscriber registry.
///
/// Registration runs in an immediate transaction so concurrent upserts of
/// the same id serialize on the database write lock.
pub struct SqliteSubscriberRegistry {
    pool: DbPool,
}

impl SqliteSubscriberRegistry {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn from_row(row: SubscriberRow) -> Result<Recipient> {
        let id = RecipientId::try_new(&row.id)?;
        let registered_at = DateTime::parse_from_rfc3339(&row.registered_at)
            .map_err(|e| RegistryError::Read(format!("subscriber {}: {e}", row.id)))?
            .with_timezone(&Utc);
        Ok(Recipient::new(id, registered_at))
    }

    fn upsert(
        conn: &mut SqliteConnection,
        row: &SubscriberRow,
    ) -> std::result::Result<Registration, diesel::result::Error> {
        conn.immediate_transaction(|conn| {
            let existing: Option<String> = subscribers::table
                .find(&row.id)
                .select(subscribers::id)
                .first(conn)
                .optional()?;

            diesel::replace_into(subscribers::table)
                .values(row)
                .execute(conn)?;

            Ok(if existing.is_some() {
                Registration::Refreshed
            } else {
                Registration::New
            })
        })
    }
}

#[async_trait]
impl SubscriberRegistry for SqliteSubscriberRegistry {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn register(&self, id: &RecipientId, at: DateTime<Utc>) -> Result<Registration> {
        let row = SubscriberRow {
            id: id.to_string(),
            registered_at: at.to_rfc3339(),
        };
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        Self::upsert(&mut conn, &row).map_err(|e| {
            RegistryError::Write {
                id: row.id.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn all(&self) -> Result<Vec<Recipient>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<SubscriberRow> = subscribers::table
            .order(subscribers::id.asc())
            .select(SubscriberRow::as_select())
            .load(&mut conn)
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
