//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::subscribers;

/// Database row for a subscriber.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriberRow {
    pub id: String,
    /// RFC 3339 timestamp.
    pub registered_at: String,
}
