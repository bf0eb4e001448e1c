//! SQLite persistence adapters.
//!
//! Provides the document-store backend of the subscriber registry using
//! Diesel ORM with embedded migrations.

pub mod database;
pub mod registry;
