//! Subscriber registry backends that need no database.

pub mod file;
pub mod memory;
