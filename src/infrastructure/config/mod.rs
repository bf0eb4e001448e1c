//! Infrastructure configuration modules.

pub mod delivery;
pub mod logging;
pub mod market;
pub mod registry;
pub mod schedule;
pub mod settings;
