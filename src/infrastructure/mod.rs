//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without
//! containing business logic: configuration, component wiring and the
//! runtime triggers.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`orchestration`] - Scheduler and runtime entry points

pub mod bootstrap;
pub mod config;
pub mod orchestration;
