//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate the outbound
//! ports to produce and deliver market reports.

pub mod aggregator;
pub mod cache;
pub mod cycle;
pub mod dispatcher;
pub mod render;
