//! Marketpulse - scheduled market digests for chat subscribers.
//!
//! A report combines an anchor quote, secondary quotes, a cached
//! local-currency rate and translated news headlines. Reports are rendered
//! once per cycle and fanned out to every registered subscriber with
//! per-recipient failure isolation.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Quotes, reports, subscribers and dispatch outcomes
//! - [`port`] - Inbound and outbound trait boundaries
//! - [`application`] - Aggregator, rate cache, dispatcher and report cycle
//! - [`adapter`] - Twelve Data, RSS, Apps Script translation, Telegram,
//!   subscriber stores and the CLI
//! - [`infrastructure`] - Configuration, wiring and the scheduler
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery and command listener
//!
//! # Example
//!
//! ```no_run
//! use marketpulse::infrastructure::config::settings::Config;
//! use marketpulse::infrastructure::orchestration::runtime;
//!
//! # async fn demo() -> marketpulse::error::Result<()> {
//! let config = Config::load_or_default("config.toml")?;
//! let text = runtime::preview(&config).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
