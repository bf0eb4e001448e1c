//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!        inbound adapters (CLI, Telegram commands, scheduler)
//!                          │
//!                          ▼
//!                   ┌──────────────┐
//!                   │ DigestService│
//!                   └──────┬───────┘
//!          ┌───────────────┼──────────────────┐
//!          ▼               ▼                  ▼
//!   ┌────────────┐  ┌─────────────┐   ┌──────────────┐
//!   │ QuoteSource│  │ Subscriber  │   │  Messenger   │
//!   │ NewsSource │  │ Registry    │   │  Formatter   │
//!   │ Translator │  └─────────────┘   └──────────────┘
//!   └────────────┘
//! ```

pub mod inbound;
pub mod outbound;
