//! Channel-agnostic domain types: quotes, reports and subscribers.

pub mod error;
pub mod id;
pub mod money;
pub mod quote;
pub mod recipient;
pub mod report;

pub use error::DomainError;
pub use id::{RecipientId, Symbol};
pub use money::{Price, Rate};
pub use quote::Quote;
pub use recipient::{
    DispatchOutcome, DispatchResult, DispatchSummary, Recipient, Registration,
};
pub use report::{Headline, LocalRate, Report, ReportBuilder, ReportStatus};
