//! Market data adapters.
//!
//! HTTP clients for the quote provider, the news feed and the translation
//! service. Each implements one of the `port::outbound::market` traits.

pub mod rss;
pub mod translate;
pub mod twelvedata;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

/// User agent sent with every upstream request.
const USER_AGENT: &str = concat!("marketpulse/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with a whole-request timeout.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}
