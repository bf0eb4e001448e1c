//! Twelve Data quote client.
//!
//! Uses the `/quote` endpoint, which returns the last close and the
//! percent change for a symbol. Errors come back as HTTP 200 with a
//! `status: "error"` body, so the payload is inspected before parsing
//! prices.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::{Quote, Symbol};
use crate::error::{ConfigError, Error, Result, UpstreamError};
use crate::port::outbound::market::QuoteSource;

/// Twelve Data REST API root.
pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";

const PROVIDER: &str = "twelvedata";

/// Twelve Data API client.
#[derive(Debug, Clone)]
pub struct TwelveData {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TwelveData {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the `TWELVE_DATA_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(client: Client, base_url: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("TWELVE_DATA_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "TWELVE_DATA_API_KEY",
            })
        })?;
        Ok(Self::new(client, base_url, api_key))
    }

    fn quote_url(&self, symbol: &Symbol) -> Result<Url> {
        let endpoint = format!("{}/quote", self.base_url.trim_end_matches('/'));
        Ok(Url::parse_with_params(
            &endpoint,
            &[("symbol", symbol.as_str()), ("apikey", self.api_key.as_str())],
        )?)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    close: Option<String>,
    #[serde(default)]
    percent_change: Option<String>,
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Interpret a `/quote` payload.
fn parse_quote(symbol: &Symbol, http_status: StatusCode, body: &str) -> Result<Quote> {
    if http_status == StatusCode::TOO_MANY_REQUESTS {
        return Err(UpstreamError::RateLimited { provider: PROVIDER }.into());
    }

    let response: QuoteResponse = serde_json::from_str(body).map_err(|e| UpstreamError::Malformed {
        provider: PROVIDER,
        reason: e.to_string(),
    })?;

    let message = response.message.unwrap_or_default();
    if response.code == Some(429) || message.to_ascii_lowercase().contains("credits") {
        return Err(UpstreamError::RateLimited { provider: PROVIDER }.into());
    }
    if response.status.as_deref() == Some("error") || !http_status.is_success() {
        return Err(UpstreamError::Unavailable {
            provider: PROVIDER,
            reason: if message.is_empty() {
                format!("HTTP {http_status}")
            } else {
                message
            },
        }
        .into());
    }

    let close = response.close.ok_or_else(|| UpstreamError::Malformed {
        provider: PROVIDER,
        reason: format!("no close price for {symbol}"),
    })?;
    let price: Decimal = close.trim().parse().map_err(|_| UpstreamError::Malformed {
        provider: PROVIDER,
        reason: format!("unparseable close `{close}` for {symbol}"),
    })?;
    let percent_change = response
        .percent_change
        .and_then(|raw| raw.trim().parse::<Decimal>().ok());

    Ok(Quote::try_new(symbol.clone(), price, percent_change)?)
}

#[async_trait]
impl QuoteSource for TwelveData {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote> {
        let url = self.quote_url(symbol)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let quote = parse_quote(symbol, status, &body)?;
        debug!(symbol = %symbol, price = %quote.price(), "Fetched quote");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use rust_decimal_macros::dec;

    fn xau() -> Symbol {
        Symbol::try_new("XAU/USD").unwrap()
    }

    #[test]
    fn parses_close_and_change() {
        let body = r#"{
            "symbol": "XAU/USD",
            "name": "Gold Spot / US Dollar",
            "close": "2350.10000",
            "percent_change": "0.42123",
            "is_market_open": true
        }"#;

        let quote = parse_quote(&xau(), StatusCode::OK, body).unwrap();

        assert_eq!(quote.price(), dec!(2350.10000));
        assert_eq!(quote.percent_change(), Some(dec!(0.42123)));
    }

    #[test]
    fn missing_percent_change_is_tolerated() {
        let body = r#"{"close": "1.0845"}"#;
        let quote = parse_quote(&xau(), StatusCode::OK, body).unwrap();
        assert_eq!(quote.percent_change(), None);
    }

    #[test]
    fn credits_message_is_rate_limit() {
        let body = r#"{
            "code": 429,
            "message": "You have run out of API credits for the current minute.",
            "status": "error"
        }"#;

        let err = parse_quote(&xau(), StatusCode::OK, body).unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream(UpstreamError::RateLimited { .. })
        ));
    }

    #[test]
    fn http_429_is_rate_limit_even_without_body() {
        let err = parse_quote(&xau(), StatusCode::TOO_MANY_REQUESTS, "").unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream(UpstreamError::RateLimited { .. })
        ));
    }

    #[test]
    fn error_status_is_unavailable() {
        let body = r#"{"code": 400, "message": "symbol not found", "status": "error"}"#;
        let err = parse_quote(&xau(), StatusCode::OK, body).unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream(UpstreamError::Unavailable { ref reason, .. }) if reason == "symbol not found"
        ));
    }

    #[test]
    fn missing_close_is_malformed() {
        let err = parse_quote(&xau(), StatusCode::OK, r#"{"symbol": "XAU/USD"}"#).unwrap_err();
        assert!(matches!(err, Error::Upstream(UpstreamError::Malformed { .. })));
    }

    #[test]
    fn zero_price_is_rejected() {
        let err = parse_quote(&xau(), StatusCode::OK, r#"{"close": "0"}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn quote_url_encodes_symbol() {
        let client = TwelveData::new(Client::new(), "https://api.twelvedata.com/", "key");
        let url = client.quote_url(&xau()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.twelvedata.com/quote?symbol=XAU%2FUSD&apikey=key"
        );
    }
}
