//! Google Apps Script translation client.
//!
//! The script takes `text`, `source` and `target` query parameters and
//! answers with the translated text as the plain response body.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{ConfigError, Error, Result, UpstreamError};
use crate::port::outbound::market::Translator;

const PROVIDER: &str = "apps-script";

/// Translates text through a deployed Apps Script web app.
#[derive(Debug, Clone)]
pub struct AppsScriptTranslator {
    client: Client,
    script_url: String,
    source: String,
    target: String,
}

impl AppsScriptTranslator {
    #[must_use]
    pub fn new(
        client: Client,
        script_url: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            client,
            script_url: script_url.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Create a translator from the `GOOGLE_SCRIPT_URL` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or blank.
    pub fn from_env(
        client: Client,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self> {
        let script_url = std::env::var("GOOGLE_SCRIPT_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(Error::Config(ConfigError::MissingField {
                field: "GOOGLE_SCRIPT_URL",
            }))?;
        Ok(Self::new(client, script_url, source, target))
    }

    fn request_url(&self, text: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.script_url,
            &[
                ("text", text),
                ("source", self.source.as_str()),
                ("target", self.target.as_str()),
            ],
        )?)
    }
}

#[async_trait]
impl Translator for AppsScriptTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let url = self.request_url(text)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| UpstreamError::Unavailable {
                provider: PROVIDER,
                reason: e.to_string(),
            })?
            .text()
            .await?;
        Ok(body)
    }
}
