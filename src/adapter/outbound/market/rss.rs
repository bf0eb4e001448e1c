//! RSS news feed client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::Headline;
use crate::error::{Result, UpstreamError};
use crate::port::outbound::market::NewsSource;

/// Investing.com commodities and futures news.
pub const DEFAULT_FEED_URL: &str = "https://www.investing.com/rss/news_25.rss";

const PROVIDER: &str = "rss";

/// Fetches headlines from an RSS 2.0 feed.
#[derive(Debug, Clone)]
pub struct RssFeed {
    client: Client,
    url: String,
}

impl RssFeed {
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Parse a feed document into at most `limit` headlines, in feed order.
///
/// Items without a title are skipped and do not count towards the limit.
fn parse_feed(xml: &str, limit: usize) -> Result<Vec<Headline>> {
    let rss: Rss = quick_xml::de::from_str(xml).map_err(|e| UpstreamError::Malformed {
        provider: PROVIDER,
        reason: e.to_string(),
    })?;

    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let title = item.title?.trim().to_string();
            if title.is_empty() {
                return None;
            }
            let link = item.link.unwrap_or_default().trim().to_string();
            Some(Headline::new(title, link))
        })
        .take(limit)
        .collect())
}

#[async_trait]
impl NewsSource for RssFeed {
    async fn fetch_headlines(&self, limit: usize) -> Result<Vec<Headline>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| UpstreamError::Unavailable {
                provider: PROVIDER,
                reason: e.to_string(),
            })?
            .text()
            .await?;

        let headlines = parse_feed(&body, limit)?;
        debug!(count = headlines.len(), url = %self.url, "Fetched headlines");
        Ok(headlines)
    }
}
