use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use futures::future::join_all;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, FeedConfig};
use crate::news::NewsItem;
use crate::topic;

/// Why a single feed contributed nothing to a fetch cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid converter url: {0}")]
    InvalidUrl(String),

    #[error("malformed converter response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("converter reported status '{0}'")]
    ConverterStatus(String),

    #[error("converter response has no item list")]
    MissingItems,
}

/// Response body of the RSS to JSON converter.
#[derive(Debug, Deserialize)]
pub struct ConverterResponse {
    #[serde(default)]
    pub status: String,
    pub items: Option<Vec<ConverterItem>>,
}

#[derive(Debug, Deserialize)]
pub struct ConverterItem {
    pub link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub author: Option<String>,
}

pub struct Fetcher {
    client: Client,
    converter_url: String,
    items_per_feed: u32,
    feeds: Vec<FeedConfig>,
}

impl Fetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent("LiveNews/1.0 (Feed Aggregator)")
            .build()?;

        Ok(Self {
            client,
            converter_url: config.converter_url.clone(),
            items_per_feed: config.items_per_feed,
            feeds: config.feeds.clone(),
        })
    }

    /// Fetch every configured feed concurrently.
    ///
    /// A failing feed is logged and contributes no items. The result keeps
    /// feed configuration order.
    pub async fn fetch_all(&self) -> Vec<NewsItem> {
        let futures: Vec<_> = self
            .feeds
            .iter()
            .map(|feed| async move {
                match self.fetch_feed(feed).await {
                    Ok(items) => {
                        info!("Fetched {} items from '{}'", items.len(), feed.name);
                        items
                    }
                    Err(e) => {
                        warn!("Feed '{}' failed: {}", feed.name, e);
                        Vec::new()
                    }
                }
            })
            .collect();

        join_all(futures).await.into_iter().flatten().collect()
    }

    pub async fn fetch_feed(&self, feed: &FeedConfig) -> Result<Vec<NewsItem>, FetchError> {
        let endpoint = self.endpoint_for(feed)?;

        let response = self.client.get(endpoint).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let parsed: ConverterResponse = serde_json::from_slice(&bytes)?;

        Self::normalize(parsed, &feed.name)
    }

    pub fn endpoint_for(&self, feed: &FeedConfig) -> Result<Url, FetchError> {
        let count = self.items_per_feed.to_string();
        Url::parse_with_params(
            &self.converter_url,
            &[("rss_url", feed.url.as_str()), ("count", count.as_str())],
        )
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    /// Convert a converter response into news items, dropping entries that
    /// lack a link or a title.
    pub fn normalize(
        response: ConverterResponse,
        source_name: &str,
    ) -> Result<Vec<NewsItem>, FetchError> {
        if response.status != "ok" {
            return Err(FetchError::ConverterStatus(response.status));
        }
        let items = response.items.ok_or(FetchError::MissingItems)?;

        let normalized = items
            .into_iter()
            .filter_map(|item| {
                let link = item.link.filter(|l| !l.is_empty())?;
                let title = item.title.filter(|t| !t.is_empty())?;

                let combined = format!("{} {}", title, item.description.as_deref().unwrap_or(""));
                let source = item
                    .author
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .unwrap_or(source_name);
                let published = item.pub_date.as_deref().and_then(parse_pub_date);

                Some(NewsItem::new(
                    title.trim(),
                    &link,
                    published,
                    source,
                    topic::classify(&combined),
                ))
            })
            .collect();

        Ok(normalized)
    }
}

/// Parse a publication date as the converter emits it ("2024-12-09 12:00:00",
/// UTC), falling back to RFC 3339 and RFC 2822.
pub fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
