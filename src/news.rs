use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::topic::Topic;

/// A normalized article ready for curation and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub source_name: String,
    pub source_domain: String,
    pub topic: Topic,
}

impl NewsItem {
    pub fn new(
        title: &str,
        url: &str,
        published_at: Option<DateTime<Utc>>,
        source_name: &str,
        topic: Topic,
    ) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            published_at,
            source_name: source_name.to_string(),
            source_domain: extract_domain(url),
            topic,
        }
    }

    /// Publication time in epoch milliseconds, 0 when unknown.
    pub fn sort_key(&self) -> i64 {
        self.published_at.map(|p| p.timestamp_millis()).unwrap_or(0)
    }

    /// Caption shown under the title: "source • time", or just the source.
    pub fn caption(&self) -> String {
        match self.published_at {
            Some(published) => format!("{} • {}", self.source_name, format_time(published)),
            None => self.source_name.clone(),
        }
    }
}

/// Lowercase host without a leading "www.", empty when the url does not parse.
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .map(|h| h.strip_prefix("www.").map(str::to_string).unwrap_or(h))
        .unwrap_or_default()
}

pub fn format_time(time: DateTime<Utc>) -> String {
    time.format("%d %b, %H:%M").to_string()
}
