use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Refresh interval in minutes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    /// How long a cached result stays usable, in minutes
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
    /// Per-feed request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// RSS to JSON converter endpoint
    #[serde(default = "default_converter_url")]
    pub converter_url: String,
    #[serde(default = "default_items_per_feed")]
    pub items_per_feed: u32,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub feeds: Vec<FeedConfig>,
}

fn default_refresh_interval() -> u64 {
    12
}

fn default_cache_ttl() -> u64 {
    20
}

fn default_request_timeout() -> u64 {
    9
}

fn default_converter_url() -> String {
    "https://api.rss2json.com/v1/api.json".to_string()
}

fn default_items_per_feed() -> u32 {
    15
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Display name used when an item carries no author
    pub name: String,
    pub url: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
