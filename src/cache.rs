use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::db::Database;
use crate::news::NewsItem;

pub const CACHE_KEY: &str = "live_news_v3";
pub const LEGACY_CACHE_KEYS: [&str; 2] = ["live_news_cache_v1", "live_news_cache_v2"];

/// What gets persisted under `CACHE_KEY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// Epoch milliseconds
    pub saved_at: i64,
    pub items: Vec<NewsItem>,
}

impl CacheRecord {
    pub fn saved_at_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.saved_at).single()
    }
}

/// Best-effort cache of the last good curated result.
///
/// Reads treat every failure as a miss and writes never fail the caller.
pub struct NewsCache {
    db: Arc<Database>,
    ttl: Duration,
}

impl NewsCache {
    pub fn new(db: Arc<Database>, ttl_minutes: u64) -> Self {
        Self {
            db,
            ttl: Duration::minutes(ttl_minutes as i64),
        }
    }

    pub async fn load(&self) -> Option<CacheRecord> {
        self.load_at(Utc::now()).await
    }

    pub async fn load_at(&self, now: DateTime<Utc>) -> Option<CacheRecord> {
        let raw = match self.db.get_value(CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read news cache: {}", e);
                return None;
            }
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                debug!("Ignoring malformed news cache: {}", e);
                return None;
            }
        };

        if record.saved_at <= 0 || now.timestamp_millis() - record.saved_at > self.ttl.num_milliseconds() {
            debug!("News cache expired");
            return None;
        }

        Some(record)
    }

    pub async fn save(&self, items: &[NewsItem]) {
        self.save_at(items, Utc::now()).await
    }

    pub async fn save_at(&self, items: &[NewsItem], now: DateTime<Utc>) {
        let record = CacheRecord {
            saved_at: now.timestamp_millis(),
            items: items.to_vec(),
        };

        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize news cache: {}", e);
                return;
            }
        };

        if let Err(e) = self.db.set_value(CACHE_KEY, &raw).await {
            warn!("Failed to persist news cache: {}", e);
        }
    }

    /// Drop cache entries written by older record formats.
    pub async fn purge_legacy_keys(&self) {
        for key in LEGACY_CACHE_KEYS {
            if let Err(e) = self.db.remove_value(key).await {
                debug!("Failed to remove legacy cache key {}: {}", key, e);
            }
        }
    }
}
