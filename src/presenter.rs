use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheRecord, NewsCache};
use crate::curator::curate;
use crate::fallback::fallback_items;
use crate::fetcher::Fetcher;
use crate::news::NewsItem;

/// Fewer curated items than this counts as a failed fetch cycle.
pub const MIN_LIVE_ITEMS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    Loading,
    Live,
    Cached,
    Fallback,
}

impl FeedState {
    pub fn status_message(&self) -> &'static str {
        match self {
            FeedState::Loading => "Loading latest news…",
            FeedState::Live => "Live updates",
            FeedState::Cached => "Recent updates (cached)",
            FeedState::Fallback => "Reference links (live feed unavailable)",
        }
    }
}

/// What the sidebar currently shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSnapshot {
    pub state: FeedState,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<NewsItem>,
}

impl NewsSnapshot {
    fn new(state: FeedState, updated_at: Option<DateTime<Utc>>, items: Vec<NewsItem>) -> Self {
        Self {
            state,
            status: state.status_message().to_string(),
            updated_at,
            items,
        }
    }

    pub fn loading() -> Self {
        Self::new(FeedState::Loading, None, Vec::new())
    }

    fn from_cache(record: CacheRecord) -> Self {
        let saved_at = record.saved_at_time();
        Self::new(FeedState::Cached, saved_at, record.items)
    }

    /// Nothing to list after a completed cycle. Loading shows only the status.
    pub fn shows_empty_message(&self) -> bool {
        self.items.is_empty() && self.state != FeedState::Loading
    }

    /// "Last updated: …" caption, empty while nothing has been shown yet.
    pub fn updated_caption(&self) -> String {
        self.updated_at
            .map(|t| format!("Last updated: {}", crate::news::format_time(t)))
            .unwrap_or_default()
    }
}

/// Events that may start a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Boot,
    TimerTick,
    VisibilityRegained,
}

/// Owns the displayed snapshot and the time of the last successful fetch.
pub struct Presenter {
    fetcher: Fetcher,
    cache: NewsCache,
    refresh_interval: chrono::Duration,
    snapshot: RwLock<NewsSnapshot>,
    last_fetch: RwLock<Option<DateTime<Utc>>>,
    refreshing: AtomicBool,
}

/// Clears the `refreshing` flag when dropped, including when the cycle's
/// future is cancelled part-way through.
struct RefreshGuard<'a>(&'a AtomicBool);

impl<'a> RefreshGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Presenter {
    pub fn new(fetcher: Fetcher, cache: NewsCache, refresh_interval_minutes: u64) -> Self {
        Self {
            fetcher,
            cache,
            refresh_interval: chrono::Duration::minutes(refresh_interval_minutes as i64),
            snapshot: RwLock::new(NewsSnapshot::loading()),
            last_fetch: RwLock::new(None),
            refreshing: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> NewsSnapshot {
        self.snapshot.read().await.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub async fn last_successful_fetch(&self) -> Option<DateTime<Utc>> {
        *self.last_fetch.read().await
    }

    pub async fn handle(&self, trigger: Trigger) -> NewsSnapshot {
        debug!("Handling {:?}", trigger);
        match trigger {
            Trigger::Boot => self.boot().await,
            Trigger::TimerTick => self.refresh().await,
            Trigger::VisibilityRegained => self.on_visibility_regained().await,
        }
    }

    /// Show whatever the cache holds right away, then fetch live news.
    pub async fn boot(&self) -> NewsSnapshot {
        self.cache.purge_legacy_keys().await;
        self.show_initial().await;
        self.refresh().await
    }

    /// Cached when a usable record exists, Loading otherwise.
    pub async fn show_initial(&self) -> NewsSnapshot {
        let initial = match self.cache.load().await {
            Some(record) => NewsSnapshot::from_cache(record),
            None => NewsSnapshot::loading(),
        };
        *self.snapshot.write().await = initial.clone();
        initial
    }

    pub async fn on_visibility_regained(&self) -> NewsSnapshot {
        let last = self.last_successful_fetch().await;
        if visibility_refresh_due(last, Utc::now(), self.refresh_interval) {
            self.refresh().await
        } else {
            debug!("Skipping visibility refresh, last fetch is recent");
            self.snapshot().await
        }
    }

    /// Run one fetch cycle unless another one is already in flight.
    pub async fn refresh(&self) -> NewsSnapshot {
        let Some(_guard) = RefreshGuard::acquire(&self.refreshing) else {
            info!("Refresh already in progress, skipping");
            return self.snapshot().await;
        };

        let snapshot = self.do_refresh().await;
        *self.snapshot.write().await = snapshot.clone();
        snapshot
    }

    async fn do_refresh(&self) -> NewsSnapshot {
        let fetched = self.fetcher.fetch_all().await;
        let fetched_count = fetched.len();
        let curated = curate(fetched);
        info!("Curated {} of {} fetched items", curated.len(), fetched_count);

        if curated.len() >= MIN_LIVE_ITEMS {
            let now = Utc::now();
            self.cache.save_at(&curated, now).await;
            *self.last_fetch.write().await = Some(now);
            return NewsSnapshot::new(FeedState::Live, Some(now), curated);
        }

        if let Some(record) = self.cache.load().await {
            warn!("Live fetch came up short, showing cached news");
            return NewsSnapshot::from_cache(record);
        }

        warn!("Live fetch came up short and no cache is usable, showing reference links");
        NewsSnapshot::new(FeedState::Fallback, Some(Utc::now()), fallback_items())
    }
}

/// Whether a regained tab should trigger a fetch. Never having fetched counts
/// as having fetched at the epoch.
pub fn visibility_refresh_due(
    last_fetch: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    interval: chrono::Duration,
) -> bool {
    let last = last_fetch.map(|t| t.timestamp_millis()).unwrap_or(0);
    now.timestamp_millis() - last >= interval.num_milliseconds()
}

/// Boot once, then fire a timer tick every `interval`.
pub async fn start_background_refresh(presenter: Arc<Presenter>, interval: Duration) {
    info!("Starting initial news fetch");
    presenter.handle(Trigger::Boot).await;

    loop {
        tokio::time::sleep(interval).await;
        info!("Starting scheduled news refresh");
        presenter.handle(Trigger::TimerTick).await;
    }
}
