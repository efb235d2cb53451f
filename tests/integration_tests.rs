//! Integration tests for the live news sidebar
//!
//! These tests verify the full workflow from configuration loading through
//! fetching, curation, caching and the presenter's fallback chain.

use std::io::Write;
use tempfile::NamedTempFile;

mod common {
    use std::sync::Arc;

    use live_news::cache::NewsCache;
    use live_news::config::Config;
    use live_news::db::Database;
    use live_news::fetcher::Fetcher;
    use live_news::presenter::Presenter;
    use tempfile::TempDir;
    use wiremock::MockServer;

    /// Create a temporary directory for test databases
    pub fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    /// Create a test database path
    pub fn create_db_path(temp_dir: &TempDir) -> String {
        let db_path = temp_dir.path().join("test.db");
        format!("sqlite:{}?mode=rwc", db_path.display())
    }

    pub fn config_for(server: &MockServer, feeds: &[(&str, &str)]) -> Config {
        let mut toml = format!("converter_url = \"{}/v1/api.json\"\n", server.uri());
        for (name, url) in feeds {
            toml.push_str(&format!("[[feeds]]\nname = \"{}\"\nurl = \"{}\"\n", name, url));
        }
        Config::from_str(&toml).unwrap()
    }

    pub async fn open_cache(db_url: &str, ttl: u64) -> NewsCache {
        let db = Database::new(db_url).await.unwrap();
        db.initialize().await.unwrap();
        NewsCache::new(Arc::new(db), ttl)
    }

    pub async fn create_presenter(config: &Config, db_url: &str) -> Presenter {
        let cache = open_cache(db_url, config.cache_ttl).await;
        let fetcher = Fetcher::new(config).unwrap();
        Presenter::new(fetcher, cache, config.refresh_interval)
    }
}

#[cfg(test)]
mod config_integration_tests {
    use super::*;
    use live_news::config::Config;

    #[test]
    fn test_load_actual_feeds_config() {
        let config = Config::load("feeds.toml");
        assert!(config.is_ok(), "Failed to load feeds.toml: {:?}", config.err());

        let config = config.unwrap();
        assert!(!config.feeds.is_empty(), "feeds.toml should have at least one feed");
        assert_eq!(config.refresh_interval, 12);
        assert_eq!(config.cache_ttl, 20);
        assert_eq!(config.request_timeout, 9);
    }

    #[test]
    fn test_config_file_round_trip() {
        let toml_content = r#"
            refresh_interval = 5
            bind_address = "127.0.0.1:8080"

            [[feeds]]
            name = "Economic Times"
            url = "https://economictimes.example.com/rss"

            [[feeds]]
            name = "Livemint"
            url = "https://livemint.example.com/rss/companies"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.refresh_interval, 5);
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[1].name, "Livemint");
    }
}

#[cfg(test)]
mod cache_integration_tests {
    use super::common::*;
    use live_news::news::NewsItem;
    use live_news::topic::Topic;

    #[tokio::test]
    async fn test_cache_survives_reopen() {
        let temp_dir = create_temp_dir();
        let db_url = create_db_path(&temp_dir);

        let items = vec![
            NewsItem::new("A", "https://a.example.com/1", None, "A", Topic::GreenHydrogen),
            NewsItem::new("B", "https://b.example.com/1", None, "B", Topic::EthanolBiofuels),
        ];

        {
            let cache = open_cache(&db_url, 20).await;
            cache.save(&items).await;
        }

        {
            let cache = open_cache(&db_url, 20).await;
            let record = cache.load().await.expect("cache should be readable after reopen");
            assert_eq!(record.items, items);
        }
    }
}

#[cfg(test)]
mod end_to_end_tests {
    use super::common::*;
    use live_news::curator::{MAX_ITEMS, MAX_PER_TOPIC};
    use live_news::presenter::{FeedState, Trigger};
    use live_news::topic::Topic;
    use std::collections::HashMap;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED_ONE: &str = "https://one.example.com/rss";
    const FEED_TWO: &str = "https://two.example.com/rss";

    async fn mount_items(server: &MockServer, feed: &str, items: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/api.json"))
            .and(query_param("rss_url", feed))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "status": "ok", "items": items })),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_live_then_cached_across_restart() {
        let temp_dir = create_temp_dir();
        let db_url = create_db_path(&temp_dir);

        // First run: feeds are healthy.
        {
            let server = MockServer::start().await;
            mount_items(
                &server,
                FEED_ONE,
                serde_json::json!([
                    {"link": "https://one.example.com/a", "title": "Charging station rollout", "pubDate": "2024-12-09 10:00:00"},
                    {"link": "https://one.example.com/b", "title": "Hydrogen fuel buses", "pubDate": "2024-12-09 11:00:00"}
                ]),
            )
            .await;
            mount_items(&server, FEED_TWO, serde_json::json!([])).await;

            let config = config_for(&server, &[("One", FEED_ONE), ("Two", FEED_TWO)]);
            let presenter = create_presenter(&config, &db_url).await;

            let snapshot = presenter.handle(Trigger::Boot).await;
            assert_eq!(snapshot.state, FeedState::Live);
            assert_eq!(snapshot.items[0].topic, Topic::GreenHydrogen);
            assert_eq!(snapshot.items[1].topic, Topic::ElectricVehicles);
        }

        // Second run: every feed is down, the cache carries the sidebar.
        {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(502))
                .mount(&server)
                .await;

            let config = config_for(&server, &[("One", FEED_ONE), ("Two", FEED_TWO)]);
            let presenter = create_presenter(&config, &db_url).await;

            let initial = presenter.show_initial().await;
            assert_eq!(initial.state, FeedState::Cached);

            let snapshot = presenter.handle(Trigger::Boot).await;
            assert_eq!(snapshot.state, FeedState::Cached);
            assert_eq!(snapshot.status, "Recent updates (cached)");
            assert_eq!(snapshot.items.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_curation_caps_across_feeds() {
        let temp_dir = create_temp_dir();
        let db_url = create_db_path(&temp_dir);
        let server = MockServer::start().await;

        let ev_items: Vec<_> = (0..10)
            .map(|i| {
                serde_json::json!({
                    "link": format!("https://one.example.com/ev/{}", i),
                    "title": format!("Electric vehicle story {}", i),
                    "pubDate": format!("2024-12-09 {:02}:00:00", 10 + i)
                })
            })
            .collect();
        let mixed_items = serde_json::json!([
            {"link": "https://two.example.com/1", "title": "Ethanol plant"},
            {"link": "https://two.example.com/2", "title": "Biofuel policy"},
            {"link": "https://two.example.com/3", "title": "E20 petrol rollout"},
            {"link": "https://two.example.com/4", "title": "Metro rail line"},
            {"link": "https://two.example.com/5", "title": "Air pollution spikes"},
            {"link": "https://two.example.com/6", "title": "Fuel cell trucks"},
            {"link": "https://two.example.com/7", "title": "Budget session"},
            {"link": "https://two.example.com/8", "title": "Quarterly results"},
            {"link": "https://two.example.com/9", "title": "Annual report"},
            {"link": "https://ONE.example.com/ev/0", "title": "Duplicate of an EV story"},
            {"link": "https://www.google.com/url?q=https://x.example.com", "title": "Redirect"}
        ]);

        mount_items(&server, FEED_ONE, serde_json::Value::Array(ev_items)).await;
        mount_items(&server, FEED_TWO, mixed_items).await;

        let config = config_for(&server, &[("One", FEED_ONE), ("Two", FEED_TWO)]);
        let presenter = create_presenter(&config, &db_url).await;
        let snapshot = presenter.handle(Trigger::TimerTick).await;

        assert_eq!(snapshot.state, FeedState::Live);
        assert_eq!(snapshot.items.len(), MAX_ITEMS);

        let mut counts: HashMap<Topic, usize> = HashMap::new();
        for item in &snapshot.items {
            *counts.entry(item.topic).or_insert(0) += 1;
        }
        assert!(counts.values().all(|&c| c <= MAX_PER_TOPIC));

        // The two newest EV stories lead.
        assert_eq!(snapshot.items[0].url, "https://one.example.com/ev/9");
        assert_eq!(snapshot.items[1].url, "https://one.example.com/ev/8");
        assert!(snapshot.items.iter().all(|i| !i.url.contains("google.com/url")));
    }

    #[tokio::test]
    async fn test_total_outage_without_cache_shows_reference_links() {
        let temp_dir = create_temp_dir();
        let db_url = create_db_path(&temp_dir);
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = config_for(&server, &[("One", FEED_ONE), ("Two", FEED_TWO)]);
        let presenter = create_presenter(&config, &db_url).await;
        let snapshot = presenter.handle(Trigger::Boot).await;

        assert_eq!(snapshot.state, FeedState::Fallback);
        assert_eq!(snapshot.status, "Reference links (live feed unavailable)");
        assert_eq!(snapshot.items.len(), 8);
    }
}
