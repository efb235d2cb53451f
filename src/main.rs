use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_news::cache::NewsCache;
use live_news::config::Config;
use live_news::db::Database;
use live_news::fetcher::Fetcher;
use live_news::presenter::{start_background_refresh, Presenter};
use live_news::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "live_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load("feeds.toml")?;
    info!("Loaded {} feeds from configuration", config.feeds.len());

    // Initialize the cache store
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:live_news.db?mode=rwc".to_string());
    let db = Database::new(&database_url).await?;
    db.initialize().await?;
    info!("Database initialized");

    let cache = NewsCache::new(Arc::new(db), config.cache_ttl);
    let fetcher = Fetcher::new(&config)?;
    let presenter = Arc::new(Presenter::new(fetcher, cache, config.refresh_interval));

    // Boot, then refresh on a timer
    let bg_presenter = presenter.clone();
    let refresh_interval = Duration::from_secs(config.refresh_interval * 60);
    tokio::spawn(async move {
        start_background_refresh(bg_presenter, refresh_interval).await;
    });

    let state = Arc::new(AppState { presenter });

    // Build router
    let app = Router::new()
        .route("/", get(routes::index))
        .route("/news", get(routes::news_panel))
        .route("/news.json", get(routes::news_json))
        .route("/visibility", post(routes::visibility))
        .route("/refresh", post(routes::refresh))
        .route("/refresh/status", get(routes::refresh_status))
        .route("/chart.json", get(routes::chart))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server starting on http://{}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
