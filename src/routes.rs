use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::chart::{emissions_chart, ChartConfig};
use crate::presenter::{NewsSnapshot, Presenter, Trigger};

pub struct AppState {
    pub presenter: Arc<Presenter>,
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub snapshot: NewsSnapshot,
    pub refreshing: bool,
}

#[derive(Template)]
#[template(path = "news_panel.html")]
pub struct NewsPanelTemplate {
    pub snapshot: NewsSnapshot,
}

#[derive(Template)]
#[template(path = "refresh_button.html")]
pub struct RefreshButtonTemplate {
    pub refreshing: bool,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Route handlers
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.presenter.snapshot().await;
    let refreshing = state.presenter.is_refreshing();
    HtmlTemplate(IndexTemplate {
        snapshot,
        refreshing,
    })
}

pub async fn news_panel(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.presenter.snapshot().await;
    HtmlTemplate(NewsPanelTemplate { snapshot })
}

pub async fn news_json(State(state): State<Arc<AppState>>) -> Json<NewsSnapshot> {
    Json(state.presenter.snapshot().await)
}

pub async fn visibility(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.presenter.handle(Trigger::VisibilityRegained).await;
    HtmlTemplate(NewsPanelTemplate { snapshot })
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // Spawn the refresh task
    let presenter = state.presenter.clone();
    tokio::spawn(async move {
        presenter.refresh().await;
    });

    // Return refreshing state immediately
    HtmlTemplate(RefreshButtonTemplate { refreshing: true })
}

pub async fn refresh_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let refreshing = state.presenter.is_refreshing();
    HtmlTemplate(RefreshButtonTemplate { refreshing })
}

pub async fn chart() -> Json<ChartConfig> {
    Json(emissions_chart())
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
