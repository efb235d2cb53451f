//! Live News - a topic-curated news sidebar
//!
//! Fetches several RSS feeds through an RSS to JSON converter, classifies each
//! article into one of six clean-transport topics and serves a small, capped,
//! newest-first selection. The last good selection is cached so the sidebar
//! degrades to cached news and then to fixed reference links.

pub mod cache;
pub mod chart;
pub mod config;
pub mod curator;
pub mod db;
pub mod fallback;
pub mod fetcher;
pub mod news;
pub mod presenter;
pub mod routes;
pub mod topic;
