use std::collections::{HashMap, HashSet};

use crate::news::NewsItem;
use crate::topic::Topic;

pub const MAX_ITEMS: usize = 8;
pub const MAX_PER_TOPIC: usize = 2;

/// Substrings marking redirect wrappers rather than real article links.
const REDIRECT_MARKERS: &[&str] = &["google.com/url"];

/// Turn raw fetched items into the bounded display set.
///
/// Drops junk, dedupes by case-insensitive url (first wins), sorts newest
/// first and keeps at most `MAX_PER_TOPIC` per topic and `MAX_ITEMS` overall.
pub fn curate(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let mut deduped: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| is_displayable(item))
        .filter(|item| seen.insert(item.url.to_lowercase()))
        .collect();

    // Stable, so equal timestamps keep their fetch order.
    deduped.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

    let mut per_topic: HashMap<Topic, usize> = HashMap::new();
    let mut result = Vec::with_capacity(MAX_ITEMS);
    for item in deduped {
        if result.len() >= MAX_ITEMS {
            break;
        }
        let count = per_topic.entry(item.topic).or_insert(0);
        if *count >= MAX_PER_TOPIC {
            continue;
        }
        *count += 1;
        result.push(item);
    }

    result
}

fn is_displayable(item: &NewsItem) -> bool {
    !item.url.is_empty()
        && !item.title.is_empty()
        && !REDIRECT_MARKERS.iter().any(|m| item.url.contains(m))
}
