/// Title search over the in-memory catalog
use crate::site::{CatalogEntry, SearchResult};

/// Case-insensitive substring search over catalog titles.
///
/// Matches keep catalog order and are numbered 1..=k in match order, so an
/// ordinal is a position in the result set, not in the catalog. An empty
/// query matches every entry.
pub fn search(entries: &[CatalogEntry], query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();

    entries
        .iter()
        .filter(|entry| entry.title.to_lowercase().contains(&needle))
        .enumerate()
        .map(|(i, entry)| SearchResult {
            ordinal: i + 1,
            title: entry.title.clone(),
            link: entry.link.clone(),
        })
        .collect()
}
