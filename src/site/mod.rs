/// Transcript site access
///
/// Fetching, markup extraction, catalog crawling and detail loading for the
/// movie transcript site.

pub mod fetcher;
pub mod extract;
pub mod catalog;
pub mod detail;

// Re-export main types
pub use fetcher::{HttpFetcher, PageFetcher};
pub use catalog::{Catalog, CatalogBuilder, CrawlReport};
pub use detail::DetailLoader;

use serde::{Deserialize, Serialize};

/// Append a site-relative path to the site root.
///
/// Any path on the root is kept, and the result always stays on the root's
/// host.
pub fn site_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// A movie listed on the site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Anchor text, trimmed
    pub title: String,
    /// Relative URL path of the movie page
    pub link: String,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// A catalog entry matched by a search, numbered from 1 in match order
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub ordinal: usize,
    pub title: String,
    pub link: String,
}

/// Title, plot and transcript of a single movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub title: String,
    pub plot: String,
    pub transcript: String,
}

impl MovieDetail {
    pub const NO_TITLE: &'static str = "No title available";
    pub const NO_PLOT: &'static str = "No plot available";
    pub const NO_TRANSCRIPT: &'static str = "No transcript available";

    /// Stand-in returned when the movie page could not be loaded at all
    pub fn unavailable() -> Self {
        Self {
            title: "Error loading movie".to_string(),
            plot: "Could not retrieve plot".to_string(),
            transcript: "Could not retrieve transcript".to_string(),
        }
    }
}
