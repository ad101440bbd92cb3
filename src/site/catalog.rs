/// Catalog crawling across the paginated movie listing
use super::{extract, site_url, CatalogEntry, PageFetcher, SearchResult};
use crate::config::SiteConfig;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Ordered list of movies gathered from the listing pages.
///
/// Order follows the site's pagination order; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.link.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive title search, see [`crate::search::search`]
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        crate::search::search(&self.entries, query)
    }
}

/// What happened during a crawl, so an unreachable site can be told apart
/// from an empty listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlReport {
    /// Page count reported by the site, 1 when discovery failed
    pub total_pages: u32,
    /// Whether the pagination widget could not be read
    pub discovery_failed: bool,
    /// Pages actually requested: `min(total_pages, max_pages)`
    pub pages_requested: u32,
    /// Pages that failed and contributed no entries
    pub failed_pages: Vec<u32>,
}

impl CrawlReport {
    /// True when every request failed
    pub fn site_unreachable(&self) -> bool {
        self.pages_requested > 0 && self.failed_pages.len() as u32 == self.pages_requested
    }
}

/// Builds a [`Catalog`] by walking the listing pages one at a time
pub struct CatalogBuilder {
    fetcher: Arc<dyn PageFetcher>,
    listing_url: String,
    page_delay: Duration,
}

impl CatalogBuilder {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &SiteConfig) -> Self {
        let listing_url = site_url(&config.base_url, &config.listing_path);

        Self {
            fetcher,
            listing_url,
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }

    /// URL of one listing page
    pub fn page_url(&self, page: u32) -> String {
        format!("{}?page={}", self.listing_url, page)
    }

    /// Number of listing pages the site advertises
    pub async fn discover_total_pages(&self) -> Result<u32> {
        let html = self.fetcher.fetch(&self.listing_url).await?;
        extract::extract_last_page(&html)
    }

    /// Entries on a single listing page
    pub async fn fetch_listing_page(&self, page: u32) -> Result<Vec<CatalogEntry>> {
        let html = self.fetcher.fetch(&self.page_url(page)).await?;
        extract::extract_listing(&html)
    }

    /// Crawl up to `max_pages` listing pages.
    ///
    /// Never fails: a discovery failure crawls a single page, and a failed
    /// page contributes nothing while the crawl continues.
    pub async fn build(&self, max_pages: u32) -> (Catalog, CrawlReport) {
        info!("🔍 Discovering listing pages at {}", self.listing_url);

        let mut report = CrawlReport::default();
        report.total_pages = match self.discover_total_pages().await {
            Ok(pages) => pages,
            Err(e) => {
                warn!("Could not read pagination, fetching a single page: {}", e);
                report.discovery_failed = true;
                1
            }
        };

        report.pages_requested = report.total_pages.min(max_pages);
        info!("📚 Fetching movies from {} of {} pages", report.pages_requested, report.total_pages);

        let mut entries = Vec::new();
        for page in 1..=report.pages_requested {
            if page > 1 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            info!("📄 Fetching page {}/{}", page, report.pages_requested);
            match self.fetch_listing_page(page).await {
                Ok(page_entries) => {
                    debug!("Page {} listed {} movies", page, page_entries.len());
                    entries.extend(page_entries);
                }
                Err(e) => {
                    warn!("Error fetching page {}: {}", page, e);
                    report.failed_pages.push(page);
                }
            }
        }

        info!("✅ Total movies fetched: {}", entries.len());
        (Catalog::new(entries), report)
    }
}
