/// Script Scraper
///
/// Crawls a movie transcript site into an in-memory catalog, searches it,
/// shows individual transcripts and optionally answers questions about them
/// with an LLM.

pub mod config;
pub mod error;
pub mod site;
pub mod search;
pub mod llm;
pub mod output;
pub mod shell;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::ScrapeError;
pub use crate::site::{
    Catalog, CatalogBuilder, CatalogEntry, CrawlReport, DetailLoader, HttpFetcher, MovieDetail,
    PageFetcher, SearchResult,
};
pub use crate::search::search;
pub use crate::llm::{LLMProvider, QuestionAnswerer, LLM};
pub use crate::output::TranscriptWriter;
pub use crate::shell::Shell;
