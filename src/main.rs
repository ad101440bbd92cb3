use anyhow::Result;
use clap::Parser;
use script_scraper::{
    CatalogBuilder, Config, DetailLoader, HttpFetcher, PageFetcher, QuestionAnswerer, Shell,
    TranscriptWriter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "script-scraper")]
#[command(about = "Search movie transcripts and ask questions about them")]
struct Cli {
    /// Configuration file (defaults to ./script-scraper.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of listing pages to crawl
    #[arg(long)]
    max_pages: Option<u32>,

    /// Directory for saved transcripts and analyses
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env may carry the API key; ignore if missing
    dotenvy::dotenv().ok();

    let default_filter = if cli.verbose {
        "script_scraper=debug,warn"
    } else {
        "script_scraper=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };
    if let Some(max_pages) = cli.max_pages {
        config.site.max_pages = max_pages;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output.output_dir = output_dir;
    }
    config.validate()?;

    println!("Welcome to ScriptScraperAI");
    println!("Initializing...");
    info!("{}", config.summary());

    let answerer = if config.llm.is_usable() {
        match QuestionAnswerer::new(&config.llm) {
            Ok(answerer) => Some(answerer),
            Err(e) => {
                warn!("Question answering unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };
    if answerer.is_none() {
        println!("WARNING: OpenAI API key not set. AI functionality will not work.");
    }

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.site)?);
    let (catalog, report) = CatalogBuilder::new(fetcher.clone(), &config.site)
        .build(config.site.max_pages)
        .await;
    if report.site_unreachable() {
        warn!("⚠️ No listing page could be fetched from {}", config.site.base_url);
    }

    let loader = DetailLoader::new(fetcher, &config.site.base_url)?;
    let writer = TranscriptWriter::new(config.output.output_dir.clone());

    let stdin = std::io::stdin();
    let mut shell = Shell::new(&catalog, &loader, &writer, stdin.lock(), std::io::stdout())
        .with_answerer(answerer.as_ref())
        .with_preview_chars(config.output.preview_chars);
    shell.run().await
}
