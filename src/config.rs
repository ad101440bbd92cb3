use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::llm::LLMProvider;

/// Environment variable holding the LLM API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the script scraper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream site and crawl settings
    pub site: SiteConfig,

    /// Question answering settings
    pub llm: LLMConfig,

    /// Saved file settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root, joined with relative movie links
    pub base_url: String,

    /// Path of the paginated movie listing
    pub listing_path: String,

    /// Upper bound on listing pages fetched per crawl
    pub max_pages: u32,

    /// Fixed pause between listing page fetches (milliseconds)
    pub page_delay_ms: u64,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,

    /// User agent sent with every page request
    pub user_agent: String,
}

/// LLM configuration for transcript question answering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM provider to use
    pub provider: LLMProvider,

    /// API endpoint (for LMStudio and custom providers)
    pub endpoint: Option<String>,

    /// API key (for cloud providers)
    pub api_key: Option<String>,

    /// Model to use
    pub model: String,

    /// Maximum tokens to generate per answer
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Transcript characters sent with each question
    pub max_transcript_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives saved transcripts and analyses
    pub output_dir: PathBuf,

    /// Transcript characters shown in the detail preview
    pub preview_chars: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://subslikescript.com".to_string(),
            listing_path: "/movies".to_string(),
            max_pages: 10,
            page_delay_ms: 500,
            request_timeout_seconds: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            endpoint: None,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 800,
            temperature: 0.7,
            timeout_seconds: 60,
            max_transcript_chars: 14_000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            preview_chars: 500,
        }
    }
}

impl LLMConfig {
    /// Question answering needs a key unless a local endpoint is configured
    pub fn is_usable(&self) -> bool {
        match self.provider {
            LLMProvider::OpenAI => self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty()),
            LLMProvider::LMStudio => self.endpoint.is_some(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, then overlay the environment
    pub fn load() -> Result<Self> {
        let config_paths = [
            "script-scraper.toml",
            "config/script-scraper.toml",
        ];

        let mut config = None;
        for path in &config_paths {
            if Path::new(path).exists() {
                match Self::from_file(Path::new(path)) {
                    Ok(loaded) => {
                        config = Some(loaded);
                        break;
                    }
                    Err(e) => tracing::warn!("Failed to parse config file {}: {}", path, e),
                }
            }
        }

        let mut config = config.unwrap_or_default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&config_str)?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Override settings with environment variables
    pub fn apply_env(&mut self) {
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            if !api_key.trim().is_empty() {
                self.llm.api_key = Some(api_key);
            }
        }

        if let Ok(max_pages) = std::env::var("SCRIPT_SCRAPER_MAX_PAGES") {
            match max_pages.parse() {
                Ok(pages) => self.site.max_pages = pages,
                Err(_) => tracing::warn!("Ignoring invalid SCRIPT_SCRAPER_MAX_PAGES: {}", max_pages),
            }
        }

        if let Ok(base_url) = std::env::var("SCRIPT_SCRAPER_BASE_URL") {
            self.site.base_url = base_url;
        }

        if let Ok(output_dir) = std::env::var("SCRIPT_SCRAPER_OUTPUT_DIR") {
            self.output.output_dir = PathBuf::from(output_dir);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.site.max_pages == 0 {
            return Err(anyhow!("max_pages must be greater than 0"));
        }

        url::Url::parse(&self.site.base_url)
            .map_err(|e| anyhow!("Invalid base_url {}: {}", self.site.base_url, e))?;

        if self.llm.max_transcript_chars == 0 {
            return Err(anyhow!("max_transcript_chars must be greater than 0"));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Script Scraper Configuration:\n\
            - Site: {}{}\n\
            - Max Pages: {}\n\
            - Page Delay: {}ms\n\
            - LLM Provider: {:?} ({})\n\
            - Question Answering: {}\n\
            - Output Directory: {}",
            self.site.base_url,
            self.site.listing_path,
            self.site.max_pages,
            self.site.page_delay_ms,
            self.llm.provider,
            self.llm.model,
            if self.llm.is_usable() { "enabled" } else { "disabled" },
            self.output.output_dir.display(),
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.site.base_url = base_url.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.config.site.max_pages = max_pages;
        self
    }

    pub fn with_page_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.site.page_delay_ms = delay_ms;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.llm.api_key = Some(api_key.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
