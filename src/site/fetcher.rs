/// Page fetching over HTTP
use crate::config::SiteConfig;
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Source of raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the markup at an absolute URL
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `PageFetcher` backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScrapeError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let html_content = response.text().await?;
        debug!("📄 Downloaded {} characters from {}", html_content.len(), url);
        Ok(html_content)
    }
}
