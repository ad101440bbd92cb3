/// Movie page loading
use super::{extract, site_url, MovieDetail, PageFetcher};
use crate::error::Result;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Fetches and extracts a single movie's title, plot and transcript
pub struct DetailLoader {
    fetcher: Arc<dyn PageFetcher>,
    base_url: String,
}

impl DetailLoader {
    pub fn new(fetcher: Arc<dyn PageFetcher>, base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;

        Ok(Self {
            fetcher,
            base_url: base_url.to_string(),
        })
    }

    /// Absolute URL for a relative movie link, built like the listing URLs
    pub fn movie_url(&self, link: &str) -> String {
        site_url(&self.base_url, link)
    }

    /// Load a movie page.
    ///
    /// Missing fields fall back to their own placeholder; only a failed
    /// fetch or a page without the main article is an error.
    pub async fn load(&self, link: &str) -> Result<MovieDetail> {
        let url = self.movie_url(link);
        info!("🎬 Fetching movie details: {}", url);

        let html = self.fetcher.fetch(&url).await?;
        let fields = extract::extract_detail(&html)?;

        Ok(MovieDetail {
            title: fields.title.unwrap_or_else(|| MovieDetail::NO_TITLE.to_string()),
            plot: fields.plot.unwrap_or_else(|| MovieDetail::NO_PLOT.to_string()),
            transcript: fields
                .transcript
                .unwrap_or_else(|| MovieDetail::NO_TRANSCRIPT.to_string()),
        })
    }

    /// Load a movie page, substituting [`MovieDetail::unavailable`] on failure
    pub async fn load_or_placeholder(&self, link: &str) -> MovieDetail {
        match self.load(link).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Error fetching movie info for {}: {}", link, e);
                MovieDetail::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use async_trait::async_trait;

    struct FixedFetcher {
        url: &'static str,
        html: &'static str,
    }

    #[async_trait]
    impl PageFetcher for FixedFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            if url == self.url {
                Ok(self.html.to_string())
            } else {
                Err(ScrapeError::parse(format!("unexpected url {}", url)))
            }
        }
    }

    fn loader(html: &'static str) -> DetailLoader {
        let fetcher = FixedFetcher {
            url: "https://example.test/movie/Alien-78748",
            html,
        };
        DetailLoader::new(Arc::new(fetcher), "https://example.test").unwrap()
    }

    #[test]
    fn test_movie_url() {
        let loader = loader("");
        assert_eq!(loader.movie_url("/movie/Alien-78748"), "https://example.test/movie/Alien-78748");
    }

    #[test]
    fn test_movie_url_keeps_base_path_and_host() {
        let loader = DetailLoader::new(
            Arc::new(FixedFetcher { url: "", html: "" }),
            "https://mirror.test/subs/",
        )
        .unwrap();

        assert_eq!(loader.movie_url("/movie/X"), "https://mirror.test/subs/movie/X");
        assert_eq!(loader.movie_url("movie/X"), "https://mirror.test/subs/movie/X");
        assert_eq!(loader.movie_url("//other.test/x"), "https://mirror.test/subs/other.test/x");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let fetcher = Arc::new(FixedFetcher { url: "", html: "" });
        assert!(matches!(
            DetailLoader::new(fetcher, "not a url"),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_load_full_page() {
        let loader = loader(
            r#"<article class="main-article"><h1>Alien</h1><p class="plot">In space.</p>
               <div class="full-script"><p>Mother?</p><p>Ripley here.</p></div></article>"#,
        );

        let detail = loader.load("/movie/Alien-78748").await.unwrap();
        assert_eq!(detail.title, "Alien");
        assert_eq!(detail.plot, "In space.");
        assert_eq!(detail.transcript, "Mother?\nRipley here.");
    }

    #[tokio::test]
    async fn test_missing_plot_uses_placeholder() {
        let loader = loader(
            r#"<article class="main-article"><h1>Alien</h1>
               <div class="full-script">Mother?</div></article>"#,
        );

        let detail = loader.load("/movie/Alien-78748").await.unwrap();
        assert_eq!(detail.title, "Alien");
        assert_eq!(detail.plot, MovieDetail::NO_PLOT);
        assert_eq!(detail.transcript, "Mother?");
    }

    #[tokio::test]
    async fn test_empty_article_uses_all_field_placeholders() {
        let loader = loader(r#"<article class="main-article"></article>"#);

        let detail = loader.load("/movie/Alien-78748").await.unwrap();
        assert_eq!(detail.title, MovieDetail::NO_TITLE);
        assert_eq!(detail.plot, MovieDetail::NO_PLOT);
        assert_eq!(detail.transcript, MovieDetail::NO_TRANSCRIPT);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_an_error() {
        let loader = loader("");
        assert!(loader.load("/movie/Other").await.is_err());
        assert_eq!(loader.load_or_placeholder("/movie/Other").await, MovieDetail::unavailable());
    }

    #[tokio::test]
    async fn test_page_without_article_is_unavailable() {
        let loader = loader("<html><body><h1>Not found</h1></body></html>");
        assert!(matches!(
            loader.load("/movie/Alien-78748").await,
            Err(ScrapeError::Parse(_))
        ));
        assert_eq!(
            loader.load_or_placeholder("/movie/Alien-78748").await,
            MovieDetail::unavailable()
        );
    }
}
