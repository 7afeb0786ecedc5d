//! Search page fetcher.
//!
//! ### Request shape
//! - One GET to the configured results page with `search_query=<query>`.
//! - Browser user agent plus `Accept` and `Accept-Language` headers; the page
//!   is served degraded or refused without them.
//!
//! ### Limits
//! - Bounded request timeout (default: 10s), surfaced as [`FetchError::Timeout`].
//! - Max redirects: 5
//! - Max body bytes: 10MB (configurable)
//! - No retries: exactly one attempt per call.

pub mod error;
pub mod url;

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::{Duration, Instant};
use vidscout_core::AppConfig;
use vidscout_core::config::BROWSER_USER_AGENT;

pub use error::FetchError;
pub use self::url::{UrlError, build_search_url};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Source of raw search result documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the results document for `query`.
    ///
    /// `max_results` is the number of records the caller intends to extract.
    async fn fetch_document(&self, query: &str, max_results: usize) -> Result<String, FetchError>;
}

/// Configuration for the fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Results page URL (default: "https://www.youtube.com/results")
    pub search_url: String,

    /// User agent string (default: desktop Chrome)
    pub user_agent: String,

    /// Accept-Language header (default: "en-US,en;q=0.9")
    pub accept_language: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.youtube.com/results".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            max_bytes: 10 * 1024 * 1024,
            timeout: Duration::from_secs(10),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            search_url: config.search_url.clone(),
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// HTTP fetcher for the platform's search results page.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl DocumentSource for HttpFetcher {
    async fn fetch_document(&self, query: &str, max_results: usize) -> Result<String, FetchError> {
        let start = Instant::now();
        let url = build_search_url(&self.config.search_url, query)?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, &self.config.accept_language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus { status: status.as_u16() });
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(FetchError::TooLarge { size: len as usize, limit: self.config.max_bytes });
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.config.max_bytes {
            return Err(FetchError::TooLarge { size: bytes.len(), limit: self.config.max_bytes });
        }

        tracing::debug!(
            query,
            max_results,
            bytes = bytes.len(),
            fetch_ms = start.elapsed().as_millis() as u64,
            "fetched search page"
        );

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
