//! HTTP client for catalog pages
//!
//! Provides a thin client that handles:
//! - Building the page URL from the base URL
//! - Request timeout
//! - Status checking and JSON body parsing
//! - Error classification for retry decisions
//!
//! Retrying is not done here. The collector owns the attempt loop so that
//! retry delays and page pacing live in one place.

use crate::collector::PageSource;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Longest slice of an error body kept in [`Error::HttpStatus`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Query parameter carrying the page number
    pub page_param: String,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            page_param: "page".to_string(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client bound to one catalog endpoint
pub struct HttpClient {
    client: Client,
    base_url: String,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client for `base_url` with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, HttpClientConfig::default())
    }

    /// Create a client for `base_url` with custom configuration
    pub fn with_config(base_url: impl Into<String>, config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            config,
        })
    }

    /// The endpoint this client pages through
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build the URL for a page number.
    ///
    /// An unparsable base URL surfaces here as [`Error::InvalidUrl`], which the
    /// collector treats like any other non-retryable request failure.
    pub fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair(&self.config.page_param, &page.to_string());
        Ok(url)
    }

    /// GET a URL and parse the body as JSON
    pub async fn get_json(&self, url: Url) -> Result<Value> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), truncate(&body)));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let json: Value = serde_json::from_slice(&bytes)?;

        debug!("Request succeeded: GET {url} ({} bytes)", bytes.len());
        Ok(json)
    }

    /// Map a transport error, keeping the configured timeout on timeouts
    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            return Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            };
        }
        Error::Http(e)
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        let url = self.page_url(page)?;
        self.get_json(url).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
