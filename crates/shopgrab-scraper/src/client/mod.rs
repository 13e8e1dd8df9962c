//! HTTP client for Shopify storefront pages and `<product>.js` payloads.

mod category;
mod origin;
mod product;

use std::time::Duration;

use reqwest::Client;
use shopgrab_core::AppConfig;

use crate::error::ScraperError;

pub use origin::{extract_store_origin, parse_page_url, product_js_url, with_https_scheme};

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
const JSON_ACCEPT: &str = "application/json,text/javascript;q=0.9,*/*;q=0.8";

/// Outbound fetch settings shared by the category and product extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Total time allowed for one request, body included.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl FetchConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.scraper_request_timeout_secs,
            connect_timeout_secs: config.scraper_connect_timeout_secs,
            user_agent: config.scraper_user_agent.clone(),
        }
    }
}

/// Stateless storefront client.
///
/// Holds only the pooled `reqwest::Client`, so one instance can be shared
/// across concurrent requests. Every call re-fetches from the storefront.
/// Timeouts surface as [`ScraperError::Http`], the same failure class as a
/// non-2xx status.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with the configured timeouts and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &FetchConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        self.fetch_text(url, HTML_ACCEPT).await
    }

    async fn fetch_json_text(&self, url: &str) -> Result<String, ScraperError> {
        self.fetch_text(url, JSON_ACCEPT).await
    }

    /// GETs `url` and returns the body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] for network, TLS, or timeout failures.
    async fn fetch_text(&self, url: &str, accept: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched storefront page");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
