//! Product detail extraction for `StorefrontClient`.

use reqwest::Url;
use shopgrab_core::ProductRecord;

use crate::detect::page_is_shopify;
use crate::error::ScraperError;
use crate::normalize::normalize_product;
use crate::types::ProductJs;

use super::origin::{parse_page_url, product_js_url};
use super::StorefrontClient;

impl StorefrontClient {
    /// Fetches and normalizes one product page.
    ///
    /// The HTML page is fetched first to confirm the site is a Shopify
    /// storefront; the product data itself comes from the `<product-url>.js`
    /// endpoint.
    ///
    /// Returns `Ok(None)` when the page is not a Shopify storefront, when
    /// either fetch fails or returns a non-2xx status, or when the payload is
    /// malformed (e.g., no variants). Failures are logged at `warn`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `product_url` is not an
    /// absolute `http`/`https` URL.
    pub async fn extract_product(
        &self,
        product_url: &str,
    ) -> Result<Option<ProductRecord>, ScraperError> {
        let page_url = parse_page_url(product_url)?;

        match self.collect_product(&page_url).await {
            Err(e) if e.is_fetch_failure() || e.is_malformed_product() => {
                tracing::warn!(url = %page_url, error = %e, "product extraction failed; returning null");
                Ok(None)
            }
            other => other,
        }
    }

    async fn collect_product(&self, page_url: &Url) -> Result<Option<ProductRecord>, ScraperError> {
        let body = self.fetch_html(page_url.as_str()).await?;
        if !page_is_shopify(&body) {
            tracing::info!(url = %page_url, "not a Shopify storefront; skipping product");
            return Ok(None);
        }

        let js_url = product_js_url(page_url);
        let payload = self.fetch_json_text(&js_url).await?;
        let product = serde_json::from_str::<ProductJs>(&payload).map_err(|source| {
            ScraperError::Deserialize {
                context: format!("product payload from {js_url}"),
                source,
            }
        })?;

        normalize_product(product, &js_url).map(Some)
    }
}
