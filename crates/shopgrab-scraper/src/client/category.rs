//! Category listing extraction for `StorefrontClient`.

use reqwest::Url;
use shopgrab_core::CategoryEntry;

use crate::error::ScraperError;
use crate::listing::{parse_listing_page, show_more_url};

use super::origin::{origin_url, parse_page_url};
use super::StorefrontClient;

impl StorefrontClient {
    /// Lists the product tiles on a Shopify collection page.
    ///
    /// Fetches `category_url`, returns an empty list if the page is not a
    /// Shopify storefront, and otherwise pairs listing titles with images.
    ///
    /// The first page's tiles are followed by a second extraction pass over
    /// the "current" page: the "show more" target if the first page has one,
    /// otherwise the first page again, so its tiles appear twice. The second
    /// page's own "show more" is not followed.
    ///
    /// Network failures, timeouts, and non-2xx responses on either page yield
    /// an empty list (logged at `warn`), never partial results.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `category_url` is not an
    /// absolute `http`/`https` URL.
    pub async fn extract_category(
        &self,
        category_url: &str,
    ) -> Result<Vec<CategoryEntry>, ScraperError> {
        let page_url = parse_page_url(category_url)?;
        let origin = origin_url(category_url)?;

        match self.collect_category(&page_url, &origin).await {
            Err(e) if e.is_fetch_failure() => {
                tracing::warn!(url = %page_url, error = %e, "category fetch failed; returning no entries");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn collect_category(
        &self,
        page_url: &Url,
        origin: &Url,
    ) -> Result<Vec<CategoryEntry>, ScraperError> {
        let body = self.fetch_html(page_url.as_str()).await?;
        let first = parse_listing_page(&body, origin);

        if !first.is_shopify {
            tracing::info!(url = %page_url, "not a Shopify storefront; skipping category");
            return Ok(Vec::new());
        }

        let mut entries = first.entries.clone();
        tracing::debug!(url = %page_url, entries = entries.len(), "parsed listing page");

        let Some(href) = first.show_more_href else {
            tracing::debug!(url = %page_url, "no show-more link; re-reading current page");
            entries.extend(first.entries);
            return Ok(entries);
        };

        let next_url = show_more_url(origin, &href);
        tracing::debug!(url = %next_url, "following show-more link");
        let next_body = self.fetch_html(&next_url).await?;
        let next = parse_listing_page(&next_body, origin);
        tracing::debug!(url = %next_url, entries = next.entries.len(), "parsed show-more page");

        entries.extend(next.entries);
        Ok(entries)
    }
}
