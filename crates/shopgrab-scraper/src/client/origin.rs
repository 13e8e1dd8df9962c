//! URL parsing, origin extraction, and Shopify URL conventions.

use reqwest::Url;

use crate::error::ScraperError;

/// Parses a caller-supplied page URL, accepting only absolute `http`/`https`
/// URLs (the URL parser rejects those without a host).
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] for relative URLs or other schemes.
pub fn parse_page_url(raw: &str) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    Ok(url)
}

/// Extracts the scheme+host origin from a storefront page URL.
///
/// Given `"https://shop.example.com/collections/all?page=2"`, returns
/// `"https://shop.example.com"`. Non-default ports are kept.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `page_url` is not an absolute
/// `http`/`https` URL.
pub fn extract_store_origin(page_url: &str) -> Result<String, ScraperError> {
    parse_page_url(page_url).map(|url| url.origin().ascii_serialization())
}

/// Store origin of `page_url` as a join base for relative links.
pub(crate) fn origin_url(page_url: &str) -> Result<Url, ScraperError> {
    let origin = extract_store_origin(page_url)?;
    Url::parse(&origin).map_err(|e| ScraperError::InvalidUrl {
        url: page_url.to_owned(),
        reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
    })
}

/// Builds the Shopify `<product-url>.js` endpoint for a product page.
///
/// Query string and fragment are dropped first (`?variant=123` would otherwise
/// swallow the suffix), as is a trailing slash.
#[must_use]
pub fn product_js_url(product_url: &Url) -> String {
    let mut url = product_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    format!("{}.js", url.as_str().trim_end_matches('/'))
}

/// Gives protocol-relative asset URLs (`//cdn.shopify.com/...`) an `https:`
/// scheme. Values that already carry a scheme are returned unchanged.
#[must_use]
pub fn with_https_scheme(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_owned()
    } else {
        format!("https:{raw}")
    }
}
