//! Shopify storefront detection.

use std::sync::LazyLock;

use scraper::{Html, Selector};

/// Substring Shopify's storefront bootstrap script writes into every theme.
pub const SHOPIFY_MARKER: &str = "Shopify.cdnHost";

static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid script selector"));

/// Returns `true` if any `<script>` block on the page mentions
/// [`SHOPIFY_MARKER`].
///
/// Heuristic: a custom theme that strips the bootstrap script is reported as
/// not Shopify.
#[must_use]
pub fn is_shopify_store(document: &Html) -> bool {
    document
        .select(&SCRIPT)
        .any(|script| script.text().collect::<String>().contains(SHOPIFY_MARKER))
}

/// Parses `html` and runs [`is_shopify_store`] on it.
#[must_use]
pub fn page_is_shopify(html: &str) -> bool {
    is_shopify_store(&Html::parse_document(html))
}
