//! Parsing of Shopify collection listing pages.
//!
//! Targets the listing markup used by the storefront theme: each product tile
//! has a title heading `<h2 class="pt-title prod-thumb-title-color">` wrapping
//! an `<a href>` to the product, and a lazily loaded
//! `<img class="lazyload" data-src="//cdn...">`. A `<div class="show-more">`
//! holds the link to the next batch of products.
//!
//! Titles and images are collected separately in document order and paired by
//! position. When the two lists differ in length the longer one is truncated;
//! tiles whose image sits outside the tile will pair with the wrong title.

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use shopgrab_core::CategoryEntry;

use crate::client::with_https_scheme;
use crate::detect::is_shopify_store;

static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2.pt-title.prod-thumb-title-color").expect("valid title selector")
});
static LAZY_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.lazyload").expect("valid image selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));
static SHOW_MORE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.show-more").expect("valid show-more selector"));

/// Everything the category extractor needs from one listing page.
#[derive(Debug, PartialEq, Eq)]
pub struct ListingPage {
    pub is_shopify: bool,
    pub entries: Vec<CategoryEntry>,
    /// Raw `href` of the first "show more" control's anchor, if any.
    pub show_more_href: Option<String>,
}

/// Parses one listing page. `origin` is the store origin used to resolve
/// product links.
#[must_use]
pub fn parse_listing_page(html: &str, origin: &Url) -> ListingPage {
    let document = Html::parse_document(html);
    ListingPage {
        is_shopify: is_shopify_store(&document),
        entries: extract_entries(&document, origin),
        show_more_href: find_show_more_href(&document),
    }
}

/// Pairs listing titles with lazy images by position and builds entries.
///
/// Pairs missing a `data-src`, an anchor, or a resolvable `href` are skipped.
#[must_use]
pub fn extract_entries(document: &Html, origin: &Url) -> Vec<CategoryEntry> {
    document
        .select(&TITLE)
        .zip(document.select(&LAZY_IMAGE))
        .filter_map(|(title, image)| build_entry(title, image, origin))
        .collect()
}

fn build_entry(title: ElementRef<'_>, image: ElementRef<'_>, origin: &Url) -> Option<CategoryEntry> {
    let text = title.text().collect::<String>().trim().to_owned();

    let Some(src) = image.value().attr("data-src") else {
        tracing::debug!(title = %text, "listing image has no data-src; skipping tile");
        return None;
    };

    let Some(href) = title
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        tracing::debug!(title = %text, "listing title has no link; skipping tile");
        return None;
    };

    let link = match origin.join(href.trim()) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!(title = %text, href, error = %e, "unresolvable listing link; skipping tile");
            return None;
        }
    };

    Some(CategoryEntry {
        title: text,
        image: with_https_scheme(src.trim()),
        link,
    })
}

fn find_show_more_href(document: &Html) -> Option<String> {
    document
        .select(&SHOW_MORE)
        .next()?
        .select(&ANCHOR)
        .next()?
        .value()
        .attr("href")
        .map(|href| href.trim().to_owned())
        .filter(|href| !href.is_empty())
}

/// Builds the URL of the "show more" page.
///
/// The theme emits the link without a leading slash, so it is appended to the
/// origin behind a `/`. A leading slash, if present, is not doubled. Absolute
/// links are used as-is.
#[must_use]
pub fn show_more_url(origin: &Url, href: &str) -> String {
    if let Ok(absolute) = Url::parse(href) {
        return absolute.to_string();
    }
    format!(
        "{}/{}",
        origin.origin().ascii_serialization(),
        href.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOPIFY_SCRIPT: &str = r#"<script>Shopify.cdnHost = "shop.example.com/cdn";</script>"#;

    fn origin() -> Url {
        Url::parse("https://shop.example.com").unwrap()
    }

    fn tile(title: &str, href: &str) -> String {
        format!(
            r#"<div class="product"><h2 class="pt-title prod-thumb-title-color"><a href="{href}">
                {title}
            </a></h2></div>"#
        )
    }

    fn image(src: &str) -> String {
        format!(r#"<img class="lazyload" data-src="{src}" alt="">"#)
    }

    #[test]
    fn pairs_titles_and_images_in_document_order() {
        let html = format!(
            "<html><head>{SHOPIFY_SCRIPT}</head><body>{}{}{}{}</body></html>",
            image("//cdn.example.com/a.jpg"),
            tile("Alpha Tee", "/products/alpha"),
            image("//cdn.example.com/b.jpg"),
            tile("Beta Tee", "/products/beta"),
        );
        let page = parse_listing_page(&html, &origin());

        assert!(page.is_shopify);
        assert_eq!(
            page.entries,
            vec![
                CategoryEntry {
                    title: "Alpha Tee".into(),
                    image: "https://cdn.example.com/a.jpg".into(),
                    link: "https://shop.example.com/products/alpha".into(),
                },
                CategoryEntry {
                    title: "Beta Tee".into(),
                    image: "https://cdn.example.com/b.jpg".into(),
                    link: "https://shop.example.com/products/beta".into(),
                },
            ]
        );
        assert_eq!(page.show_more_href, None);
    }

    #[test]
    fn more_titles_than_images_truncates_to_images() {
        let html = format!(
            "{SHOPIFY_SCRIPT}{}{}{}{}{}",
            tile("One", "/products/one"),
            tile("Two", "/products/two"),
            tile("Three", "/products/three"),
            image("//cdn.example.com/1.jpg"),
            image("//cdn.example.com/2.jpg"),
        );
        let page = parse_listing_page(&html, &origin());
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[1].title, "Two");
    }

    #[test]
    fn more_images_than_titles_truncates_to_titles() {
        let html = format!(
            "{SHOPIFY_SCRIPT}{}{}{}",
            tile("Only", "/products/only"),
            image("//cdn.example.com/1.jpg"),
            image("//cdn.example.com/2.jpg"),
        );
        let page = parse_listing_page(&html, &origin());
        assert_eq!(page.entries.len(), 1);
    }

    #[test]
    fn headings_need_both_classes() {
        let html = format!(
            r#"{SHOPIFY_SCRIPT}<h2 class="pt-title"><a href="/products/x">X</a></h2>{}"#,
            image("//cdn.example.com/x.jpg"),
        );
        assert!(parse_listing_page(&html, &origin()).entries.is_empty());
    }

    #[test]
    fn tile_without_data_src_is_skipped() {
        let html = format!(
            r#"{SHOPIFY_SCRIPT}{}<img class="lazyload" src="/placeholder.gif">"#,
            tile("No Image", "/products/none"),
        );
        assert!(parse_listing_page(&html, &origin()).entries.is_empty());
    }

    #[test]
    fn absolute_links_and_images_are_kept() {
        let html = format!(
            "{SHOPIFY_SCRIPT}{}{}",
            tile("Abs", "https://other.example.com/products/abs"),
            image("https://cdn.example.com/abs.jpg"),
        );
        let page = parse_listing_page(&html, &origin());
        assert_eq!(page.entries[0].link, "https://other.example.com/products/abs");
        assert_eq!(page.entries[0].image, "https://cdn.example.com/abs.jpg");
    }

    #[test]
    fn finds_show_more_href() {
        let html = format!(
            r#"{SHOPIFY_SCRIPT}<div class="show-more"><a href="collections/all?page=2">Show more</a></div>"#
        );
        let page = parse_listing_page(&html, &origin());
        assert_eq!(page.show_more_href.as_deref(), Some("collections/all?page=2"));
    }

    #[test]
    fn show_more_without_anchor_is_ignored() {
        let html = format!(r#"{SHOPIFY_SCRIPT}<div class="show-more"><span>No more</span></div>"#);
        assert_eq!(parse_listing_page(&html, &origin()).show_more_href, None);
    }

    #[test]
    fn non_shopify_page_is_flagged() {
        let html = format!(
            "<script>var x = 1;</script>{}{}",
            tile("Elsewhere", "/p/1"),
            image("//cdn.example.com/1.jpg")
        );
        let page = parse_listing_page(&html, &origin());
        assert!(!page.is_shopify);
    }

    #[test]
    fn show_more_url_inserts_separator() {
        assert_eq!(
            show_more_url(&origin(), "collections/all?page=2"),
            "https://shop.example.com/collections/all?page=2"
        );
    }

    #[test]
    fn show_more_url_does_not_double_leading_slash() {
        assert_eq!(
            show_more_url(&origin(), "/collections/all?page=2"),
            "https://shop.example.com/collections/all?page=2"
        );
    }

    #[test]
    fn show_more_url_keeps_absolute_links() {
        assert_eq!(
            show_more_url(&origin(), "https://shop.example.com/collections/all?page=2"),
            "https://shop.example.com/collections/all?page=2"
        );
    }
}
