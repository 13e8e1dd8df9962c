//! Normalization from a raw [`ProductJs`] payload to a
//! [`shopgrab_core::ProductRecord`].

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use shopgrab_core::{ProductRecord, ProductVariantOption};

use crate::client::with_https_scheme;
use crate::description::normalize_description;
use crate::error::ScraperError;
use crate::types::{ProductJs, VariantJs};

/// Converts a minor-unit integer price to major units (`1999` → `19.99`).
#[must_use]
pub fn minor_units_to_decimal(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Normalizes a raw [`ProductJs`] into a [`ProductRecord`].
///
/// `source_url` is only used to label errors.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedProduct`] if the product has no variants,
/// or if the product title, price, or featured image, or any variant title or
/// price, is missing.
pub fn normalize_product(
    product: ProductJs,
    source_url: &str,
) -> Result<ProductRecord, ScraperError> {
    let malformed = |reason: String| ScraperError::MalformedProduct {
        url: source_url.to_owned(),
        reason,
    };

    if product.variants.is_empty() {
        return Err(malformed("product has no variants".into()));
    }

    let title = product
        .title
        .ok_or_else(|| malformed("missing product title".into()))?;
    let price = product
        .price
        .map(minor_units_to_decimal)
        .ok_or_else(|| malformed("missing product price".into()))?;
    let featured_image = product
        .featured_image
        .filter(|src| !src.is_empty())
        .ok_or_else(|| malformed("missing product featured_image".into()))?;

    let available_variant_count = product.variants.iter().filter(|v| v.available).count();

    let options = product
        .variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| normalize_variant(variant, idx))
        .collect::<Result<Vec<_>, String>>()
        .map_err(malformed)?;

    let distinct_image_urls: BTreeSet<String> =
        options.iter().filter_map(|o| o.image_url.clone()).collect();
    let representative_sku = options
        .first()
        .map(|o| o.sku.clone())
        .unwrap_or_default();

    tracing::debug!(
        product_id = product.id,
        variants = options.len(),
        images = distinct_image_urls.len(),
        "normalized product payload"
    );

    Ok(ProductRecord {
        title,
        price,
        variant_count: options.len(),
        available_variant_count,
        distinct_image_urls,
        main_image_url: with_https_scheme(&featured_image),
        representative_sku,
        description: normalize_description(product.description.as_deref().unwrap_or_default()),
        options,
    })
}

/// Builds the option for the variant at position `idx`.
///
/// Returns the malformation reason on failure so the caller can attach the URL.
fn normalize_variant(variant: VariantJs, idx: usize) -> Result<ProductVariantOption, String> {
    let label = variant
        .id
        .map_or_else(|| format!("at index {idx}"), |id| id.to_string());

    let name = variant
        .title
        .ok_or_else(|| format!("variant {label} has no title"))?;
    let price = variant
        .price
        .map(minor_units_to_decimal)
        .ok_or_else(|| format!("variant {label} has no price"))?;
    let image_url = variant
        .featured_image
        .map(|image| image.src)
        .filter(|src| !src.is_empty());

    Ok(ProductVariantOption {
        sku: variant.sku.unwrap_or_default(),
        name,
        price,
        image_url,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
