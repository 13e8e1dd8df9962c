//! Value types returned by the category and product extractors.
//!
//! JSON keys follow the storefront API contract that clients already consume
//! (`value`, `total_products`, `valor`, ...), so serde renames map the Rust
//! field names onto them.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product tile from a Shopify collection listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Trimmed visible title of the listing tile.
    pub title: String,
    /// Absolute image URL (the listing stores protocol-relative `data-src` values).
    pub image: String,
    /// Absolute URL of the product page, resolved against the store origin.
    pub link: String,
}

/// A single purchasable variant of a [`ProductRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantOption {
    /// Empty when the storefront does not assign a SKU to the variant.
    pub sku: String,
    /// Variant display title, e.g. `"Red / M"` or `"Default Title"`.
    pub name: String,
    /// Variant price in major currency units (`minor / 100`).
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Variant image `src` exactly as the storefront reports it; `None` when
    /// the storefront assigns no image to the variant.
    pub image_url: Option<String>,
}

/// Normalized detail for one product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    /// Product price in major currency units (`minor / 100`).
    #[serde(rename = "value", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Number of variants, regardless of availability.
    #[serde(rename = "total_products")]
    pub variant_count: usize,
    /// Number of variants currently flagged as purchasable.
    #[serde(rename = "total_available")]
    pub available_variant_count: usize,
    /// Each distinct variant image URL once. Variants without an image add
    /// nothing. Serialized in sorted order.
    #[serde(rename = "images")]
    pub distinct_image_urls: BTreeSet<String>,
    /// Absolute URL of the product's featured image.
    #[serde(rename = "image_main_url")]
    pub main_image_url: String,
    /// SKU of the first variant.
    #[serde(rename = "sku")]
    pub representative_sku: String,
    /// Single-line plain text flattened from the HTML description.
    pub description: String,
    /// Variants in storefront order.
    pub options: Vec<ProductVariantOption>,
}
