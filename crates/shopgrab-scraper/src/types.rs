//! Shopify `<product-url>.js` payload types.
//!
//! ## Observed shape
//!
//! The storefront AJAX endpoint (`/products/<handle>.js`) differs from the
//! `products.json` admin-style shape:
//!
//! - Prices are **integers in minor units** (`2500` for 25.00), at both product
//!   and variant level.
//! - `featured_image` on the product is a **protocol-relative string**
//!   (`"//cdn.shopify.com/s/files/..."`).
//! - `featured_image` on a variant is an **object** with a `src` field, or
//!   `null` when no image is assigned to the variant.
//! - `description` is raw HTML and may be an empty string.
//! - `sku` is `null` or `""` on variants without one.
//!
//! Every field is optional here; required ones are enforced in
//! [`crate::normalize`] so a missing field becomes a typed error instead of a
//! deserialization failure deep in the payload.

use serde::Deserialize;

/// Top-level product payload from `GET /products/<handle>.js`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductJs {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    /// Raw HTML description.
    #[serde(default)]
    pub description: Option<String>,

    /// Price of the cheapest variant in minor units.
    #[serde(default)]
    pub price: Option<i64>,

    /// Protocol-relative URL of the featured image.
    #[serde(default)]
    pub featured_image: Option<String>,

    #[serde(default)]
    pub variants: Vec<VariantJs>,
}

/// One variant inside a [`ProductJs`].
#[derive(Debug, Clone, Deserialize)]
pub struct VariantJs {
    #[serde(default)]
    pub id: Option<i64>,

    /// Variant display title, e.g. `"Red / M"`.
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub sku: Option<String>,

    /// Variant price in minor units.
    #[serde(default)]
    pub price: Option<i64>,

    /// Defaults to `true` when absent.
    #[serde(default = "default_available")]
    pub available: bool,

    #[serde(default)]
    pub featured_image: Option<VariantImageJs>,
}

/// Image object attached to a [`VariantJs`].
#[derive(Debug, Clone, Deserialize)]
pub struct VariantImageJs {
    pub src: String,
}

fn default_available() -> bool {
    true
}
