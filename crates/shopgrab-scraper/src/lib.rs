pub mod client;
pub mod description;
pub mod detect;
pub mod error;
pub mod listing;
pub mod normalize;
pub mod types;

pub use client::{extract_store_origin, FetchConfig, StorefrontClient};
pub use description::normalize_description;
pub use detect::is_shopify_store;
pub use error::ScraperError;
pub use normalize::normalize_product;
pub use types::{ProductJs, VariantJs};
