use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed product payload from {url}: {reason}")]
    MalformedProduct { url: String, reason: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ScraperError {
    /// `true` for network failures, timeouts, and non-2xx responses.
    ///
    /// Extractors degrade these to an empty listing or a missing product.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }

    /// `true` when the product `.js` payload cannot be turned into a record.
    #[must_use]
    pub fn is_malformed_product(&self) -> bool {
        matches!(self, Self::Deserialize { .. } | Self::MalformedProduct { .. })
    }
}
