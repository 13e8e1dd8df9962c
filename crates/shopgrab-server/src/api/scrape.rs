//! `POST /categories` and `POST /product`.
//!
//! Both take `{"url": "..."}`. Any failure (unreadable body, invalid URL,
//! unexpected scraper error) is a bare 500 with no body; the cause only goes
//! to the log. Fetch failures and non-Shopify sites are not failures: they
//! come back as `[]` or `null`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use shopgrab_core::{CategoryEntry, ProductRecord};
use shopgrab_scraper::ScraperError;

use crate::middleware::RequestId;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    /// Missing `url` is treated as empty and rejected by URL validation.
    #[serde(default)]
    url: String,
}

/// Opaque failure: the HTTP boundary never reveals why a scrape failed.
#[derive(Debug)]
pub(super) struct ScrapeFailure;

impl IntoResponse for ScrapeFailure {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

fn parse_request(req_id: &RequestId, body: &[u8]) -> Result<ScrapeRequest, ScrapeFailure> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "unreadable scrape request body");
        ScrapeFailure
    })
}

fn scrape_failed(req_id: &RequestId, url: &str, error: &ScraperError) -> ScrapeFailure {
    tracing::error!(request_id = %req_id.0, url, error = %error, "scrape failed");
    ScrapeFailure
}

pub(super) async fn categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Vec<CategoryEntry>>, ScrapeFailure> {
    let request = parse_request(&req_id, &body)?;
    let entries = state
        .client
        .extract_category(&request.url)
        .await
        .map_err(|e| scrape_failed(&req_id, &request.url, &e))?;

    tracing::info!(request_id = %req_id.0, url = %request.url, entries = entries.len(), "category scraped");
    Ok(Json(entries))
}

pub(super) async fn product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Option<ProductRecord>>, ScrapeFailure> {
    let request = parse_request(&req_id, &body)?;
    let record = state
        .client
        .extract_product(&request.url)
        .await
        .map_err(|e| scrape_failed(&req_id, &request.url, &e))?;

    tracing::info!(request_id = %req_id.0, url = %request.url, found = record.is_some(), "product scraped");
    Ok(Json(record))
}
