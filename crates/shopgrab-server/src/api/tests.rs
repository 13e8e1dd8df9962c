use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use shopgrab_scraper::FetchConfig;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const SHOPIFY_HEAD: &str = r#"<head><script>Shopify.cdnHost = "cdn.example.com";</script></head>"#;

fn test_app() -> Router {
    let client = StorefrontClient::new(&FetchConfig {
        timeout_secs: 2,
        connect_timeout_secs: 2,
        user_agent: "shopgrab-test/0.1".into(),
    })
    .expect("client");
    build_app(AppState { client })
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes")
        .to_vec()
}

async fn mount_shopify_store(server: &MockServer) {
    let listing = format!(
        r#"<html>{SHOPIFY_HEAD}<body>
             <img class="lazyload" data-src="//cdn.example.com/tee.jpg">
             <h2 class="pt-title prod-thumb-title-color"><a href="/products/tee">Tee</a></h2>
           </body></html>"#
    );
    Mock::given(method("GET"))
        .and(path("/collections/all"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(listing, "text/html"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products/tee"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(format!("<html>{SHOPIFY_HEAD}<body></body></html>"), "text/html"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products/tee.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Tee",
            "price": 1999,
            "featured_image": "//cdn.example.com/tee.jpg",
            "description": "<p>Soft.</p>",
            "variants": [
                {"sku": "T-S", "title": "S", "price": 1999, "featured_image": {"src": "//cdn.example.com/tee.jpg"}},
                {"sku": "T-M", "title": "M", "price": 1999, "featured_image": {"src": "//cdn.example.com/tee.jpg"}}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("json parse");
    assert_eq!(json["data"]["status"], "ok");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn categories_returns_entries() {
    let server = MockServer::start().await;
    mount_shopify_store(&server).await;

    let body = json!({"url": format!("{}/collections/all", server.uri())}).to_string();
    let response = test_app()
        .oneshot(post_json("/categories", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("json parse");
    let entry = json!({
        "title": "Tee",
        "image": "https://cdn.example.com/tee.jpg",
        "link": format!("{}/products/tee", server.uri()),
    });
    // No show-more link, so the listing page is read twice.
    assert_eq!(json, json!([entry.clone(), entry]));
}

#[tokio::test]
async fn categories_for_unreachable_store_returns_empty_array() {
    let server = MockServer::start().await;

    let body = json!({"url": format!("{}/collections/missing", server.uri())}).to_string();
    let response = test_app()
        .oneshot(post_json("/categories", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"[]");
}

#[tokio::test]
async fn product_returns_record() {
    let server = MockServer::start().await;
    mount_shopify_store(&server).await;

    let body = json!({"url": format!("{}/products/tee", server.uri())}).to_string();
    let response = test_app()
        .oneshot(post_json("/product", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("json parse");
    assert_eq!(json["title"], "Tee");
    assert_eq!(json["total_products"], 2);
    assert_eq!(json["images"], json!(["//cdn.example.com/tee.jpg"]));
    assert_eq!(json["image_main_url"], "https://cdn.example.com/tee.jpg");
    assert_eq!(json["sku"], "T-S");
    assert_eq!(json["description"], "Soft.");
    assert_eq!(json["options"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn product_for_non_shopify_site_returns_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/widget"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>plain</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let body = json!({"url": format!("{}/products/widget", server.uri())}).to_string();
    let response = test_app()
        .oneshot(post_json("/product", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"null");
}

#[tokio::test]
async fn invalid_url_is_opaque_server_error() {
    let response = test_app()
        .oneshot(post_json("/product", r#"{"url": "not a url"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn missing_url_is_opaque_server_error() {
    let response = test_app()
        .oneshot(post_json("/categories", "{}"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn malformed_body_is_opaque_server_error() {
    let response = test_app()
        .oneshot(post_json("/categories", "url=https://example.com"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}
