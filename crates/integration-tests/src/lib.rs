//! Integration tests for the catalog API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The catalog server running (cargo run -p catalog-server)
//!
//! Run with: cargo test -p catalog-integration-tests -- --ignored

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

use catalog_core::{CategoryId, ProductId};

/// Base URL for the catalog API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// The static token the running server was configured with.
///
/// # Panics
///
/// Panics if `CATALOG_API_TOKEN` is not set; the token-gated tests cannot
/// run without it.
#[must_use]
pub fn api_token() -> String {
    std::env::var("CATALOG_API_TOKEN").expect("CATALOG_API_TOKEN must be set for these tests")
}

/// Build an HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// Generate a unique name so tests don't collide across runs.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Test helper: create a category and return its id with the full envelope
/// payload.
///
/// # Panics
///
/// Panics if the request fails or the response is not a created category.
pub async fn create_category(client: &Client, name: &str) -> (CategoryId, Value) {
    let resp = client
        .post(format!("{}/api/categories/create", base_url()))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create category");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse category response");
    let id = body["data"]["id"]
        .as_i64()
        .and_then(|id| i32::try_from(id).ok())
        .expect("Category id missing from response");
    (CategoryId::new(id), body)
}

/// Test helper: create a product and return its id with the full envelope
/// payload.
///
/// # Panics
///
/// Panics if the request fails or the response is not a created product.
pub async fn create_product(
    client: &Client,
    name: &str,
    price: f64,
    category_id: CategoryId,
) -> (ProductId, Value) {
    let resp = client
        .post(format!("{}/api/products/create", base_url()))
        .json(&json!({
            "name": name,
            "price": price,
            "category_id": category_id.as_i32(),
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse product response");
    let id = body["data"]["id"]
        .as_i64()
        .and_then(|id| i32::try_from(id).ok())
        .expect("Product id missing from response");
    (ProductId::new(id), body)
}

/// Parse the decimal `price` field from an envelope payload.
///
/// Prices serialize as JSON strings (decimal), so compare through f64.
///
/// # Panics
///
/// Panics if the field is missing or not a decimal.
#[must_use]
pub fn price_of(data: &Value) -> f64 {
    data["price"]
        .as_str()
        .and_then(|price| price.parse().ok())
        .expect("price missing from response")
}
