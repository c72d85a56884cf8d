//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /health/ready                        - Readiness check (database)
//!
//! # Categories
//! POST /api/categories/create               - Create category
//! GET  /api/categories/fetch                - List categories
//!
//! # Products
//! POST   /api/products/create               - Create product
//! GET    /api/products/fetch                - List products (filter + pagination)
//! GET    /api/products/fetch/{id}           - Get product by id
//! PUT    /api/products/update/{id}          - Partial update
//! DELETE /api/products/delete/{id}          - Delete product
//!
//! # Aggregates (token-gated)
//! GET  /api/products/aggregate/all          - Flat join projection
//! GET  /api/products/aggregate/by-category - Products grouped per category
//! ```

pub mod categories;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the API router from the per-resource routers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(categories::router())
        .merge(products::router())
}
