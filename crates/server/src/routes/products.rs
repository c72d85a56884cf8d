//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete as delete_route, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_core::ProductId;

use crate::db::{CategoryRepository, ProductRepository};
use crate::error::ApiError;
use crate::middleware::RequireApiToken;
use crate::models::{
    CreateProductInput, NewProduct, ProductFilter, ProductPage, ProductsByCategory,
    UpdateProductInput,
};
use crate::response;
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products/create", post(create))
        .route("/api/products/fetch", get(fetch))
        .route("/api/products/fetch/{id}", get(fetch_by_id))
        .route("/api/products/update/{id}", put(update))
        .route("/api/products/delete/{id}", delete_route(delete))
        .route("/api/products/aggregate/all", get(aggregate_all))
        .route(
            "/api/products/aggregate/by-category",
            get(aggregate_by_category),
        )
}

/// Pagination and filter query parameters for the product list.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Case-insensitive substring filter on the product name.
    pub name: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// Page size (default 10).
    pub limit: Option<i64>,
}

/// Create a new product.
///
/// # Errors
///
/// Returns a 400 validation error for a missing/empty name, a non-positive
/// price, or a missing/unknown category; a 400 conflict for a duplicate
/// name; or a 500 for database failures.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductInput>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validate_create(body)?;

    if !CategoryRepository::new(state.pool())
        .exists(input.category_id)
        .await?
    {
        return Err(ApiError::Validation(
            "Product category does not exist.".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool()).create(&input).await?;
    Ok(response::created(product, "Product created successfully."))
}

/// List products with an optional name filter and pagination.
///
/// # Errors
///
/// Returns a 500 for database failures.
pub async fn fetch(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let filter = ProductFilter {
        name: query
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string),
        limit,
        offset: (page - 1) * limit,
    };

    let repo = ProductRepository::new(state.pool());
    let total_items = repo.count(&filter).await?;
    let items = repo.list(&filter).await?;

    Ok(response::ok(
        ProductPage::new(page, limit, total_items, items),
        "Products fetched successfully.",
    ))
}

/// Get a single product by id, category resolved.
///
/// # Errors
///
/// Returns a 404 if no product matches, or a 500 for database failures.
pub async fn fetch_by_id(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, ApiError> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found.".to_string()))?;

    Ok(response::ok(product, "Product fetched successfully."))
}

/// Apply a partial update to a product.
///
/// Only supplied fields are applied; supplied fields must still satisfy the
/// creation rules (non-empty name, positive price, existing category).
///
/// # Errors
///
/// Returns a 400 validation error for invalid field values, a 404 if the
/// product does not exist, or a 500 for database failures.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validate_update(body)?;

    if let Some(category_id) = input.category_id {
        let category_exists = CategoryRepository::new(state.pool())
            .exists(category_id)
            .await?;
        if !category_exists {
            return Err(ApiError::Validation(
                "Product category does not exist.".to_string(),
            ));
        }
    }

    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found.".to_string()))?;

    Ok(response::ok(product, "Product updated successfully."))
}

/// Delete a product by id.
///
/// # Errors
///
/// Returns a 404 if the product does not exist (including a repeated
/// delete), or a 500 for database failures.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Product not found.".to_string()));
    }

    Ok(response::message("Product deleted successfully."))
}

/// Flat projection of all products with their category name.
///
/// Token-gated.
///
/// # Errors
///
/// Returns a 500 for database failures.
pub async fn aggregate_all(
    _auth: RequireApiToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let summaries = ProductRepository::new(state.pool()).list_summaries().await?;
    Ok(response::ok(
        summaries,
        "Products with category details fetched successfully.",
    ))
}

/// Full product records grouped under each category name.
///
/// Token-gated.
///
/// # Errors
///
/// Returns a 500 for database failures.
pub async fn aggregate_by_category(
    _auth: RequireApiToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = ProductRepository::new(state.pool())
        .list_ordered_by_category()
        .await?;
    let groups = ProductsByCategory::group(rows);
    Ok(response::ok(
        groups,
        "Products grouped by category fetched successfully.",
    ))
}

// =============================================================================
// Validation
// =============================================================================

/// Validate and normalize a create request into an insertable product.
fn validate_create(input: CreateProductInput) -> Result<NewProduct, ApiError> {
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ApiError::Validation(
                "Product name is required and must be a non-empty string.".to_string(),
            )
        })?
        .to_string();

    let price = input
        .price
        .filter(|price| *price > Decimal::ZERO)
        .ok_or_else(|| {
            ApiError::Validation(
                "Product price is required and must be a positive number.".to_string(),
            )
        })?;

    let category_id = input
        .category_id
        .ok_or_else(|| ApiError::Validation("Product category is required.".to_string()))?;

    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(NewProduct {
        name,
        price,
        description,
        category_id,
    })
}

/// Validate and normalize a partial-update request.
///
/// Supplied fields must satisfy the creation rules; absent fields pass
/// through untouched.
fn validate_update(input: UpdateProductInput) -> Result<UpdateProductInput, ApiError> {
    let name = input
        .name
        .as_deref()
        .map(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                Err(ApiError::Validation(
                    "Product name must be a non-empty string.".to_string(),
                ))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .transpose()?;

    if let Some(price) = input.price
        && price <= Decimal::ZERO
    {
        return Err(ApiError::Validation(
            "Product price must be a positive number.".to_string(),
        ));
    }

    let description = input
        .description
        .as_deref()
        .map(|description| description.trim().to_string());

    Ok(UpdateProductInput {
        name,
        price: input.price,
        description,
        category_id: input.category_id,
    })
}
