//! Category route handlers.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};

use crate::db::CategoryRepository;
use crate::error::ApiError;
use crate::models::CreateCategoryInput;
use crate::response;
use crate::state::AppState;

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories/create", post(create))
        .route("/api/categories/fetch", get(fetch))
}

/// Create a new category.
///
/// # Errors
///
/// Returns a 400 validation error for a missing or empty name, a 400
/// conflict for a duplicate name, or a 500 for database failures.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ApiError::Validation(
                "Category name is required and must be a non-empty string.".to_string(),
            )
        })?;

    let repo = CategoryRepository::new(state.pool());
    if repo.exists_by_name(name).await? {
        return Err(ApiError::Conflict("Category name already exists.".to_string()));
    }

    let category = repo.create(name).await?;
    Ok(response::created(category, "Category created successfully."))
}

/// List all categories, newest first.
///
/// # Errors
///
/// Returns a 500 for database failures.
pub async fn fetch(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(response::ok(categories, "Categories fetched successfully."))
}
