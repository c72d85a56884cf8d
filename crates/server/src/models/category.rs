//! Category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::CategoryId;

/// A product category.
///
/// Categories are created once and immutable thereafter; no update or delete
/// endpoint is exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category name (unique across categories).
    pub name: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a category.
///
/// All fields are optional at the deserialization layer so the handler can
/// produce field-specific validation messages instead of a generic decode
/// failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    /// Category name.
    pub name: Option<String>,
}
