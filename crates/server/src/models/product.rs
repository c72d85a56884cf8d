//! Product domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{CategoryId, ProductId};

use super::Category;

/// A product as stored, with its category as a bare reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name (unique across products).
    pub name: String,
    /// Unit price, strictly positive.
    pub price: Decimal,
    /// Free-form description; empty when not supplied.
    pub description: String,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product with its category reference resolved ("populated") to the full
/// category record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWithCategory {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Free-form description.
    pub description: String,
    /// The full category record.
    pub category: Category,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ProductWithCategory {
    /// The stored product record, dropping the resolved category back to a
    /// bare reference.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            price: self.price,
            description: self.description,
            category_id: self.category.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Flat equi-join projection: product fields plus the category name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Free-form description.
    pub description: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
    /// Name of the product's category.
    pub category_name: String,
}

/// Full product records grouped under one category name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsByCategory {
    /// The category name shared by this group.
    pub category_name: String,
    /// The products in the category, newest first.
    pub products: Vec<Product>,
}

impl ProductsByCategory {
    /// Group joined rows into per-category buckets.
    ///
    /// Input rows must already be ordered by category name; rows within one
    /// category keep their relative order.
    #[must_use]
    pub fn group(rows: Vec<ProductWithCategory>) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        for row in rows {
            let category_name = row.category.name.clone();
            let product = row.into_product();
            match groups.last_mut() {
                Some(group) if group.category_name == category_name => {
                    group.products.push(product);
                }
                _ => groups.push(Self {
                    category_name,
                    products: vec![product],
                }),
            }
        }
        groups
    }
}

/// Request body for creating a product.
///
/// All fields are optional at the deserialization layer so the handler can
/// produce field-specific validation messages instead of a generic decode
/// failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    /// Product name.
    pub name: Option<String>,
    /// Unit price.
    pub price: Option<Decimal>,
    /// Free-form description.
    pub description: Option<String>,
    /// Category the product belongs to.
    pub category_id: Option<CategoryId>,
}

/// A validated, trimmed product ready to insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product name, trimmed.
    pub name: String,
    /// Unit price, strictly positive.
    pub price: Decimal,
    /// Description, trimmed; empty when not supplied.
    pub description: String,
    /// Category the product belongs to.
    pub category_id: CategoryId,
}

/// Request body for partially updating a product.
///
/// Only supplied fields are applied; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    /// New product name.
    pub name: Option<String>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New category reference.
    pub category_id: Option<CategoryId>,
}

/// Filter and window for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Maximum number of results.
    pub limit: i64,
    /// Number of results to skip.
    pub offset: i64,
}

/// One page of products with pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    /// 1-based page number.
    pub page: i64,
    /// Page size.
    pub limit: i64,
    /// Total matching products across all pages.
    pub total_items: i64,
    /// Total number of pages.
    pub total_pages: i64,
    /// The products on this page, categories resolved.
    pub items: Vec<ProductWithCategory>,
}

impl ProductPage {
    /// Assemble a page from a window of items and the total match count.
    #[must_use]
    pub fn new(page: i64, limit: i64, total_items: i64, items: Vec<ProductWithCategory>) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total_items,
            total_pages,
            items,
        }
    }
}
