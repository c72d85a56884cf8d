//! Database operations for products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use catalog_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::{
    Category, NewProduct, Product, ProductFilter, ProductSummary, ProductWithCategory,
    UpdateProductInput,
};

/// Unique constraint on `products.name`.
const NAME_UNIQUE_CONSTRAINT: &str = "products_name_key";
/// Foreign key from `products.category_id` to `categories.id`.
const CATEGORY_FK_CONSTRAINT: &str = "products_category_id_fkey";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    description: String,
    category_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            category_id: CategoryId::new(row.category_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for product queries joined with the category.
#[derive(Debug, sqlx::FromRow)]
struct ProductWithCategoryRow {
    id: i32,
    name: String,
    price: Decimal,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_id: i32,
    category_name: String,
    category_created_at: DateTime<Utc>,
}

impl From<ProductWithCategoryRow> for ProductWithCategory {
    fn from(row: ProductWithCategoryRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            category: Category {
                id: CategoryId::new(row.category_id),
                name: row.category_name,
                created_at: row.category_created_at,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for the flat join projection.
#[derive(Debug, sqlx::FromRow)]
struct ProductSummaryRow {
    id: i32,
    name: String,
    price: Decimal,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: String,
}

impl From<ProductSummaryRow> for ProductSummary {
    fn from(row: ProductSummaryRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            category_name: row.category_name,
        }
    }
}

/// Columns selected for a product joined with its category.
const JOINED_COLUMNS: &str = r"
    p.id, p.name, p.price, p.description,
    p.created_at, p.updated_at,
    c.id AS category_id, c.name AS category_name, c.created_at AS category_created_at
";

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a product with the same name
    /// already exists, or if the referenced category does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, price, description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, description, category_id, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(&input.description)
        .bind(input.category_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some(NAME_UNIQUE_CONSTRAINT) {
                    return RepositoryError::Conflict(
                        "Product name already exists.".to_string(),
                    );
                }
                if db_err.constraint() == Some(CATEGORY_FK_CONSTRAINT) {
                    return RepositoryError::Conflict(
                        "Product category does not exist.".to_string(),
                    );
                }
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Get a product by id with its category resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductWithCategory>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            r"
            SELECT {JOINED_COLUMNS}
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            ",
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List one window of products, newest first, categories resolved.
    ///
    /// The optional name filter is a case-insensitive substring match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductWithCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            r"
            SELECT {JOINED_COLUMNS}
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            WHERE ($1::text IS NULL OR p.name ILIKE '%' || $1 || '%')
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2 OFFSET $3
            ",
        ))
        .bind(filter.name.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count all products matching the filter, ignoring the window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM products p
            WHERE ($1::text IS NULL OR p.name ILIKE '%' || $1 || '%')
            ",
        )
        .bind(filter.name.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row.0)
    }

    /// Apply a partial update to a product and return it with its category
    /// resolved.
    ///
    /// Absent fields are left unchanged; `updated_at` is always bumped.
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate name or a missing
    /// category reference.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Option<ProductWithCategory>, RepositoryError> {
        let updated: Option<(i32,)> = sqlx::query_as(
            r"
            UPDATE products
            SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                category_id = COALESCE($5, category_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(id.as_i32())
        .bind(input.name.as_deref())
        .bind(input.price)
        .bind(input.description.as_deref())
        .bind(input.category_id.map(|category_id| category_id.as_i32()))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some(NAME_UNIQUE_CONSTRAINT) {
                    return RepositoryError::Conflict(
                        "Product name already exists.".to_string(),
                    );
                }
                if db_err.constraint() == Some(CATEGORY_FK_CONSTRAINT) {
                    return RepositoryError::Conflict(
                        "Product category does not exist.".to_string(),
                    );
                }
            }
            RepositoryError::Database(e)
        })?;

        match updated {
            Some(_) => self.get(id).await,
            None => Ok(None),
        }
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>(r"DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flat equi-join projection of all products with their category name,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_summaries(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductSummaryRow>(
            r"
            SELECT
                p.id, p.name, p.price, p.description,
                p.created_at, p.updated_at,
                c.name AS category_name
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at DESC, p.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All products with categories resolved, ordered by category name so
    /// callers can group rows into per-category buckets.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_ordered_by_category(
        &self,
    ) -> Result<Vec<ProductWithCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(&format!(
            r"
            SELECT {JOINED_COLUMNS}
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            ORDER BY c.name ASC, p.created_at DESC, p.id DESC
            ",
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
