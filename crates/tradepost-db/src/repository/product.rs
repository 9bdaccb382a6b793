//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD with search/category filters
//! - Sync upsert keyed on product name
//!
//! ## Stock Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.quantity has exactly two writers:                             │
//! │                                                                         │
//! │  1. TransactionRepository  → quantity = quantity + delta  (posting)     │
//! │  2. upsert_from_peer       → full row replace             (sync)        │
//! │                                                                         │
//! │  create() sets the opening stock; update() cannot touch quantity at     │
//! │  all (the request type has no quantity field), so plain edits can       │
//! │  never race a concurrent posting.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tradepost_core::validation::{validate_name, validate_non_negative, validate_product_request, validate_sku};
use tradepost_core::{CreateProductRequest, Product, UpdateProductRequest};

const SELECT_COLUMNS: &str = "id, sku, barcode, name, description, quantity, \
     cost_price, selling_price, min_stock_level, category, is_active, created_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let mouse = repo.create(&request).await?;
/// let found = repo.list(Some("mouse"), None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, newest catalog additions last (ordered by name).
    ///
    /// ## Arguments
    /// * `search` - Matches name, SKU or barcode (substring, case-insensitive)
    /// * `category` - Exact category match
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> DbResult<Vec<Product>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE 1 = 1"
        ));

        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{term}%");
            qb.push(" AND (name LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR sku LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR barcode LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if let Some(category) = category {
            qb.push(" AND category = ");
            qb.push_bind(category.to_string());
        }
        qb.push(" ORDER BY name");

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Returns every product row, for the sync snapshot.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Creates a product with a fresh id.
    pub async fn create(&self, req: &CreateProductRequest) -> DbResult<Product> {
        validate_product_request(req)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: req.sku.clone(),
            barcode: req.barcode.clone(),
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            quantity: req.quantity,
            cost_price: req.cost_price,
            selling_price: req.selling_price,
            min_stock_level: req.min_stock_level,
            category: req.category.clone(),
            is_active: req.is_active,
            created_at: Utc::now(),
        };

        debug!(id = %product.id, name = %product.name, "Creating product");
        self.insert_row(&product).await?;

        Ok(product)
    }

    /// Applies a partial update and returns the new row.
    ///
    /// Stock cannot change here; `UpdateProductRequest` carries no quantity.
    pub async fn update(&self, id: &str, req: &UpdateProductRequest) -> DbResult<Product> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        let merged = Product {
            id: current.id.clone(),
            sku: req.sku.clone().or(current.sku),
            barcode: req.barcode.clone().or(current.barcode),
            name: req.name.clone().unwrap_or(current.name).trim().to_string(),
            description: req.description.clone().or(current.description),
            quantity: current.quantity,
            cost_price: req.cost_price.unwrap_or(current.cost_price),
            selling_price: req.selling_price.unwrap_or(current.selling_price),
            min_stock_level: req.min_stock_level.unwrap_or(current.min_stock_level),
            category: req.category.clone().or(current.category),
            is_active: req.is_active.unwrap_or(current.is_active),
            created_at: current.created_at,
        };

        validate_name("name", &merged.name)?;
        if let Some(sku) = &merged.sku {
            validate_sku(sku)?;
        }
        validate_non_negative("costPrice", merged.cost_price)?;
        validate_non_negative("sellingPrice", merged.selling_price)?;

        sqlx::query(
            r#"
            UPDATE products SET
                sku = ?2, barcode = ?3, name = ?4, description = ?5,
                cost_price = ?6, selling_price = ?7, min_stock_level = ?8,
                category = ?9, is_active = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&merged.id)
        .bind(&merged.sku)
        .bind(&merged.barcode)
        .bind(&merged.name)
        .bind(&merged.description)
        .bind(merged.cost_price)
        .bind(merged.selling_price)
        .bind(merged.min_stock_level)
        .bind(&merged.category)
        .bind(merged.is_active)
        .execute(&self.pool)
        .await?;

        Ok(merged)
    }

    /// Deletes a product.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        debug!(id = %id, "Deleted product");
        Ok(())
    }

    /// Reconciles one incoming product from the sync peer.
    ///
    /// Matches by name (the cross-replica natural key): the lowest-id local
    /// row with the same name is fully overwritten, keeping its local id.
    /// No match inserts a new row under a fresh local id; the incoming id is
    /// dropped because product ids are replica-local.
    pub async fn upsert_from_peer(&self, incoming: &Product) -> DbResult<()> {
        let local_id: Option<String> =
            sqlx::query_scalar("SELECT id FROM products WHERE name = ?1 ORDER BY id LIMIT 1")
                .bind(&incoming.name)
                .fetch_optional(&self.pool)
                .await?;

        match local_id {
            Some(id) => {
                debug!(local_id = %id, name = %incoming.name, "Sync: replacing product");
                sqlx::query(
                    r#"
                    UPDATE products SET
                        sku = ?2, barcode = ?3, name = ?4, description = ?5,
                        quantity = ?6, cost_price = ?7, selling_price = ?8,
                        min_stock_level = ?9, category = ?10, is_active = ?11,
                        created_at = ?12
                    WHERE id = ?1
                    "#,
                )
                .bind(&id)
                .bind(&incoming.sku)
                .bind(&incoming.barcode)
                .bind(&incoming.name)
                .bind(&incoming.description)
                .bind(incoming.quantity)
                .bind(incoming.cost_price)
                .bind(incoming.selling_price)
                .bind(incoming.min_stock_level)
                .bind(&incoming.category)
                .bind(incoming.is_active)
                .bind(incoming.created_at)
                .execute(&self.pool)
                .await?;
            }
            None => {
                let fresh = Product {
                    id: Uuid::new_v4().to_string(),
                    ..incoming.clone()
                };
                debug!(id = %fresh.id, name = %fresh.name, "Sync: inserting product");
                self.insert_row(&fresh).await?;
            }
        }

        Ok(())
    }

    async fn insert_row(&self, product: &Product) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, barcode, name, description, quantity,
                cost_price, selling_price, min_stock_level, category,
                is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.quantity)
        .bind(product.cost_price)
        .bind(product.selling_price)
        .bind(product.min_stock_level)
        .bind(&product.category)
        .bind(product.is_active)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
