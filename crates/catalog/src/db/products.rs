//! `PostgreSQL`-backed product store.
//!
//! Products live in `catalog.product` as JSONB documents. A partial update is
//! a top-level merge (`document || patch`), so keys absent from the patch keep
//! their stored value.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use bakery_catalog_core::{NewProduct, Product, ProductId, ProductPatch};

use super::{ProductStore, StoreError};

/// Product store over a `PostgreSQL` connection pool.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a new store using an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Delete every product. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM catalog.product")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Rebuild a product from its row, projecting the document onto the content fields.
fn product_from_row(id: ProductId, document: JsonValue) -> Result<Product, StoreError> {
    serde_json::from_value::<NewProduct>(document)
        .map(|content| content.into_product(id))
        .map_err(|e| StoreError::DataCorruption(format!("invalid product document {id}: {e}")))
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<(ProductId, Json<JsonValue>)> = sqlx::query_as(
            r"
            SELECT id, document
            FROM catalog.product
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, Json(document))| product_from_row(id, document))
            .collect()
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError> {
        let document = serde_json::to_value(&product)?;

        let id: ProductId = sqlx::query_scalar(
            r"
            INSERT INTO catalog.product (document)
            VALUES ($1)
            RETURNING id
            ",
        )
        .bind(Json(document))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn replace_fields(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<bool, StoreError> {
        let patch = serde_json::to_value(&patch)?;

        let result = sqlx::query(
            r"
            UPDATE catalog.product
            SET document = document || $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(Json(patch))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn remove(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM catalog.product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_from_row_projects_content_fields() {
        let id = ProductId::new_v4();
        let document = json!({
            "name": "Chocolate Chip Cookies",
            "price": 12.0,
            "images": ["cookies.jpg"],
            "category": "cookies",
            "size": "Dozen",
            "description": "Chewy",
            "legacy_field": "ignored"
        });

        let product = product_from_row(id, document).unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.name, "Chocolate Chip Cookies");
        assert_eq!(product.category, "cookies");
    }

    #[test]
    fn test_product_from_row_reports_corruption() {
        let id = ProductId::new_v4();
        let err = product_from_row(id, json!({"name": "Half a cake"})).unwrap_err();
        assert!(matches!(err, StoreError::DataCorruption(ref msg) if msg.contains(&id.to_string())));
    }
}
