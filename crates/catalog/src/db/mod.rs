//! Product storage.
//!
//! # Database: `catalog`
//!
//! Products are stored as documents: one JSONB object per row, addressed only
//! by its generated UUID.
//!
//! ## Tables
//!
//! - `catalog.product` - `id`, `document`, bookkeeping timestamps
//!
//! # Migrations
//!
//! Migrations are stored in `crates/catalog/migrations/` and run via:
//! ```bash
//! cargo run -p bakery-cli -- migrate
//! ```
//!
//! # Stores
//!
//! Handlers only see the [`ProductStore`] trait. [`PgProductStore`] backs it
//! with `PostgreSQL`; [`MemoryProductStore`] keeps products in process.

pub mod memory;
pub mod products;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use bakery_catalog_core::{NewProduct, Product, ProductId, ProductPatch};

pub use memory::MemoryProductStore;
pub use products::PgProductStore;

/// Errors raised by a product store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be read back as a product.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A product could not be encoded as a document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable mapping from [`ProductId`] to product record.
///
/// Every method is a single atomic operation against the backing store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List every stored product. Ordering is whatever the store returns.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Insert a new product and return its generated ID.
    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError>;

    /// Set only the fields present in `patch`.
    ///
    /// Returns `false` if no product with `id` exists.
    async fn replace_fields(&self, id: ProductId, patch: ProductPatch)
    -> Result<bool, StoreError>;

    /// Delete a product.
    ///
    /// Returns `false` if no product with `id` exists.
    async fn remove(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
