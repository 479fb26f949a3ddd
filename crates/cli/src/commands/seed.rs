//! Seed the catalog with products from a YAML file.
//!
//! # File Format
//!
//! ```yaml
//! products:
//!   - name: Vanilla Cake
//!     price: 65.0
//!     images: [vanilla-cake.jpg]
//!     category: cakes
//!     size: 6 in / 8 in
//!     description: Classic vanilla sponge
//! ```
//!
//! Every entry must carry all six product fields. `images` may also be a
//! comma-separated string.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use bakery_catalog::config::{CatalogConfig, ConfigError};
use bakery_catalog::db::{self, PgProductStore, ProductStore, StoreError};
use bakery_catalog_core::NewProduct;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
struct SeedFile {
    products: Vec<NewProduct>,
}

/// Parse the products listed in a seed file.
fn parse_seed(content: &str) -> Result<Vec<NewProduct>, SeedError> {
    let file: SeedFile = serde_yaml::from_str(content)?;
    Ok(file.products)
}

/// Insert every product from `file_path`.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML seed file
/// * `clear_existing` - If true, delete every existing product first
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or if a database
/// operation fails. The file is validated before connecting.
pub async fn products(file_path: &str, clear_existing: bool) -> Result<usize, SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_string()));
    }

    info!(path = %file_path, "Loading products from file");
    let content = tokio::fs::read_to_string(path).await?;
    let products = parse_seed(&content)?;

    if products.is_empty() {
        warn!("Seed file lists no products");
    }

    let config = CatalogConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 1).await?;
    let store = PgProductStore::new(pool);

    if clear_existing {
        let removed = store.clear().await?;
        info!(removed, "Cleared existing products");
    }

    let count = products.len();
    for product in products {
        let name = product.name.clone();
        let images = product.images.paths().len();
        let id = store.insert(product).await?;
        info!(product_id = %id, name = %name, images, "Seeded product");
    }

    store.pool().close().await;
    info!(count, "Seeding complete");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use bakery_catalog_core::Images;

    use super::*;

    #[test]
    fn test_parse_seed() {
        let products = parse_seed(
            r"
products:
  - name: Vanilla Cake
    price: 65
    images: vanilla-1.jpg,vanilla-2.jpg
    category: cakes
    size: 6 in / 8 in
    description: Classic vanilla sponge
  - name: Cupcakes
    price: 48.5
    images: [cupcakes.jpg]
    category: cupcakes
    size:
      count: 18
    description: Assorted flavours
",
        )
        .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Vanilla Cake");
        assert_eq!(
            products[0].images,
            Images::Text("vanilla-1.jpg,vanilla-2.jpg".to_string())
        );
        assert_eq!(products[0].images.paths(), ["vanilla-1.jpg", "vanilla-2.jpg"]);
        assert_eq!(products[0].price.to_string(), "65.00");
        assert_eq!(products[1].size, serde_json::json!({"count": 18}));
        assert_eq!(products[1].price.to_string(), "48.50");
    }

    #[test]
    fn test_parse_seed_missing_field() {
        let err = parse_seed(
            r"
products:
  - name: Mystery Cake
    price: 10
",
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn test_bundled_seed_file_parses() {
        let content = include_str!("../../seed/products.yaml");
        let products = parse_seed(content).unwrap();
        assert!(!products.is_empty());
    }
}
