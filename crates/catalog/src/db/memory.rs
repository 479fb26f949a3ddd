//! In-process product store.
//!
//! Keeps products in insertion order behind a `tokio` read/write lock. Used by
//! the HTTP contract tests and for running the server without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use bakery_catalog_core::{NewProduct, Product, ProductId, ProductPatch};

use super::{ProductStore, StoreError};

/// Product store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if no products are stored.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.clone())
    }

    async fn insert(&self, product: NewProduct) -> Result<ProductId, StoreError> {
        let mut products = self.products.write().await;

        let mut id = ProductId::new_v4();
        while products.iter().any(|existing| existing.id == id) {
            id = ProductId::new_v4();
        }

        products.push(product.into_product(id));
        Ok(id)
    }

    async fn replace_fields(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|product| product.id == id) {
            Some(product) => {
                product.apply(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| product.id != id);
        Ok(products.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bakery_catalog_core::{Images, Price};
    use serde_json::json;

    use super::*;

    fn cupcake(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Price::from(48_i64),
            images: Images::Text("cupcakes.jpg".to_string()),
            category: "cupcakes".to_string(),
            size: json!("18 Cupcakes"),
            description: "Assorted flavours".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let store = MemoryProductStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_preserves_order_and_assigns_unique_ids() {
        let store = MemoryProductStore::new();
        let first = store.insert(cupcake("Red Velvet")).await.unwrap();
        let second = store.insert(cupcake("Lemon")).await.unwrap();
        assert_ne!(first, second);

        let listed = store.list_all().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(listed[0].name, "Red Velvet");
    }

    #[tokio::test]
    async fn test_replace_fields_partial() {
        let store = MemoryProductStore::new();
        let id = store.insert(cupcake("Red Velvet")).await.unwrap();

        let patch = ProductPatch {
            price: Some(Price::from(50_i64)),
            ..ProductPatch::default()
        };
        assert!(store.replace_fields(id, patch).await.unwrap());

        let product = &store.list_all().await.unwrap()[0];
        assert_eq!(product.price, Price::from(50_i64));
        assert_eq!(product.name, "Red Velvet");
        assert_eq!(product.size, json!("18 Cupcakes"));
    }

    #[tokio::test]
    async fn test_replace_fields_unknown_id() {
        let store = MemoryProductStore::new();
        store.insert(cupcake("Red Velvet")).await.unwrap();

        let matched = store
            .replace_fields(ProductId::new_v4(), ProductPatch::default())
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_empty_patch_still_matches() {
        let store = MemoryProductStore::new();
        let id = store.insert(cupcake("Red Velvet")).await.unwrap();
        assert!(store.replace_fields(id, ProductPatch::default()).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_once() {
        let store = MemoryProductStore::new();
        let keep = store.insert(cupcake("Lemon")).await.unwrap();
        let id = store.insert(cupcake("Red Velvet")).await.unwrap();

        assert!(store.remove(id).await.unwrap());
        assert!(!store.remove(id).await.unwrap());

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep);
    }
}
