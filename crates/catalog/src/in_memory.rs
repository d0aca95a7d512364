//! In-memory catalog reader — used by tests and the `memory` backend of
//! the CLI, where no database is wired up.
//!
//! Products are held in publication order; reads return newest first,
//! matching the SQLite reader's ordering.

use async_trait::async_trait;
use std::sync::RwLock;

use swapcircle_core::error::CatalogError;
use swapcircle_core::product::ProductSnapshot;
use swapcircle_core::CatalogReader;

/// A catalog held entirely in memory.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<ProductSnapshot>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-seeded with products (oldest first).
    pub fn with_products(products: Vec<ProductSnapshot>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Publish a product. Newer products sort first on reads.
    pub fn publish(&self, product: ProductSnapshot) {
        self.products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(product);
    }

    /// Number of products currently held.
    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn recent_products(&self) -> Result<Vec<ProductSnapshot>, CatalogError> {
        let products = self.products.read().unwrap_or_else(|e| e.into_inner());
        Ok(products.iter().rev().cloned().collect())
    }

    async fn active_products_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ProductSnapshot>, CatalogError> {
        let products = self.products.read().unwrap_or_else(|e| e.into_inner());
        Ok(products
            .iter()
            .rev()
            .filter(|p| p.owner_id == Some(user_id))
            .cloned()
            .collect())
    }
}
