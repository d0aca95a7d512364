//! Catalog reader trait — the read-only query contract over the product
//! catalog.
//!
//! The assistant consumes catalog state, never mutates it. Both operations
//! may fail; callers recover locally (placeholder sentences, error-shaped
//! results) and never propagate a catalog failure raw.
//!
//! Implementations: SQLite, in-memory (tests and demos).

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::product::ProductSnapshot;

/// Read-only access to the product catalog.
///
/// Neither operation carries a size bound at the source — the assistant
/// truncates to its own caps (8 context items, 10 summary items, 5 search
/// hits) after the fetch.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// The most recently published products, newest first.
    async fn recent_products(&self) -> std::result::Result<Vec<ProductSnapshot>, CatalogError>;

    /// The given user's active (published, available) products, newest first.
    async fn active_products_by_user(
        &self,
        user_id: i64,
    ) -> std::result::Result<Vec<ProductSnapshot>, CatalogError>;
}
