//! SQLite catalog reader.
//!
//! Reads the `products` table the platform's product service writes.
//! The schema is created if missing so a fresh deployment (and the test
//! suite, via `sqlite::memory:`) can start against an empty database.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;

use swapcircle_core::error::CatalogError;
use swapcircle_core::product::ProductSnapshot;
use swapcircle_core::CatalogReader;

/// A SQLite-backed catalog reader.
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open (or create) the catalog database at `path`.
    pub async fn new(path: &str) -> Result<Self, CatalogError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| CatalogError::Unavailable(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| CatalogError::Unavailable(format!("Failed to open SQLite: {e}")))?;

        let catalog = Self { pool };
        catalog.run_migrations().await?;
        info!("SQLite catalog initialized at {path}");
        Ok(catalog)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, CatalogError> {
        let catalog = Self { pool };
        catalog.run_migrations().await?;
        Ok(catalog)
    }

    async fn run_migrations(&self) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                title      TEXT,
                category   TEXT,
                owner_id   INTEGER,
                status     TEXT NOT NULL DEFAULT 'available',
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::Unavailable(format!("products table: {e}")))?;
        Ok(())
    }

    /// Insert a product row. Exists for seeding demos and tests; the
    /// assistant itself never writes.
    pub async fn insert(&self, product: &ProductSnapshot) -> Result<(), CatalogError> {
        sqlx::query("INSERT INTO products (title, category, owner_id) VALUES (?1, ?2, ?3)")
            .bind(product.title.as_deref())
            .bind(product.category.as_deref())
            .bind(product.owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    fn row_to_snapshot(row: &sqlx::sqlite::SqliteRow) -> ProductSnapshot {
        ProductSnapshot {
            title: row.get("title"),
            category: row.get("category"),
            owner_id: row.get("owner_id"),
        }
    }
}

#[async_trait]
impl CatalogReader for SqliteCatalog {
    async fn recent_products(&self) -> Result<Vec<ProductSnapshot>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT title, category, owner_id FROM products
            WHERE status = 'available'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_snapshot).collect())
    }

    async fn active_products_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ProductSnapshot>, CatalogError> {
        let rows = sqlx::query(
            r#"
            SELECT title, category, owner_id FROM products
            WHERE status = 'available' AND owner_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::QueryFailed(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_snapshot).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_catalog() -> SqliteCatalog {
        // A pooled ":memory:" database is one database per connection;
        // pin the pool to a single connection so the tests see one store.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteCatalog::from_pool(pool).await.unwrap()
    }

    #[tokio::test]
    async fn empty_database_reads_cleanly() {
        let catalog = test_catalog().await;
        assert!(catalog.recent_products().await.unwrap().is_empty());
        assert!(catalog.active_products_by_user(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_read_back() {
        let catalog = test_catalog().await;
        catalog
            .insert(&ProductSnapshot::new("Trek 520", "Sports").with_owner(3))
            .await
            .unwrap();
        catalog
            .insert(&ProductSnapshot::new("Desk Lamp", "Home").with_owner(4))
            .await
            .unwrap();

        let recent = catalog.recent_products().await.unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first
        assert_eq!(recent[0].title.as_deref(), Some("Desk Lamp"));

        let user_products = catalog.active_products_by_user(3).await.unwrap();
        assert_eq!(user_products.len(), 1);
        assert_eq!(user_products[0].title.as_deref(), Some("Trek 520"));
    }

    #[tokio::test]
    async fn null_title_and_category_survive() {
        let catalog = test_catalog().await;
        catalog
            .insert(&ProductSnapshot {
                title: None,
                category: None,
                owner_id: Some(5),
            })
            .await
            .unwrap();

        let recent = catalog.recent_products().await.unwrap();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].title.is_none());
        assert!(recent[0].category.is_none());
        assert_eq!(recent[0].title_or_placeholder(), "untitled product");
    }
}
