//! Product snapshot — the read-only projection of a catalog item.
//!
//! The assistant never mutates catalog data. A snapshot carries just the
//! three fields the context builder and fallback engine render; everything
//! else about a product (description, condition, location) stays behind
//! the catalog boundary.

use serde::{Deserialize, Serialize};

/// Placeholder rendered when a product has no title.
pub const UNTITLED_PRODUCT: &str = "untitled product";

/// Placeholder rendered when a product has no category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A read-only projection of a catalog item.
///
/// Title and category are optional at the source; rendering always
/// substitutes the fixed placeholders, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// The product title as published by its owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The category the product is listed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The owning user's id. Never rendered into assistant output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

impl ProductSnapshot {
    /// Create a snapshot with a title and category (the common case).
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            category: Some(category.into()),
            owner_id: None,
        }
    }

    /// Attach the owning user's id.
    pub fn with_owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// The title, or the fixed placeholder when absent.
    pub fn title_or_placeholder(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_PRODUCT)
    }

    /// The category, or the fixed placeholder when absent.
    pub fn category_or_placeholder(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Case-insensitive "title contains" check used by all search paths.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(&needle.to_lowercase()))
    }

    /// Case-insensitive "category contains" check used by all search paths.
    pub fn category_contains(&self, needle: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&needle.to_lowercase()))
    }
}
