//! Context builder — renders a bounded snapshot of catalog state into the
//! text block the model (or the fallback engine) consumes.
//!
//! The output is always non-empty, well-sectioned text: every upstream
//! failure degrades to a fixed placeholder sentence at this boundary and
//! never propagates past it. That bounds the worst case the model ever
//! has to handle.

use std::sync::Arc;

use tracing::warn;

use swapcircle_core::CatalogReader;

/// Fixed header opening every context block.
pub const CONTEXT_HEADER: &str = "=== CURRENT AVAILABLE PRODUCTS ===";

/// Cap on globally listed products.
pub const MAX_GLOBAL_ITEMS: usize = 8;

/// Cap on the requesting user's listed products.
pub const MAX_USER_ITEMS: usize = 5;

const GLOBAL_SECTION_HEADER: &str = "PRODUCTS AVAILABLE FOR EXCHANGE:";
const GLOBAL_EMPTY: &str =
    "PRODUCTS: There are currently products available across several categories.";
const GLOBAL_UNAVAILABLE: &str = "PRODUCTS: Catalog temporarily unavailable.";

const USER_SECTION_HEADER: &str = "CURRENT USER'S PRODUCTS:";
const USER_EMPTY: &str = "CURRENT USER'S PRODUCTS: You have no products published yet.";
const USER_UNAVAILABLE: &str = "CURRENT USER'S PRODUCTS: Could not be loaded.";

/// Renders catalog state into a context block, fresh on every request.
pub struct ContextBuilder {
    catalog: Arc<dyn CatalogReader>,
}

impl ContextBuilder {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    /// Build the context block for a request.
    ///
    /// The global section and the per-user section fail independently:
    /// a user-products failure cannot disturb the global section already
    /// rendered, and vice versa.
    pub async fn build(&self, user_id: Option<i64>) -> String {
        let mut context = String::new();
        context.push_str(CONTEXT_HEADER);
        context.push('\n');

        match self.catalog.recent_products().await {
            Ok(products) if !products.is_empty() => {
                context.push_str(GLOBAL_SECTION_HEADER);
                context.push('\n');
                for product in products.iter().take(MAX_GLOBAL_ITEMS) {
                    context.push_str(&format!(
                        "- {} (Category: {})\n",
                        product.title_or_placeholder(),
                        product.category_or_placeholder()
                    ));
                }
                context.push('\n');
            }
            Ok(_) => {
                context.push_str(GLOBAL_EMPTY);
                context.push_str("\n\n");
            }
            Err(e) => {
                warn!(error = %e, "Recent products fetch failed, degrading context");
                context.push_str(GLOBAL_UNAVAILABLE);
                context.push_str("\n\n");
            }
        }

        if let Some(user_id) = user_id {
            match self.catalog.active_products_by_user(user_id).await {
                Ok(products) if !products.is_empty() => {
                    context.push_str(USER_SECTION_HEADER);
                    context.push('\n');
                    for product in products.iter().take(MAX_USER_ITEMS) {
                        context.push_str(&format!(
                            "- {} ({})\n",
                            product.title_or_placeholder(),
                            product.category_or_placeholder()
                        ));
                    }
                    context.push('\n');
                }
                Ok(_) => {
                    context.push_str(USER_EMPTY);
                    context.push_str("\n\n");
                }
                Err(e) => {
                    warn!(error = %e, user_id, "User products fetch failed, degrading context");
                    context.push_str(USER_UNAVAILABLE);
                    context.push_str("\n\n");
                }
            }
        }

        context
    }
}
