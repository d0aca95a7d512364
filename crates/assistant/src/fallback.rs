//! Fallback engine — the deterministic, rule-based responder.
//!
//! Reproduces the assistant's behavior without any model call. It serves
//! two roles: the policy-violation response (off-topic refusal) and the
//! resilience path when the provider fails. Catalog state is read fresh
//! on every call — nothing is cached across calls.
//!
//! Rules fire first-match-wins; the ordered rule table below keeps the
//! sequence auditable and `classify` testable in isolation from the
//! catalog-reading handlers.

use std::sync::Arc;

use tracing::{debug, warn};

use swapcircle_core::CatalogReader;

use crate::prompt::REFUSAL_MESSAGE;
use crate::topic_gate;

/// Cap on matches returned by a term/category search.
pub const MAX_SEARCH_MATCHES: usize = 5;

/// Cap on products considered by the category-grouped summary.
pub const MAX_SUMMARY_PRODUCTS: usize = 10;

/// Titles shown per category before the remainder collapses to a count.
pub const MAX_TITLES_PER_CATEGORY: usize = 3;

const SUMMARY_EMPTY: &str = "No products available at the moment.";
const SUMMARY_UNAVAILABLE: &str =
    "There are several products available. Check the platform to see all the options.";
const SEARCH_UNAVAILABLE: &str =
    "⚠️ Product search failed. Try again or browse the platform directly.";

/// What the fallback engine decided to do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackIntent {
    /// Off-topic: answer with the fixed refusal sentence
    Refusal,
    /// Bicycle lookup against the Sports category
    BicycleSearch,
    /// Phone lookup against the Electronics category
    PhoneSearch,
    /// Laptop/computer lookup against the Electronics category
    ComputerSearch,
    /// General exchange intent: greet + catalog summary
    Exchange,
    /// General search intent: search greeting + catalog summary
    Search,
    /// Anything else: full greeting + summary + action menu
    General,
}

/// Ordered keyword rules. Earlier entries win; later rules are
/// unreachable once an earlier one fires.
const INTENT_RULES: &[(&[&str], FallbackIntent)] = &[
    (&["bicycle", "bike", "cycling"], FallbackIntent::BicycleSearch),
    (
        &["phone", "smartphone", "cellphone", "mobile"],
        FallbackIntent::PhoneSearch,
    ),
    (
        &["laptop", "computer", "notebook"],
        FallbackIntent::ComputerSearch,
    ),
    (&["exchange", "swap", "trade"], FallbackIntent::Exchange),
    (
        &["search", "find", "need", "looking"],
        FallbackIntent::Search,
    ),
];

/// Decide which rule a message fires. Pure function; the topic gate runs
/// first and takes precedence over every keyword rule.
pub fn classify(message: &str) -> FallbackIntent {
    if topic_gate::is_off_topic(message) {
        return FallbackIntent::Refusal;
    }

    let folded = message.to_lowercase();
    for (terms, intent) in INTENT_RULES {
        if terms.iter().any(|t| folded.contains(t)) {
            return *intent;
        }
    }
    FallbackIntent::General
}

/// The deterministic responder.
pub struct FallbackEngine {
    catalog: Arc<dyn CatalogReader>,
}

impl FallbackEngine {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    /// Produce a response for a message. Never fails: every catalog
    /// problem along the way degrades to a fixed reassuring sentence.
    pub async fn respond(&self, message: &str) -> String {
        let intent = classify(message);
        debug!(?intent, "Fallback rule fired");

        match intent {
            FallbackIntent::Refusal => REFUSAL_MESSAGE.to_string(),
            FallbackIntent::BicycleSearch => format!(
                "{}\n💡 Want more details on any specific bicycle?",
                self.search_by_term_and_category("bicycle", "Sports").await
            ),
            FallbackIntent::PhoneSearch => format!(
                "{}\n💡 You can also search by brand if you have a preference.",
                self.search_by_term_and_category("phone", "Electronics")
                    .await
            ),
            FallbackIntent::ComputerSearch => format!(
                "{}\n💡 Tell me what you'll use it for and I can suggest a better match.",
                self.search_by_term_and_category("laptop", "Electronics")
                    .await
            ),
            FallbackIntent::Exchange => format!(
                "Great! Let me help you find an exchange.\n\n{}\n📝 Tell me what product you \
                 have to exchange and I'll suggest specific options.",
                self.category_grouped_summary().await
            ),
            FallbackIntent::Search => format!(
                "🔍 Here are the products available right now!\n\n{}\n💬 Tell me what specific \
                 type you're looking for so I can narrow it down.",
                self.category_grouped_summary().await
            ),
            FallbackIntent::General => format!(
                "🌱 Hi! I'm your SwapCircle exchange assistant.\n\n📦 **Products currently \
                 available:**\n{}\n💬 **How can I help you with exchanges?**\n• Search for a \
                 specific product\n• Suggest exchanges for your products\n• Filter by \
                 category\n\n💡 I only answer questions about SwapCircle and product exchanges.",
                self.category_grouped_summary().await
            ),
        }
    }

    /// Filter recent products by (title contains `term`) OR (category
    /// contains `category`), case-insensitive, capped at
    /// [`MAX_SEARCH_MATCHES`]. An empty result degrades to a "no exact
    /// match" sentence followed by the category summary, never an empty
    /// string.
    pub async fn search_by_term_and_category(&self, term: &str, category: &str) -> String {
        let products = match self.catalog.recent_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, term, "Catalog read failed during fallback search");
                return SEARCH_UNAVAILABLE.to_string();
            }
        };

        let matching: Vec<_> = products
            .iter()
            .filter(|p| p.title_contains(term) || p.category_contains(category))
            .take(MAX_SEARCH_MATCHES)
            .collect();

        if matching.is_empty() {
            return format!(
                "🔍 I didn't find an exact match for '{term}', but here are similar options:\n\n{}",
                self.category_grouped_summary().await
            );
        }

        let mut result = format!("🎯 I found {} available products:\n\n", matching.len());
        for product in matching {
            result.push_str(&format!(
                "• {} ({})\n",
                product.title_or_placeholder(),
                product.category_or_placeholder()
            ));
        }
        result
    }

    /// Group up to [`MAX_SUMMARY_PRODUCTS`] recent products by category
    /// (first-occurrence order, missing category → "Other") and render up
    /// to [`MAX_TITLES_PER_CATEGORY`] titles per group with a "+N more"
    /// line for the remainder. Degrades to a single reassuring sentence
    /// on any catalog problem.
    pub async fn category_grouped_summary(&self) -> String {
        let products = match self.catalog.recent_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Catalog read failed during fallback summary");
                return SUMMARY_UNAVAILABLE.to_string();
            }
        };

        if products.is_empty() {
            return SUMMARY_EMPTY.to_string();
        }

        // Group in first-occurrence order; a HashMap would shuffle the
        // rendered order between runs.
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for product in products.iter().take(MAX_SUMMARY_PRODUCTS) {
            let category = product
                .category
                .clone()
                .unwrap_or_else(|| "Other".to_string());
            let title = product.title_or_placeholder().to_string();
            match groups.iter_mut().find(|(name, _)| *name == category) {
                Some((_, titles)) => titles.push(title),
                None => groups.push((category, vec![title])),
            }
        }

        let mut result = String::new();
        for (category, titles) in &groups {
            result.push_str(&format!(" **{category}:**\n"));
            for title in titles.iter().take(MAX_TITLES_PER_CATEGORY) {
                result.push_str(&format!("  • {title}\n"));
            }
            if titles.len() > MAX_TITLES_PER_CATEGORY {
                result.push_str(&format!(
                    "  • ... and {} more\n",
                    titles.len() - MAX_TITLES_PER_CATEGORY
                ));
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use swapcircle_catalog::InMemoryCatalog;
    use swapcircle_core::error::CatalogError;
    use swapcircle_core::product::ProductSnapshot;

    struct BrokenCatalog;

    #[async_trait]
    impl CatalogReader for BrokenCatalog {
        async fn recent_products(&self) -> Result<Vec<ProductSnapshot>, CatalogError> {
            Err(CatalogError::Unavailable("down".into()))
        }

        async fn active_products_by_user(
            &self,
            _user_id: i64,
        ) -> Result<Vec<ProductSnapshot>, CatalogError> {
            Err(CatalogError::Unavailable("down".into()))
        }
    }

    fn engine(products: Vec<ProductSnapshot>) -> FallbackEngine {
        FallbackEngine::new(Arc::new(InMemoryCatalog::with_products(products)))
    }

    // ── classify ────────────────────────────────────────────────────────

    #[test]
    fn refusal_takes_precedence_over_every_rule() {
        // Contains both an off-topic stem and a bicycle term
        assert_eq!(
            classify("what's the capital? also bicycle"),
            FallbackIntent::Refusal
        );
    }

    #[test]
    fn first_match_wins_in_rule_order() {
        // Bicycle beats the later exchange rule
        assert_eq!(
            classify("I'd swap something for a bicycle"),
            FallbackIntent::BicycleSearch
        );
        // Phone beats the later search rule
        assert_eq!(
            classify("I need a phone"),
            FallbackIntent::PhoneSearch
        );
    }

    #[test]
    fn each_rule_reachable() {
        assert_eq!(classify("any bikes?"), FallbackIntent::BicycleSearch);
        assert_eq!(classify("got a smartphone to spare"), FallbackIntent::PhoneSearch);
        assert_eq!(classify("a laptop would be great"), FallbackIntent::ComputerSearch);
        assert_eq!(classify("I want to trade my guitar"), FallbackIntent::Exchange);
        assert_eq!(classify("I need something for my desk"), FallbackIntent::Search);
        assert_eq!(classify("hello there"), FallbackIntent::General);
    }

    // ── search_by_term_and_category ─────────────────────────────────────

    #[tokio::test]
    async fn search_matches_title_or_category() {
        let engine = engine(vec![
            ProductSnapshot::new("Mountain Bike", "Sports"),
            ProductSnapshot::new("Desk Lamp", "Home"),
        ]);

        let result = engine.search_by_term_and_category("bicycle", "Sports").await;
        assert!(result.contains("Mountain Bike"));
        assert!(!result.contains("Desk Lamp"));
        assert!(result.contains("I found 1 available products"));
    }

    #[tokio::test]
    async fn search_caps_at_five_matches() {
        let products = (0..8)
            .map(|i| ProductSnapshot::new(format!("Bicycle {i}"), "Sports"))
            .collect();
        let engine = engine(products);

        let result = engine.search_by_term_and_category("bicycle", "Sports").await;
        assert!(result.contains("I found 5 available products"));
        assert_eq!(result.matches("• Bicycle").count(), MAX_SEARCH_MATCHES);
    }

    #[tokio::test]
    async fn empty_search_degrades_to_summary() {
        let engine = engine(vec![ProductSnapshot::new("Desk Lamp", "Home")]);
        let result = engine.search_by_term_and_category("bicycle", "Sports").await;
        assert!(result.contains("didn't find an exact match for 'bicycle'"));
        assert!(result.contains("Desk Lamp"));
    }

    #[tokio::test]
    async fn search_on_broken_catalog_is_user_safe() {
        let engine = FallbackEngine::new(Arc::new(BrokenCatalog));
        let result = engine.search_by_term_and_category("bicycle", "Sports").await;
        assert_eq!(result, SEARCH_UNAVAILABLE);
        assert!(!result.contains("down"));
    }

    // ── category_grouped_summary ────────────────────────────────────────

    #[tokio::test]
    async fn summary_groups_and_counts_overflow() {
        let engine = engine(vec![
            ProductSnapshot::new("TV", "Electronics"),
            ProductSnapshot::new("Radio", "Electronics"),
            ProductSnapshot::new("Camera", "Electronics"),
            ProductSnapshot::new("Console", "Electronics"),
        ]);

        let summary = engine.category_grouped_summary().await;
        assert!(summary.contains("**Electronics:**"));
        assert_eq!(summary.matches("  • ").count(), 4); // 3 titles + overflow line
        assert!(summary.contains("... and 1 more"));
    }

    #[tokio::test]
    async fn summary_missing_category_goes_to_other() {
        let engine = engine(vec![ProductSnapshot {
            title: Some("Mystery Box".into()),
            category: None,
            owner_id: None,
        }]);

        let summary = engine.category_grouped_summary().await;
        assert!(summary.contains("**Other:**"));
        assert!(summary.contains("Mystery Box"));
    }

    #[tokio::test]
    async fn summary_considers_at_most_ten_products() {
        let products = (0..15)
            .map(|i| ProductSnapshot::new(format!("Item {i}"), format!("Cat {i}")))
            .collect();
        let engine = engine(products);

        let summary = engine.category_grouped_summary().await;
        assert_eq!(summary.matches("**Cat").count(), MAX_SUMMARY_PRODUCTS);
    }

    #[tokio::test]
    async fn summary_on_empty_catalog() {
        let engine = engine(vec![]);
        assert_eq!(engine.category_grouped_summary().await, SUMMARY_EMPTY);
    }

    #[tokio::test]
    async fn summary_on_broken_catalog_is_reassuring() {
        let engine = FallbackEngine::new(Arc::new(BrokenCatalog));
        let summary = engine.category_grouped_summary().await;
        assert_eq!(summary, SUMMARY_UNAVAILABLE);
    }

    // ── respond ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn off_topic_gets_refusal_verbatim() {
        let engine = engine(vec![]);
        let response = engine.respond("What's the capital of France?").await;
        assert_eq!(response, REFUSAL_MESSAGE);
    }

    #[tokio::test]
    async fn bicycle_message_lists_sports_matches() {
        let engine = engine(vec![ProductSnapshot::new("Trek 520", "Sports")]);
        let response = engine.respond("I'm looking for a bicycle").await;
        assert!(response.contains("Trek 520"));
        assert!(response.contains("💡"));
    }

    #[tokio::test]
    async fn general_message_gets_menu() {
        let engine = engine(vec![ProductSnapshot::new("Trek 520", "Sports")]);
        let response = engine.respond("hello").await;
        assert!(response.contains("SwapCircle exchange assistant"));
        assert!(response.contains("• Search for a specific product"));
        assert!(response.contains("Trek 520"));
    }

    #[tokio::test]
    async fn respond_never_fails_even_with_broken_catalog() {
        let engine = FallbackEngine::new(Arc::new(BrokenCatalog));
        for message in ["hello", "any bikes?", "I want to trade", "find me a gift"] {
            let response = engine.respond(message).await;
            assert!(!response.is_empty());
            assert!(!response.contains("down"));
        }
    }
}
