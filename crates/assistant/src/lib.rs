//! The SwapCircle chat assistant core.
//!
//! Sits between the raw user message and the language-model call:
//!
//! 1. **Gate** the message (`topic_gate`) — off-topic short-circuits to
//!    the fallback engine without touching the model
//! 2. **Build context** (`context`) — a bounded snapshot of catalog state
//! 3. **Assemble the prompt** (`prompt`) — fixed policy + context + query
//! 4. **Call the model** — any failure degrades to the fallback engine
//!
//! Each invocation is stateless and fully reproducible from its inputs
//! plus the current catalog snapshot; no session state is carried.

pub mod context;
pub mod fallback;
pub mod prompt;
pub mod topic_gate;

use std::sync::Arc;

use tracing::{debug, info, warn};

use swapcircle_core::provider::CompletionRequest;
use swapcircle_core::{
    CatalogReader, ChatRequest, ChatResponse, Provider, SearchOutcome, SearchResult,
};

pub use context::ContextBuilder;
pub use fallback::{FallbackEngine, FallbackIntent};
pub use prompt::REFUSAL_MESSAGE;

/// Diagnostic note attached when the provider fails and the deterministic
/// fallback answers instead.
pub const UNAVAILABLE_NOTE: &str =
    "Assistant temporarily unavailable, using smart fallback response";

/// Cap on products returned by [`ChatAssistant::search_products`].
pub const MAX_SEARCH_PRODUCTS: usize = 10;

/// The chat orchestrator: gate → context → prompt → model, with the
/// fallback engine behind every failure path.
pub struct ChatAssistant {
    provider: Arc<dyn Provider>,
    catalog: Arc<dyn CatalogReader>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    context: ContextBuilder,
    fallback: FallbackEngine,
}

impl ChatAssistant {
    /// Create an assistant over a provider and a catalog.
    pub fn new(
        provider: Arc<dyn Provider>,
        catalog: Arc<dyn CatalogReader>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            context: ContextBuilder::new(catalog.clone()),
            fallback: FallbackEngine::new(catalog.clone()),
            catalog,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    /// Set the max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Answer a chat request. Always produces a valid response envelope —
    /// nothing on this path is allowed to escape as an error.
    pub async fn chat(&self, request: &ChatRequest) -> ChatResponse {
        let user_id = request.numeric_user_id();
        info!(
            message_len = request.message.len(),
            has_user = user_id.is_some(),
            "Processing chat request"
        );

        // Policy gate runs before any catalog or model work. The refusal
        // is deterministic, so the fallback engine produces it directly.
        if topic_gate::is_off_topic(&request.message) {
            debug!(
                subject = topic_gate::matched_subject(&request.message),
                "Message gated off-topic"
            );
            return ChatResponse::fallback(self.fallback.respond(&request.message).await, None);
        }

        // Context must be fully built before assembly, and the prompt
        // fully assembled before the model is invoked.
        let context = self.context.build(user_id).await;
        let prompt = prompt::assemble(&context, &request.message);

        let completion_request = CompletionRequest {
            model: self.model.clone(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        match self.provider.complete(completion_request).await {
            Ok(completion) => {
                debug!(model = %completion.model, "Model answered");
                ChatResponse::success(completion.text)
            }
            Err(e) => {
                warn!(error = %e, "Provider call failed, degrading to fallback");
                ChatResponse::fallback(
                    self.fallback.respond(&request.message).await,
                    Some(UNAVAILABLE_NOTE.to_string()),
                )
            }
        }
    }

    /// Search recent products by title query and optional category filter.
    ///
    /// An empty query matches every title; a missing category matches
    /// every category. Capped at [`MAX_SEARCH_PRODUCTS`]. A catalog
    /// failure yields the error-shaped outcome, never an exception.
    pub async fn search_products(&self, query: &str, category: Option<&str>) -> SearchOutcome {
        let products = match self.catalog.recent_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, query, "Catalog read failed during product search");
                return SearchOutcome::Unavailable {
                    error: "Failed to search products".into(),
                    message: "Products could not be loaded at this moment".into(),
                };
            }
        };

        let matching: Vec<_> = products
            .into_iter()
            .filter(|p| {
                let query_match = query.is_empty() || p.title_contains(query);
                let category_match = category.is_none_or(|c| p.category_contains(c));
                query_match && category_match
            })
            .take(MAX_SEARCH_PRODUCTS)
            .collect();

        SearchOutcome::Found(SearchResult {
            found: matching.len(),
            message: format!("🔍 Found {} products for '{}'", matching.len(), query),
            query: query.to_string(),
            category: category.map(|c| c.to_string()),
            products: matching,
        })
    }
}
