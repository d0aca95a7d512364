//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to send an assembled prompt to an LLM and get a
//! completion back. The orchestrator calls `complete()` without knowing
//! which backend is configured — pure polymorphism.
//!
//! Implementations: OpenAI-compatible, Anthropic, custom endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// The assembled prompt: a fixed system policy part and a user part that
/// carries the rendered catalog context plus the raw user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPrompt {
    /// System persona/policy document
    pub system: String,

    /// Context block + delimited user query
    pub user: String,
}

/// Configuration for a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "anthropic/claude-sonnet-4", "gpt-4o")
    pub model: String,

    /// The assembled prompt
    pub prompt: ChatPrompt,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// One blocking remote call per request, no internal retry — resilience
/// lives in the orchestrator's fallback path, and any failure mode
/// (timeout, transport, malformed response) collapses to a `ProviderError`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openrouter", "anthropic").
    fn name(&self) -> &str;

    /// Send a prompt and get a completion.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<Completion, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_defaults() {
        let req = CompletionRequest {
            model: "gpt-4o".into(),
            prompt: ChatPrompt {
                system: "policy".into(),
                user: "context\n\nUSER QUERY: hi".into(),
            },
            temperature: default_temperature(),
            max_tokens: None,
        };
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn prompt_serialization_roundtrip() {
        let prompt = ChatPrompt {
            system: "You are the assistant".into(),
            user: "USER QUERY: anything to swap?".into(),
        };
        let json = serde_json::to_string(&prompt).unwrap();
        let back: ChatPrompt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prompt);
    }
}
