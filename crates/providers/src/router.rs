//! Provider router — selects the correct LLM provider based on config.

use std::collections::HashMap;
use std::sync::Arc;

use swapcircle_core::provider::Provider;

use crate::anthropic::AnthropicProvider;
use crate::openai_compat::OpenAiCompatProvider;

/// Routes LLM requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names.
    pub fn list(&self) -> Vec<&str> {
        self.providers.keys().map(|s| s.as_str()).collect()
    }
}

/// Build providers from configuration.
pub fn build_from_config(config: &swapcircle_config::AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .api_url
            .clone()
            .unwrap_or_else(|| default_base_url(name));

        let provider: Arc<dyn Provider> = if name == "anthropic" {
            // Use the native provider for direct API access
            let mut p = AnthropicProvider::new(&api_key);
            if provider_config.api_url.is_some() {
                p = p.with_base_url(&base_url);
            }
            Arc::new(p)
        } else {
            Arc::new(OpenAiCompatProvider::new(name, &base_url, &api_key))
        };

        router.register(name.clone(), provider);
    }

    // Ensure the default provider exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let base_url = default_base_url(&config.default_provider);

        let provider: Arc<dyn Provider> = if config.default_provider == "anthropic" {
            Arc::new(AnthropicProvider::new(&api_key))
        } else {
            Arc::new(OpenAiCompatProvider::new(
                &config.default_provider,
                &base_url,
                &api_key,
            ))
        };

        router.register(config.default_provider.clone(), provider);
    }

    router
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "anthropic" => "https://api.anthropic.com".into(),
        _ => "https://openrouter.ai/api/v1".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapcircle_config::AppConfig;

    #[test]
    fn bare_config_builds_default_provider() {
        let config = AppConfig::default();
        let router = build_from_config(&config);
        let provider = router.default().expect("default provider should exist");
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn anthropic_gets_native_provider() {
        let config = AppConfig {
            default_provider: "anthropic".into(),
            ..AppConfig::default()
        };
        let router = build_from_config(&config);
        assert_eq!(router.default().unwrap().name(), "anthropic");
    }

    #[test]
    fn configured_providers_registered() {
        let mut config = AppConfig::default();
        config.providers.insert(
            "ollama".into(),
            swapcircle_config::ProviderConfig {
                api_key: None,
                api_url: Some("http://localhost:11434/v1".into()),
                default_model: None,
            },
        );
        let router = build_from_config(&config);
        assert!(router.get("ollama").is_some());
        // Default still registered alongside
        assert!(router.default().is_some());
    }
}
