//! CLI subcommand implementations.

pub mod chat;
pub mod search;
pub mod serve;

use std::sync::Arc;

use swapcircle_assistant::ChatAssistant;
use swapcircle_catalog::{InMemoryCatalog, SqliteCatalog};
use swapcircle_config::AppConfig;
use swapcircle_core::CatalogReader;

/// Build the catalog reader the config asks for.
pub async fn build_catalog(
    config: &AppConfig,
) -> Result<Arc<dyn CatalogReader>, Box<dyn std::error::Error>> {
    match config.catalog.backend.as_str() {
        "memory" => Ok(Arc::new(InMemoryCatalog::new())),
        _ => Ok(Arc::new(
            SqliteCatalog::new(&config.catalog.sqlite_path).await?,
        )),
    }
}

/// Build the assistant from config: provider router + catalog reader.
pub async fn build_assistant(
    config: &AppConfig,
) -> Result<ChatAssistant, Box<dyn std::error::Error>> {
    let router = swapcircle_providers::router::build_from_config(config);
    let provider = router.default().ok_or("No default provider configured")?;
    let catalog = build_catalog(config).await?;

    Ok(ChatAssistant::new(
        provider,
        catalog,
        &config.default_model,
        config.default_temperature,
    )
    .with_max_tokens(config.default_max_tokens))
}
