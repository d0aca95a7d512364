//! `swapcircle search` — Search the product catalog.

use swapcircle_config::AppConfig;
use swapcircle_core::SearchOutcome;

pub async fn run(
    query: String,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let assistant = super::build_assistant(&config).await?;

    match assistant.search_products(&query, category.as_deref()).await {
        SearchOutcome::Found(result) => {
            println!("{}", result.message);
            for product in &result.products {
                println!(
                    "  • {} ({})",
                    product.title_or_placeholder(),
                    product.category_or_placeholder()
                );
            }
        }
        SearchOutcome::Unavailable { message, .. } => {
            eprintln!("{message}");
        }
    }

    Ok(())
}
