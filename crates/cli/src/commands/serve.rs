//! `swapcircle serve` — Start the HTTP API server.

use swapcircle_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🌱 SwapCircle Assistant Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Provider:  {}", config.default_provider);
    println!("   Catalog:   {}", config.catalog.backend);

    let assistant = super::build_assistant(&config).await?;
    swapcircle_gateway::start(&config, assistant).await?;

    Ok(())
}
