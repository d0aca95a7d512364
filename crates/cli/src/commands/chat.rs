//! `swapcircle chat` — Send a single message to the assistant.

use swapcircle_config::AppConfig;
use swapcircle_core::{ChatRequest, ChatStatus};

pub async fn run(message: String, user_id: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if !config.has_api_key() {
        eprintln!();
        eprintln!("  NOTE: No API key configured — the model call will fail and");
        eprintln!("  the deterministic fallback will answer instead.");
        eprintln!();
        eprintln!("  Set one of these environment variables to enable the model:");
        eprintln!("    SWAPCIRCLE_API_KEY / OPENROUTER_API_KEY / OPENAI_API_KEY");
        eprintln!();
    }

    let assistant = super::build_assistant(&config).await?;

    let request = match user_id {
        Some(id) => ChatRequest::for_user(&message, id),
        None => ChatRequest::new(&message),
    };

    eprint!("  Thinking...");
    let response = assistant.chat(&request).await;
    eprint!("\r              \r");

    println!("{}", response.response);
    if response.status == ChatStatus::Fallback {
        if let Some(note) = &response.message {
            eprintln!();
            eprintln!("  ({note})");
        }
    }

    Ok(())
}
