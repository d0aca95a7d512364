//! SwapCircle CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the HTTP gateway
//! - `chat`   — Send a single message to the assistant
//! - `search` — Search the product catalog

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "swapcircle",
    about = "SwapCircle — exchange platform assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send a single message to the assistant
    Chat {
        /// The message to send
        message: String,

        /// Ask on behalf of a specific user id
        #[arg(short, long)]
        user_id: Option<i64>,
    },

    /// Search the product catalog
    Search {
        /// Title query (may be empty to list everything)
        #[arg(default_value = "")]
        query: String,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Chat { message, user_id } => commands::chat::run(message, user_id).await?,
        Commands::Search { query, category } => commands::search::run(query, category).await?,
    }

    Ok(())
}
