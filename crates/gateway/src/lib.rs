//! HTTP API gateway for the SwapCircle assistant.
//!
//! Thin observable boundary over the assistant core: one endpoint for the
//! chat assistant (registered under the legacy path and the v1 alias, as
//! the platform's clients use both), one for product search, and a health
//! check. All hard logic lives in `swapcircle-assistant`; handlers only
//! translate between HTTP shapes and the core contracts.
//!
//! Built on Axum for high performance async HTTP.

use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use swapcircle_assistant::ChatAssistant;
use swapcircle_core::{ChatRequest, ChatResponse, SearchOutcome};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub assistant: ChatAssistant,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat/assistant", post(chat_handler))
        .route("/api/v1/ai/assistant", post(chat_handler))
        .route("/chat/search-products", get(search_handler))
        .layer(DefaultBodyLimit::max(64 * 1024)) // chat messages are short
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(
    config: &swapcircle_config::AppConfig,
    assistant: ChatAssistant,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(Arc::new(GatewayState { assistant }));

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// The chat assistant endpoint.
///
/// A missing message is a caller contract violation, rejected here at the
/// boundary before reaching the core.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message is required".into(),
            }),
        ));
    }

    Ok(Json(state.assistant.chat(&payload).await))
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default)]
    category: Option<String>,
}

async fn search_handler(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchOutcome> {
    Json(
        state
            .assistant
            .search_products(&params.query, params.category.as_deref())
            .await,
    )
}
