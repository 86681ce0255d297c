//! HTTP adapters - REST API implementations.
//!
//! Each module exposes its handlers state and a router; `api_router`
//! mounts them together with the health check.

pub mod chatbot;
pub mod search;
pub mod shared;

use axum::{routing::get, Json, Router};
use serde::Serialize;

pub use chatbot::{chatbot_routes, ChatbotHandlers};
pub use search::{search_routes, SearchHandlers};
pub use shared::{ErrorResponse, PropertyResponse};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the full API router (without middleware layers).
pub fn api_router(chatbot: ChatbotHandlers, search: SearchHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/chatbot", chatbot_routes(chatbot))
        .nest("/api/properties", search_routes(search))
}
