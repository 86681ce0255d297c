//! HTTP routes for chatbot endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{end_conversation, get_conversation, send_message, ChatbotHandlers};

/// Creates the chatbot router, mounted under `/api/chatbot`.
pub fn chatbot_routes(handlers: ChatbotHandlers) -> Router {
    Router::new()
        .route("/message", post(send_message))
        .route("/conversations/:session_id", get(get_conversation))
        .route("/conversations/:session_id/end", post(end_conversation))
        .with_state(handlers)
}
