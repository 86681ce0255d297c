//! HTTP adapter for chatbot endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatReplyResponse, ConversationResponse, SendMessageRequest, TurnResponse};
pub use handlers::ChatbotHandlers;
pub use routes::chatbot_routes;
