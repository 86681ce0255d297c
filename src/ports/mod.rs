//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialog engine and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - single chat-completion call against one model
//! - `ConversationStore` - load/create, persist and expire conversations
//! - `PropertyRepository` - query listings by structured filter

mod ai_provider;
mod conversation_store;
mod property_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole, TokenUsage,
};
pub use conversation_store::ConversationStore;
pub use property_repository::PropertyRepository;
