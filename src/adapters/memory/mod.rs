//! In-memory adapters for development and testing.

mod conversation_store;
mod property_repository;

pub use conversation_store::InMemoryConversationStore;
pub use property_repository::InMemoryPropertyRepository;
