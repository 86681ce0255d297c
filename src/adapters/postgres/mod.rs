//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresConversationStore` - conversations plus append-only turn history
//! - `PostgresPropertyRepository` - filtered listing queries and view counters

mod conversation_store;
mod property_repository;

pub use conversation_store::PostgresConversationStore;
pub use property_repository::PostgresPropertyRepository;
