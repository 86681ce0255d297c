//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod chatbot;
pub mod search;

pub use chatbot::{
    ComposerSettings, EndConversationCommand, EndConversationHandler, GetConversationHandler,
    GetConversationQuery, HandleMessageCommand, HandleMessageError, HandleMessageHandler,
    HandleMessageResult, Reply, ResponseComposer, SweepInactiveHandler, DEFAULT_RETENTION_DAYS,
};
pub use search::{AiSearchError, AiSearchHandler, AiSearchQuery, AiSearchResult, DraftFilter};
