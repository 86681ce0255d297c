//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (`HandleMessage`, `EndConversation`, `SweepInactive`) mutate
//! conversations; queries (`GetConversation`, `AiSearch`) only read.

pub mod handlers;

pub use handlers::{
    // Chatbot
    ComposerSettings, EndConversationCommand, EndConversationHandler, GetConversationHandler,
    GetConversationQuery, HandleMessageCommand, HandleMessageError, HandleMessageHandler,
    HandleMessageResult, Reply, ResponseComposer, SweepInactiveHandler, DEFAULT_RETENTION_DAYS,
    // Search
    AiSearchError, AiSearchHandler, AiSearchQuery, AiSearchResult, DraftFilter,
};
