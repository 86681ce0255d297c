//! Chatbot command and query handlers.
//!
//! The dialog orchestrator plus the conversation read/end/sweep operations.

pub mod composer;
mod end_conversation;
mod get_conversation;
mod handle_message;
mod sweep_inactive;
pub mod templates;

pub use composer::{ComposerSettings, Reply, ResponseComposer};
pub use end_conversation::{EndConversationCommand, EndConversationHandler};
pub use get_conversation::{GetConversationHandler, GetConversationQuery};
pub use handle_message::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult,
};
pub use sweep_inactive::{SweepInactiveHandler, DEFAULT_RETENTION_DAYS};
