//! Conversation domain module.
//!
//! The deterministic half of the dialog engine: pattern-based intent
//! classification, entity extraction, the dialog state machine and the
//! conversation aggregate that ties them together.

mod classifier;
mod conversation;
pub mod extractor;
mod intent;
mod message;
pub mod patterns;
mod preferences;
mod state;

pub use classifier::{classify, IntentMatch};
pub use conversation::Conversation;
pub use extractor::{extract, price_mentions, property_reference, ExtractedData};
pub use intent::Intent;
pub use message::{Turn, TurnRole};
pub use patterns::PatternCategory;
pub use preferences::{
    Budget, LocationPreference, Preferences, Purpose, Requirement, SizeRange, Urgency,
};
pub use state::ConversationState;
