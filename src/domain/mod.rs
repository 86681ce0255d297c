//! Domain layer containing the dialog engine's business logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine trait)
//! - `conversation` - Intent classification, entity extraction, dialog state and the conversation aggregate
//! - `property` - Listing read model and structured search filter

pub mod conversation;
pub mod foundation;
pub mod property;
