//! Conversation store port.
//!
//! Defines the contract for loading, persisting and expiring Conversation
//! aggregates. One conversation exists per session key.
//!
//! # Design
//!
//! - **Whole-aggregate writes**: a conversation is loaded, mutated and
//!   persisted as one unit per exchange
//! - **Last write wins**: no per-session locking; concurrent exchanges on
//!   the same session overwrite each other
//! - **Out-of-band expiry**: stale conversations are removed by the sweep,
//!   never on the request path

use async_trait::async_trait;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{DomainError, SessionId, UserId};

/// Store port for Conversation aggregate persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Load the conversation for a session, creating it if none exists.
    ///
    /// An ended conversation is reactivated with its history intact. When
    /// `user_id` is given and the conversation is anonymous, the user is
    /// linked. The returned aggregate is not persisted until `persist`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn load_or_create_active(
        &self,
        session_id: &SessionId,
        user_id: Option<&UserId>,
    ) -> Result<Conversation, DomainError>;

    /// Find the conversation for a session without creating one.
    ///
    /// Returns `None` if the session is unknown.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// Insert or replace the conversation keyed by its session.
    ///
    /// Conversation fields are last-write-wins. Only `unsaved_turns` are
    /// written, appended after whatever history is already stored.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn persist(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Delete conversations idle for longer than `retention_days`.
    ///
    /// Returns the number of conversations removed.
    async fn sweep_inactive(&self, retention_days: u32) -> Result<u64, DomainError>;
}
