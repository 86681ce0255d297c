//! EndConversation command handler.
//!
//! Marks a conversation inactive. History and preferences are kept; the next
//! message on the same session reopens it.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::ConversationStore;

/// Command to end a session's conversation.
#[derive(Debug, Clone)]
pub struct EndConversationCommand {
    pub session_id: SessionId,
}

/// Handler for ending conversations.
pub struct EndConversationHandler {
    store: Arc<dyn ConversationStore>,
}

impl EndConversationHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// - `ConversationNotFound` if the session has no conversation
    /// - `DatabaseError` on persistence failure
    pub async fn handle(&self, cmd: EndConversationCommand) -> Result<(), DomainError> {
        let mut conversation = self
            .store
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                    .with_detail("session_id", cmd.session_id.as_str())
            })?;

        conversation.end();
        self.store.persist(&conversation).await?;

        tracing::info!(session_id = %cmd.session_id, "Conversation ended");
        Ok(())
    }
}
