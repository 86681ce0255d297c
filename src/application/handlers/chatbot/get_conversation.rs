//! GetConversation query handler.

use std::sync::Arc;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::ConversationStore;

/// Query for a session's conversation.
#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub session_id: SessionId,
}

/// Handler for reading a conversation with its history.
pub struct GetConversationHandler {
    store: Arc<dyn ConversationStore>,
}

impl GetConversationHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// - `ConversationNotFound` if the session has no conversation
    pub async fn handle(&self, query: GetConversationQuery) -> Result<Conversation, DomainError> {
        self.store
            .find_by_session(&query.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                    .with_detail("session_id", query.session_id.as_str())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConversationStore;

    #[tokio::test]
    async fn returns_persisted_conversation() {
        let store = InMemoryConversationStore::new();
        let session_id = SessionId::new("s1").unwrap();
        let conv = Conversation::new(session_id.clone(), None);
        store.persist(&conv).await.unwrap();

        let handler = GetConversationHandler::new(Arc::new(store));
        let found = handler
            .handle(GetConversationQuery { session_id })
            .await
            .unwrap();

        assert_eq!(found.id(), conv.id());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetConversationHandler::new(Arc::new(InMemoryConversationStore::new()));

        let err = handler
            .handle(GetConversationQuery {
                session_id: SessionId::new("missing").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ConversationNotFound);
    }
}
