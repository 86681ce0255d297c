//! In-Memory Conversation Store Adapter
//!
//! Keeps conversations in a map keyed by session.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::ports::ConversationStore;

/// In-memory storage for conversations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<SessionId, Conversation>>>,
}

impl InMemoryConversationStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored conversations
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.conversations.write().await.clear();
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load_or_create_active(
        &self,
        session_id: &SessionId,
        user_id: Option<&UserId>,
    ) -> Result<Conversation, DomainError> {
        let existing = self.conversations.read().await.get(session_id).cloned();

        let conversation = match existing {
            Some(mut conversation) => {
                conversation.reactivate();
                if let Some(user_id) = user_id {
                    conversation.link_user(user_id.clone());
                }
                conversation
            }
            None => Conversation::new(session_id.clone(), user_id.cloned()),
        };

        Ok(conversation)
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Conversation>, DomainError> {
        Ok(self.conversations.read().await.get(session_id).cloned())
    }

    async fn persist(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut stored = conversation.clone();
        stored.mark_saved();
        self.conversations
            .write()
            .await
            .insert(conversation.session_id().clone(), stored);
        Ok(())
    }

    async fn sweep_inactive(&self, retention_days: u32) -> Result<u64, DomainError> {
        let now = Timestamp::now();
        let mut conversations = self.conversations.write().await;
        let before = conversations.len();
        conversations.retain(|_, c| !c.is_stale(now, retention_days));
        Ok((before - conversations.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{ConversationState, Preferences};
    use crate::domain::foundation::ConversationId;

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    fn idle_conversation(id: &str, idle_days: i64) -> Conversation {
        let last = Timestamp::now().minus_days(idle_days);
        Conversation::reconstitute(
            ConversationId::new(),
            session(id),
            None,
            Preferences::default(),
            ConversationState::Searching,
            Vec::new(),
            3,
            last,
            true,
            last,
            last,
        )
    }

    #[tokio::test]
    async fn creates_new_conversation_without_persisting() {
        let store = InMemoryConversationStore::new();

        let conv = store.load_or_create_active(&session("s1"), None).await.unwrap();

        assert_eq!(conv.state(), ConversationState::Greeting);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn loads_persisted_conversation() {
        let store = InMemoryConversationStore::new();
        let mut conv = store.load_or_create_active(&session("s1"), None).await.unwrap();
        conv.mark_follow_up().unwrap();
        store.persist(&conv).await.unwrap();

        let loaded = store.load_or_create_active(&session("s1"), None).await.unwrap();

        assert_eq!(loaded.id(), conv.id());
        assert_eq!(loaded.state(), ConversationState::FollowUp);
    }

    #[tokio::test]
    async fn reactivates_ended_conversation_and_links_user() {
        let store = InMemoryConversationStore::new();
        let mut conv = Conversation::new(session("s1"), None);
        conv.end();
        store.persist(&conv).await.unwrap();

        let user = UserId::new("user-9").unwrap();
        let loaded = store
            .load_or_create_active(&session("s1"), Some(&user))
            .await
            .unwrap();

        assert!(loaded.is_active());
        assert_eq!(loaded.id(), conv.id());
        assert_eq!(loaded.user_id(), Some(&user));
    }

    #[tokio::test]
    async fn loaded_conversation_has_no_unsaved_turns() {
        use crate::domain::conversation::{ExtractedData, Intent, Turn};

        let store = InMemoryConversationStore::new();
        let mut conv = store.load_or_create_active(&session("s1"), None).await.unwrap();
        conv.record_exchange(
            Turn::user("hi", Intent::GeneralChat, ExtractedData::default()).unwrap(),
            Turn::assistant("hello", Vec::new()).unwrap(),
        );
        assert_eq!(conv.unsaved_turns().len(), 2);
        store.persist(&conv).await.unwrap();

        let loaded = store.load_or_create_active(&session("s1"), None).await.unwrap();

        assert_eq!(loaded.history().len(), 2);
        assert!(loaded.unsaved_turns().is_empty());
    }

    #[tokio::test]
    async fn find_by_session_does_not_create() {
        let store = InMemoryConversationStore::new();
        assert!(store.find_by_session(&session("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_stale_conversations() {
        let store = InMemoryConversationStore::new();
        store.persist(&idle_conversation("old", 45)).await.unwrap();
        store.persist(&idle_conversation("recent", 2)).await.unwrap();

        let removed = store.sweep_inactive(30).await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.find_by_session(&session("recent")).await.unwrap().is_some());
    }
}
