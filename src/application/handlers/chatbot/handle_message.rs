//! HandleMessage command handler - the dialog entry point.
//!
//! One call is one exchange: load or create the session's conversation,
//! classify and extract, advance the state machine, compose a reply, append
//! both turns and persist.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::{
    classify, extract, ConversationState, ExtractedData, Intent, Turn,
};
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::property::Property;
use crate::ports::ConversationStore;

use super::composer::ResponseComposer;

/// Command to process one inbound chat message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    /// Client-held session key; a new one is generated when absent or blank.
    pub session_id: Option<String>,
    pub user_id: Option<UserId>,
    pub message: String,
}

impl HandleMessageCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            session_id: None,
            user_id: None,
            message: message.into(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Result of one exchange.
#[derive(Debug, Clone)]
pub struct HandleMessageResult {
    pub reply: String,
    pub session_id: SessionId,
    pub state: ConversationState,
    pub intent: Intent,
    pub confidence: f32,
    pub extracted: ExtractedData,
    pub properties: Vec<Property>,
}

/// Errors that can occur while handling a message.
#[derive(Debug, Clone, Error)]
pub enum HandleMessageError {
    /// Message text is empty or whitespace only.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// The supplied session id is not acceptable.
    #[error("Invalid session id: {0}")]
    InvalidSession(String),

    /// Loading or persisting the conversation failed.
    #[error("Conversation store error: {0}")]
    Store(String),
}

impl From<DomainError> for HandleMessageError {
    fn from(err: DomainError) -> Self {
        HandleMessageError::Store(err.to_string())
    }
}

/// Handler orchestrating a single dialog exchange.
pub struct HandleMessageHandler {
    store: Arc<dyn ConversationStore>,
    composer: ResponseComposer,
}

impl HandleMessageHandler {
    pub fn new(store: Arc<dyn ConversationStore>, composer: ResponseComposer) -> Self {
        Self { store, composer }
    }

    pub async fn handle(
        &self,
        cmd: HandleMessageCommand,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        // 1. Validate input before touching any state
        let text = cmd.message.trim();
        if text.is_empty() {
            return Err(HandleMessageError::EmptyMessage);
        }

        let session_id = match cmd.session_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => SessionId::new(raw)
                .map_err(|e| HandleMessageError::InvalidSession(e.to_string()))?,
            _ => SessionId::generate(),
        };

        // 2. Load the session's conversation (created fresh if unknown)
        let mut conversation = self
            .store
            .load_or_create_active(&session_id, cmd.user_id.as_ref())
            .await?;
        let previous_state = conversation.state();

        // 3. Understand the message
        let extracted = extract(text);
        let classification = classify(text);

        // 4. Advance the state machine and merge preferences
        let state = conversation.apply_intent(classification.intent, &extracted);

        // 5. Compose the reply against the updated conversation
        let reply = self.composer.compose(&conversation, text, &classification).await;

        // 6. Record the exchange
        let user_turn = Turn::user(text, classification.intent, extracted.clone())?;
        let assistant_turn = Turn::assistant(reply.text.clone(), reply.suggested_ids())?;
        conversation.record_exchange(user_turn, assistant_turn);

        // 7. Persist
        self.store.persist(&conversation).await.map_err(|e| {
            tracing::error!(session_id = %session_id, error = %e, "Failed to persist conversation");
            HandleMessageError::from(e)
        })?;

        tracing::info!(
            session_id = %session_id,
            intent = %classification.intent,
            confidence = classification.confidence,
            from_state = %previous_state,
            state = %state,
            results = reply.properties.len(),
            "Handled chat message"
        );

        Ok(HandleMessageResult {
            reply: reply.text,
            session_id,
            state,
            intent: classification.intent,
            confidence: classification.confidence,
            extracted,
            properties: reply.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConversationStore, InMemoryPropertyRepository};
    use crate::domain::conversation::Conversation;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::property::fixtures::property;
    use crate::domain::property::PropertyType;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl ConversationStore for FailingStore {
        async fn load_or_create_active(
            &self,
            session_id: &SessionId,
            user_id: Option<&UserId>,
        ) -> Result<Conversation, DomainError> {
            Ok(Conversation::new(session_id.clone(), user_id.cloned()))
        }

        async fn find_by_session(
            &self,
            _session_id: &SessionId,
        ) -> Result<Option<Conversation>, DomainError> {
            Ok(None)
        }

        async fn persist(&self, _conversation: &Conversation) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"))
        }

        async fn sweep_inactive(&self, _retention_days: u32) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    fn handler_with(
        store: Arc<dyn ConversationStore>,
        repo: InMemoryPropertyRepository,
    ) -> HandleMessageHandler {
        HandleMessageHandler::new(store, ResponseComposer::new(Arc::new(repo), None))
    }

    fn handler(store: &InMemoryConversationStore) -> HandleMessageHandler {
        handler_with(Arc::new(store.clone()), InMemoryPropertyRepository::new())
    }

    mod validation {
        use super::*;

        #[tokio::test]
        async fn empty_message_is_rejected_without_side_effects() {
            let store = InMemoryConversationStore::new();

            let result = handler(&store)
                .handle(HandleMessageCommand::new("   ").with_session("s1"))
                .await;

            assert!(matches!(result, Err(HandleMessageError::EmptyMessage)));
            assert!(store.is_empty().await);
        }

        #[tokio::test]
        async fn oversized_session_id_is_rejected() {
            let store = InMemoryConversationStore::new();

            let result = handler(&store)
                .handle(HandleMessageCommand::new("hi").with_session("x".repeat(500)))
                .await;

            assert!(matches!(result, Err(HandleMessageError::InvalidSession(_))));
        }
    }

    mod exchange {
        use super::*;

        #[tokio::test]
        async fn missing_session_id_is_generated() {
            let store = InMemoryConversationStore::new();

            let result = handler(&store)
                .handle(HandleMessageCommand::new("Hello"))
                .await
                .unwrap();

            assert!(!result.session_id.as_str().is_empty());
            assert!(store.find_by_session(&result.session_id).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn greeting_moves_to_gathering_and_records_both_turns() {
            let store = InMemoryConversationStore::new();

            let result = handler(&store)
                .handle(HandleMessageCommand::new("Hi!").with_session("s1"))
                .await
                .unwrap();

            assert_eq!(result.intent, Intent::GeneralChat);
            assert_eq!(result.state, ConversationState::GatheringRequirements);

            let conv = store.find_by_session(&result.session_id).await.unwrap().unwrap();
            assert_eq!(conv.history().len(), 2);
            assert_eq!(conv.total_messages(), 1);
            assert_eq!(conv.history()[0].intent(), Some(Intent::GeneralChat));
        }

        #[tokio::test]
        async fn preferences_accumulate_across_messages() {
            let store = InMemoryConversationStore::new();
            let handler = handler(&store);

            handler
                .handle(HandleMessageCommand::new("I need a flat in Rajkot").with_session("s1"))
                .await
                .unwrap();
            let result = handler
                .handle(HandleMessageCommand::new("3 bhk with a pool").with_session("s1"))
                .await
                .unwrap();

            let conv = store.find_by_session(&result.session_id).await.unwrap().unwrap();
            let prefs = conv.preferences();
            assert_eq!(prefs.location.city.as_deref(), Some("Rajkot"));
            assert_eq!(prefs.property_type, Some(PropertyType::Flat));
            assert_eq!(prefs.bedrooms, Some(3));
            assert!(prefs.amenities.contains("pool"));
            assert_eq!(conv.total_messages(), 2);
        }

        #[tokio::test]
        async fn search_returns_seeded_property() {
            let store = InMemoryConversationStore::new();
            let listing = property("Rajkot", PropertyType::Flat, 3, 8_000_000);
            let handler = handler_with(
                Arc::new(store.clone()),
                InMemoryPropertyRepository::with_properties([listing.clone()]),
            );

            let result = handler
                .handle(HandleMessageCommand::new(
                    "3bhk flat in Rajkot under 80 lakh with parking",
                ))
                .await
                .unwrap();

            assert_eq!(result.intent, Intent::SearchProperty);
            assert_eq!(result.state, ConversationState::Searching);
            assert_eq!(result.properties, vec![listing.clone()]);

            let conv = store.find_by_session(&result.session_id).await.unwrap().unwrap();
            assert_eq!(conv.last_suggested_properties(), &[listing.id]);
        }

        #[tokio::test]
        async fn search_without_listing_criteria_keeps_gathering() {
            let store = InMemoryConversationStore::new();

            let result = handler(&store)
                .handle(HandleMessageCommand::new("I want to buy a property").with_session("s1"))
                .await
                .unwrap();

            assert_eq!(result.intent, Intent::SearchProperty);
            assert_eq!(result.state, ConversationState::GatheringRequirements);
            assert!(result.properties.is_empty());

            let conv = store.find_by_session(&result.session_id).await.unwrap().unwrap();
            assert_eq!(
                conv.preferences().purpose,
                Some(crate::domain::conversation::Purpose::Buy)
            );
        }

        #[tokio::test]
        async fn user_is_linked_on_later_message() {
            let store = InMemoryConversationStore::new();
            let handler = handler(&store);
            let user = UserId::new("user-1").unwrap();

            handler
                .handle(HandleMessageCommand::new("Hello").with_session("s1"))
                .await
                .unwrap();
            let result = handler
                .handle(
                    HandleMessageCommand::new("3 bhk in Rajkot")
                        .with_session("s1")
                        .with_user(user.clone()),
                )
                .await
                .unwrap();

            let conv = store.find_by_session(&result.session_id).await.unwrap().unwrap();
            assert_eq!(conv.user_id(), Some(&user));
        }
    }

    mod failures {
        use super::*;

        #[tokio::test]
        async fn persist_failure_propagates_as_store_error() {
            let handler = handler_with(Arc::new(FailingStore), InMemoryPropertyRepository::new());

            let result = handler.handle(HandleMessageCommand::new("Hello")).await;

            assert!(matches!(result, Err(HandleMessageError::Store(_))));
        }
    }
}
