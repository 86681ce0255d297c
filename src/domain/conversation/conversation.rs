//! Conversation aggregate - one dialog per session.

use super::{ConversationState, ExtractedData, Intent, Preferences, Turn};
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, PropertyId, SessionId, StateMachine, Timestamp, UserId,
};

/// Conversation aggregate - tracks the dialog state, merged search
/// preferences and turn history for a single session.
///
/// # Invariants
///
/// - exactly one current state, initially `Greeting`
/// - history is append-only
/// - `total_messages` grows by one per completed exchange
/// - the first `saved_turns` turns of the history are already stored
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    id: ConversationId,
    session_id: SessionId,
    user_id: Option<UserId>,
    preferences: Preferences,
    state: ConversationState,
    history: Vec<Turn>,
    total_messages: u64,
    last_activity: Timestamp,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    saved_turns: usize,
}

impl Conversation {
    /// Starts a new conversation for a session.
    pub fn new(session_id: SessionId, user_id: Option<UserId>) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            session_id,
            user_id,
            preferences: Preferences::default(),
            state: ConversationState::Greeting,
            history: Vec::new(),
            total_messages: 0,
            last_activity: now,
            is_active: true,
            created_at: now,
            updated_at: now,
            saved_turns: 0,
        }
    }

    /// Reconstitutes a conversation from persistence.
    ///
    /// Every turn in `history` is treated as already stored.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ConversationId,
        session_id: SessionId,
        user_id: Option<UserId>,
        preferences: Preferences,
        state: ConversationState,
        history: Vec<Turn>,
        total_messages: u64,
        last_activity: Timestamp,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            user_id,
            preferences,
            state,
            saved_turns: history.len(),
            history,
            total_messages,
            last_activity,
            is_active,
            created_at,
            updated_at,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Turns appended since the conversation was loaded or last saved.
    pub fn unsaved_turns(&self) -> &[Turn] {
        &self.history[self.saved_turns.min(self.history.len())..]
    }

    /// Marks the whole history as stored.
    pub fn mark_saved(&mut self) {
        self.saved_turns = self.history.len();
    }

    pub fn total_messages(&self) -> u64 {
        self.total_messages
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The most recent `n` turns, oldest first.
    pub fn recent_turns(&self, n: usize) -> &[Turn] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Properties suggested by the latest assistant turn that suggested any.
    pub fn last_suggested_properties(&self) -> &[PropertyId] {
        self.history
            .iter()
            .rev()
            .filter(|t| t.is_assistant())
            .map(|t| t.suggested_properties())
            .find(|ids| !ids.is_empty())
            .unwrap_or(&[])
    }

    /// Returns true if the conversation has been idle longer than the
    /// retention window.
    pub fn is_stale(&self, now: Timestamp, retention_days: u32) -> bool {
        self.last_activity
            .is_before(&now.minus_days(i64::from(retention_days)))
    }

    // === Dialog ===

    /// Advances the state machine for a classified message.
    ///
    /// Extracted fields are merged into the preferences unless the intent is
    /// a platform question. Returns the new state.
    pub fn apply_intent(&mut self, intent: Intent, data: &ExtractedData) -> ConversationState {
        let next = self.state.next(intent, data.has_search_data());
        if intent.merges_preferences() {
            self.preferences.merge(data);
        }
        self.state = next;
        self.touch();
        next
    }

    /// Appends a completed user/assistant exchange to the history.
    pub fn record_exchange(&mut self, user: Turn, assistant: Turn) {
        self.history.push(user);
        self.history.push(assistant);
        self.total_messages += 1;
        self.touch();
    }

    /// Moves the conversation into the follow-up state.
    pub fn mark_follow_up(&mut self) -> Result<(), DomainError> {
        self.state = self
            .state
            .transition_to(ConversationState::FollowUp)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        self.touch();
        Ok(())
    }

    /// Attaches a user to an anonymous conversation. An existing link is kept.
    pub fn link_user(&mut self, user_id: UserId) {
        if self.user_id.is_none() {
            self.user_id = Some(user_id);
            self.updated_at = Timestamp::now();
        }
    }

    /// Marks the conversation as ended by the client.
    pub fn end(&mut self) {
        self.is_active = false;
        self.updated_at = Timestamp::now();
    }

    /// Reopens an ended conversation, keeping its history.
    pub fn reactivate(&mut self) {
        if !self.is_active {
            self.is_active = true;
            self.touch();
        }
    }

    fn touch(&mut self) {
        let now = Timestamp::now();
        self.last_activity = now;
        self.updated_at = now;
    }
}
