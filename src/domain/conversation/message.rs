//! Turn entity for conversations.
//!
//! Turns are immutable records of user/assistant exchanges. Once appended to a
//! conversation they are never edited or reordered.

use serde::{Deserialize, Serialize};

use super::{ExtractedData, Intent};
use crate::domain::foundation::{DomainError, MessageId, PropertyId, Timestamp};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// An immutable turn within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - `intent` and `extracted` are only set on user turns
/// - `suggested_properties` is only non-empty on assistant turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: MessageId,
    role: TurnRole,
    content: String,
    timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    extracted: Option<ExtractedData>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    suggested_properties: Vec<PropertyId>,
}

impl Turn {
    /// Creates a user turn annotated with its classification.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn user(
        content: impl Into<String>,
        intent: Intent,
        extracted: ExtractedData,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            role: TurnRole::User,
            content,
            timestamp: Timestamp::now(),
            intent: Some(intent),
            extracted: Some(extracted),
            suggested_properties: Vec::new(),
        })
    }

    /// Creates an assistant turn with the properties it suggested.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn assistant(
        content: impl Into<String>,
        suggested_properties: Vec<PropertyId>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            role: TurnRole::Assistant,
            content,
            timestamp: Timestamp::now(),
            intent: None,
            extracted: None,
            suggested_properties,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn intent(&self) -> Option<Intent> {
        self.intent
    }

    pub fn extracted(&self) -> Option<&ExtractedData> {
        self.extracted.as_ref()
    }

    pub fn suggested_properties(&self) -> &[PropertyId] {
        &self.suggested_properties
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == TurnRole::Assistant
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Turn content cannot be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_carries_classification() {
        let data = ExtractedData {
            bedrooms: Some(2),
            ..Default::default()
        };
        let turn = Turn::user("2bhk please", Intent::SearchProperty, data.clone()).unwrap();

        assert!(turn.is_user());
        assert_eq!(turn.intent(), Some(Intent::SearchProperty));
        assert_eq!(turn.extracted(), Some(&data));
        assert!(turn.suggested_properties().is_empty());
    }

    #[test]
    fn assistant_turn_carries_suggestions() {
        let ids = vec![PropertyId::new(), PropertyId::new()];
        let turn = Turn::assistant("Here you go", ids.clone()).unwrap();

        assert!(turn.is_assistant());
        assert_eq!(turn.intent(), None);
        assert_eq!(turn.suggested_properties(), ids.as_slice());
    }

    #[test]
    fn empty_content_is_rejected() {
        assert!(Turn::user("   ", Intent::GeneralChat, ExtractedData::default()).is_err());
        assert!(Turn::assistant("", Vec::new()).is_err());
    }

    #[test]
    fn assistant_turn_serializes_without_user_fields() {
        let turn = Turn::assistant("Hello", Vec::new()).unwrap();
        let json = serde_json::to_value(&turn).unwrap();

        assert_eq!(json["role"], "assistant");
        assert!(json.get("intent").is_none());
        assert!(json.get("suggested_properties").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let turn = Turn::user("hi", Intent::GeneralChat, ExtractedData::default()).unwrap();
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }
}
