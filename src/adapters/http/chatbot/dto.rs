//! HTTP DTOs for chatbot endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::shared::PropertyResponse;
use crate::application::HandleMessageResult;
use crate::domain::conversation::{
    Conversation, ConversationState, ExtractedData, Intent, Preferences, Turn, TurnRole,
};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to send one chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply to one chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReplyResponse {
    pub reply: String,
    pub session_id: String,
    pub state: ConversationState,
    pub intent: Intent,
    pub confidence: f32,
    pub extracted: ExtractedData,
    pub properties: Vec<PropertyResponse>,
}

impl From<HandleMessageResult> for ChatReplyResponse {
    fn from(result: HandleMessageResult) -> Self {
        Self {
            reply: result.reply,
            session_id: result.session_id.to_string(),
            state: result.state,
            intent: result.intent,
            confidence: result.confidence,
            extracted: result.extracted,
            properties: result.properties.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub id: String,
    pub role: TurnRole,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted: Option<ExtractedData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggested_properties: Vec<String>,
}

impl From<&Turn> for TurnResponse {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id().to_string(),
            role: turn.role(),
            content: turn.content().to_string(),
            timestamp: *turn.timestamp(),
            intent: turn.intent(),
            extracted: turn.extracted().cloned(),
            suggested_properties: turn
                .suggested_properties()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Conversation with its full history.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub state: ConversationState,
    pub preferences: Preferences,
    pub history: Vec<TurnResponse>,
    pub total_messages: u64,
    pub is_active: bool,
    pub last_activity: Timestamp,
    pub created_at: Timestamp,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id().to_string(),
            session_id: conversation.session_id().to_string(),
            user_id: conversation.user_id().map(ToString::to_string),
            state: conversation.state(),
            preferences: conversation.preferences().clone(),
            history: conversation.history().iter().map(TurnResponse::from).collect(),
            total_messages: conversation.total_messages(),
            is_active: conversation.is_active(),
            last_activity: conversation.last_activity(),
            created_at: conversation.created_at(),
        }
    }
}
