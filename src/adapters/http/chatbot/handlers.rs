//! HTTP handlers for chatbot endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::shared::ErrorResponse;
use crate::application::{
    EndConversationCommand, EndConversationHandler, GetConversationHandler, GetConversationQuery,
    HandleMessageCommand, HandleMessageError, HandleMessageHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};

use super::dto::{ChatReplyResponse, ConversationResponse, SendMessageRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatbotHandlers {
    handle_message: Arc<HandleMessageHandler>,
    get_conversation: Arc<GetConversationHandler>,
    end_conversation: Arc<EndConversationHandler>,
}

impl ChatbotHandlers {
    pub fn new(
        handle_message: Arc<HandleMessageHandler>,
        get_conversation: Arc<GetConversationHandler>,
        end_conversation: Arc<EndConversationHandler>,
    ) -> Self {
        Self {
            handle_message,
            get_conversation,
            end_conversation,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chatbot/message - Process one chat message
pub async fn send_message(
    State(handlers): State<ChatbotHandlers>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let user_id = match req.user_id.filter(|u| !u.trim().is_empty()).map(UserId::new) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!("Invalid user ID: {}", e))),
            )
                .into_response()
        }
    };

    let cmd = HandleMessageCommand {
        session_id: req.session_id,
        user_id,
        message: req.message,
    };

    match handlers.handle_message.handle(cmd).await {
        Ok(result) => {
            let response: ChatReplyResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_message_error(e),
    }
}

/// GET /api/chatbot/conversations/:session_id - Conversation with history
pub async fn get_conversation(
    State(handlers): State<ChatbotHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match SessionId::new(session_id) {
        Ok(id) => id,
        Err(_) => return invalid_session_id(),
    };

    match handlers
        .get_conversation
        .handle(GetConversationQuery { session_id })
        .await
    {
        Ok(conversation) => {
            let response: ConversationResponse = conversation.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/chatbot/conversations/:session_id/end - Mark a conversation inactive
pub async fn end_conversation(
    State(handlers): State<ChatbotHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match SessionId::new(session_id) {
        Ok(id) => id,
        Err(_) => return invalid_session_id(),
    };

    match handlers
        .end_conversation
        .handle(EndConversationCommand { session_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_domain_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_session_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request("Invalid session ID")),
    )
        .into_response()
}

fn handle_message_error(error: HandleMessageError) -> Response {
    match error {
        HandleMessageError::EmptyMessage => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Message is required")),
        )
            .into_response(),
        HandleMessageError::InvalidSession(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("Invalid session ID: {}", msg))),
        )
            .into_response(),
        HandleMessageError::Store(msg) => {
            tracing::error!(error = %msg, "Chat message failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Failed to process message")),
            )
                .into_response()
        }
    }
}

fn handle_domain_error(error: DomainError) -> Response {
    match error.code() {
        ErrorCode::ConversationNotFound => {
            let id = error.details.get("session_id").cloned().unwrap_or_default();
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Conversation", &id)),
            )
                .into_response()
        }
        ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.message)),
        )
            .into_response(),
        _ => {
            tracing::error!(error = %error, "Conversation request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_maps_to_400() {
        let response = handle_message_error(HandleMessageError::EmptyMessage);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let response = handle_message_error(HandleMessageError::Store("down".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conversation_not_found_maps_to_404() {
        let error = DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
            .with_detail("session_id", "abc");
        assert_eq!(handle_domain_error(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_maps_to_500() {
        let error = DomainError::database("connection reset");
        assert_eq!(
            handle_domain_error(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
