//! HTTP handlers for property search endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::shared::ErrorResponse;
use crate::application::{AiSearchError, AiSearchHandler, AiSearchQuery};

use super::dto::{AiSearchRequest, AiSearchResponse};

#[derive(Clone)]
pub struct SearchHandlers {
    ai_search: Arc<AiSearchHandler>,
}

impl SearchHandlers {
    pub fn new(ai_search: Arc<AiSearchHandler>) -> Self {
        Self { ai_search }
    }
}

/// POST /api/properties/ai-search - Natural-language property search
pub async fn ai_search(
    State(handlers): State<SearchHandlers>,
    Json(req): Json<AiSearchRequest>,
) -> Response {
    let query = AiSearchQuery {
        query: req.query,
        limit: req.limit,
    };

    match handlers.ai_search.handle(query).await {
        Ok(result) => {
            let response: AiSearchResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_search_error(e),
    }
}

fn handle_search_error(error: AiSearchError) -> Response {
    match error {
        AiSearchError::EmptyQuery => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Query is required")),
        )
            .into_response(),
        AiSearchError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::unavailable("AI search is not configured")),
        )
            .into_response(),
        AiSearchError::MalformedResponse(reason) => {
            tracing::warn!(reason = %reason, "AI search got malformed model output");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::unprocessable(
                    "Could not understand the search query, please rephrase it",
                )),
            )
                .into_response()
        }
        AiSearchError::ExternalService(e) => {
            tracing::error!(error = %e, "AI search model call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::bad_gateway("AI service is temporarily unavailable")),
            )
                .into_response()
        }
        AiSearchError::Repository(msg) => {
            tracing::error!(error = %msg, "AI search repository query failed");
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
    use crate::ports::AIError;

    #[test]
    fn error_statuses() {
        let cases = [
            (AiSearchError::EmptyQuery, StatusCode::BAD_REQUEST),
            (AiSearchError::Unavailable, StatusCode::SERVICE_UNAVAILABLE),
            (
                AiSearchError::MalformedResponse("eof".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AiSearchError::ExternalService(AIError::AuthenticationFailed),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AiSearchError::Repository("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_search_error(error).status(), status);
        }
    }
}
