//! HTTP routes for property search endpoints.

use axum::{routing::post, Router};

use super::handlers::{ai_search, SearchHandlers};

/// Creates the search router, mounted under `/api/properties`.
pub fn search_routes(handlers: SearchHandlers) -> Router {
    Router::new()
        .route("/ai-search", post(ai_search))
        .with_state(handlers)
}
