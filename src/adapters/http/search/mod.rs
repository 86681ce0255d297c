//! HTTP adapter for property search endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AiSearchRequest, AiSearchResponse};
pub use handlers::SearchHandlers;
pub use routes::search_routes;
