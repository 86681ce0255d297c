//! Property search handlers.

mod ai_search;

pub use ai_search::{AiSearchError, AiSearchHandler, AiSearchQuery, AiSearchResult, DraftFilter};
