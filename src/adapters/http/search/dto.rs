//! HTTP DTOs for property search endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::shared::PropertyResponse;
use crate::application::AiSearchResult;
use crate::domain::property::PropertyFilter;

/// Natural-language search request.
#[derive(Debug, Clone, Deserialize)]
pub struct AiSearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiSearchResponse {
    /// The structured filter the query was translated into.
    pub filter: PropertyFilter,
    pub properties: Vec<PropertyResponse>,
    pub total: u64,
}

impl From<AiSearchResult> for AiSearchResponse {
    fn from(result: AiSearchResult) -> Self {
        Self {
            filter: result.filter,
            properties: result.properties.into_iter().map(Into::into).collect(),
            total: result.total,
        }
    }
}
