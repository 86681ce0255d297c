//! AiSearch query handler - natural-language property search.
//!
//! The model translates the user's query into a JSON draft filter. The draft
//! is normalized into a `PropertyFilter` and run against the repository.

use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::ai::{GatewayError, ModelGateway};
use crate::domain::foundation::DomainError;
use crate::domain::property::{ListingStatus, Property, PropertyFilter, PropertyType, SortOrder};
use crate::ports::{AIError, Message, PropertyRepository};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

const TRANSLATION_PROMPT: &str = r#"You convert property search requests from Indian home buyers into a JSON filter.
Respond with a single JSON object and nothing else. Use only these keys, omitting any that the request does not mention:
{
  "property_type": one of "apartment", "flat", "villa", "house", "commercial", "land", "plot",
  "city": string,
  "min_price": number in INR,
  "max_price": number in INR,
  "bedrooms": integer (minimum),
  "bathrooms": integer (minimum),
  "amenities": array of short lowercase strings
}
1 lakh = 100000 INR and 1 crore = 10000000 INR."#;

/// Query for a natural-language search.
#[derive(Debug, Clone)]
pub struct AiSearchQuery {
    pub query: String,
    pub limit: Option<u32>,
}

/// Result of a natural-language search.
#[derive(Debug, Clone)]
pub struct AiSearchResult {
    /// The filter the query was translated into.
    pub filter: PropertyFilter,
    pub properties: Vec<Property>,
    /// Total matches, ignoring the limit.
    pub total: u64,
}

/// Errors from a natural-language search.
#[derive(Debug, Clone, Error)]
pub enum AiSearchError {
    #[error("Validation error: query cannot be empty")]
    EmptyQuery,

    /// No model is configured.
    #[error("AI search is not available")]
    Unavailable,

    #[error("AI service error: {0}")]
    ExternalService(AIError),

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<GatewayError> for AiSearchError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Service(e) => AiSearchError::ExternalService(e),
            GatewayError::MalformedResponse(reason) => AiSearchError::MalformedResponse(reason),
        }
    }
}

impl From<DomainError> for AiSearchError {
    fn from(err: DomainError) -> Self {
        AiSearchError::Repository(err.to_string())
    }
}

/// Filter as drafted by the model. Every field is optional and leniently typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DraftFilter {
    #[serde(default, alias = "type", alias = "propertyType")]
    pub property_type: Option<String>,
    #[serde(default, alias = "location")]
    pub city: Option<String>,
    #[serde(default, alias = "minPrice", deserialize_with = "lenient_number")]
    pub min_price: Option<u64>,
    #[serde(default, alias = "maxPrice", deserialize_with = "lenient_number")]
    pub max_price: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bedrooms: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bathrooms: Option<u64>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
}

impl DraftFilter {
    /// Normalizes the draft into a filter over available listings.
    ///
    /// Unrecognized property types are dropped rather than failing the search.
    pub fn into_filter(self) -> PropertyFilter {
        let property_type = self.property_type.as_deref().and_then(|raw| {
            let normalized = PropertyType::normalize(raw);
            if normalized.is_none() {
                tracing::debug!(raw, "Ignoring unrecognized property type from model");
            }
            normalized
        });

        let city = self
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let (min_price, max_price) = match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => (Some(max), Some(min)),
            bounds => bounds,
        };

        PropertyFilter {
            status: Some(ListingStatus::Available),
            property_type,
            city,
            min_price,
            max_price,
            min_bedrooms: self.bedrooms.map(saturate_u32),
            min_bathrooms: self.bathrooms.map(saturate_u32),
            amenities: self
                .amenities
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }
}

fn saturate_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Accepts integers, floats and numeric strings; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Some(serde_json::Value::String(s)) => {
            let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
            cleaned.parse::<f64>().ok().map(|f| f.round() as u64)
        }
        _ => None,
    })
}

/// Handler for natural-language property search.
pub struct AiSearchHandler {
    gateway: Option<ModelGateway>,
    properties: Arc<dyn PropertyRepository>,
}

impl AiSearchHandler {
    pub fn new(gateway: Option<ModelGateway>, properties: Arc<dyn PropertyRepository>) -> Self {
        Self {
            gateway,
            properties,
        }
    }

    pub async fn handle(&self, query: AiSearchQuery) -> Result<AiSearchResult, AiSearchError> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(AiSearchError::EmptyQuery);
        }

        let gateway = self.gateway.as_ref().ok_or(AiSearchError::Unavailable)?;

        let draft: DraftFilter = gateway
            .complete_json(vec![Message::system(TRANSLATION_PROMPT), Message::user(text)])
            .await?;
        let filter = draft.into_filter();

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let properties = self
            .properties
            .find(&filter, limit, SortOrder::NewestFirst)
            .await?;
        let total = self.properties.count(&filter).await?;

        tracing::info!(
            results = properties.len(),
            total,
            property_type = ?filter.property_type,
            city = ?filter.city,
            "AI search completed"
        );

        Ok(AiSearchResult {
            filter,
            properties,
            total,
        })
    }
}
