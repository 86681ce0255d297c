//! DTOs shared by every HTTP module.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::property::{ListingStatus, Property, PropertyType};

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new("UNPROCESSABLE_ENTITY", message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new("BAD_GATEWAY", message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Listing as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub price: u64,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqft: Option<u32>,
    pub amenities: Vec<String>,
    pub contact_name: String,
    pub views: u64,
    pub created_at: Timestamp,
}

impl From<Property> for PropertyResponse {
    fn from(p: Property) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title,
            description: p.description,
            property_type: p.property_type,
            status: p.status,
            price: p.price,
            address: p.location.address,
            city: p.location.city,
            area: p.location.area,
            state: p.location.state,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area_sqft: p.area_sqft,
            amenities: p.amenities,
            contact_name: p.contact.name,
            views: p.views,
            created_at: p.created_at,
        }
    }
}
