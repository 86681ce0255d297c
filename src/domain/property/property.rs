//! Property read model.
//!
//! Listings are owned by the external listing service; the dialog engine
//! only reads them and bumps their view counter.

use serde::{Deserialize, Serialize};

use super::{ListingStatus, PropertyType};
use crate::domain::foundation::{PropertyId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyLocation {
    pub address: String,
    pub city: String,
    pub area: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A property listing as seen by the dialog engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub status: ListingStatus,
    /// Asking price in INR.
    pub price: u64,
    pub location: PropertyLocation,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Built-up area in square feet.
    pub area_sqft: Option<u32>,
    pub amenities: Vec<String>,
    pub contact: PropertyContact,
    pub views: u64,
    pub created_at: Timestamp,
}

impl Property {
    /// Returns true if the listing has an amenity containing `needle`
    /// (case-insensitive).
    pub fn has_amenity(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.amenities
            .iter()
            .any(|a| a.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds an available listing with sensible defaults for tests.
    pub fn property(city: &str, property_type: PropertyType, bedrooms: u32, price: u64) -> Property {
        Property {
            id: PropertyId::new(),
            title: format!("{} BHK {} in {}", bedrooms, property_type, city),
            description: "Well ventilated, close to schools".to_string(),
            property_type,
            status: ListingStatus::Available,
            price,
            location: PropertyLocation {
                address: "12 Ring Road".to_string(),
                city: city.to_string(),
                area: None,
                state: Some("Gujarat".to_string()),
            },
            bedrooms,
            bathrooms: 2,
            area_sqft: Some(1450),
            amenities: vec!["Covered Parking".to_string(), "Lift".to_string()],
            contact: PropertyContact {
                name: "Asha Mehta".to_string(),
                phone: Some("+91 98765 43210".to_string()),
                email: None,
            },
            views: 0,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::property;
    use super::*;

    #[test]
    fn amenity_match_is_case_insensitive_containment() {
        let p = property("Rajkot", PropertyType::Flat, 3, 7_500_000);
        assert!(p.has_amenity("parking"));
        assert!(p.has_amenity("LIFT"));
        assert!(!p.has_amenity("pool"));
    }
}
