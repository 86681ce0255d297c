//! Property type and listing status enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of property a listing describes.
///
/// Variant order is significant: it is the order used when matching free
/// text, so earlier variants win when several appear in one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    Flat,
    Villa,
    House,
    Commercial,
    Land,
    Plot,
}

impl PropertyType {
    /// All property types in matching order.
    pub const ALL: [PropertyType; 7] = [
        PropertyType::Apartment,
        PropertyType::Flat,
        PropertyType::Villa,
        PropertyType::House,
        PropertyType::Commercial,
        PropertyType::Land,
        PropertyType::Plot,
    ];

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Flat => "flat",
            PropertyType::Villa => "villa",
            PropertyType::House => "house",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
            PropertyType::Plot => "plot",
        }
    }

    /// Returns the first type whose name occurs anywhere in `text` (case-insensitive).
    pub fn find_in(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL.into_iter().find(|t| lower.contains(t.as_str()))
    }

    /// Maps loosely formatted input (e.g. model output) onto a known type.
    ///
    /// Exact match wins; otherwise the first type contained in the input is used.
    pub fn normalize(raw: &str) -> Option<Self> {
        let candidate = raw.trim().to_lowercase();
        if candidate.is_empty() {
            return None;
        }
        if let Ok(exact) = candidate.parse() {
            return Some(exact);
        }
        Self::find_in(&candidate)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("property_type", format!("unknown type '{}'", s))
            })
    }
}

/// Availability of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Available,
    Pending,
    Sold,
    Rented,
}

impl ListingStatus {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Pending => "pending",
            ListingStatus::Sold => "sold",
            ListingStatus::Rented => "rented",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ListingStatus::Available),
            "pending" => Ok(ListingStatus::Pending),
            "sold" => Ok(ListingStatus::Sold),
            "rented" => Ok(ListingStatus::Rented),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_in_respects_vocabulary_order() {
        // "apartment" precedes "flat" even though "flat" appears first in the text.
        assert_eq!(
            PropertyType::find_in("flat or apartment"),
            Some(PropertyType::Apartment)
        );
    }

    #[test]
    fn find_in_is_case_insensitive() {
        assert_eq!(PropertyType::find_in("A big VILLA"), Some(PropertyType::Villa));
        assert_eq!(PropertyType::find_in("nothing here"), None);
    }

    #[test]
    fn normalize_prefers_exact_match() {
        assert_eq!(PropertyType::normalize(" Plot "), Some(PropertyType::Plot));
    }

    #[test]
    fn normalize_falls_back_to_containment() {
        assert_eq!(
            PropertyType::normalize("3BHK Apartments"),
            Some(PropertyType::Apartment)
        );
        assert_eq!(
            PropertyType::normalize("independent house"),
            Some(PropertyType::House)
        );
    }

    #[test]
    fn normalize_rejects_unknown_and_empty() {
        assert_eq!(PropertyType::normalize("castle"), None);
        assert_eq!(PropertyType::normalize("  "), None);
    }

    #[test]
    fn property_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PropertyType::Commercial).unwrap(),
            "\"commercial\""
        );
    }

    #[test]
    fn listing_status_parses() {
        assert_eq!("sold".parse::<ListingStatus>().unwrap(), ListingStatus::Sold);
        assert!("gone".parse::<ListingStatus>().is_err());
    }
}
