//! Cumulative search criteria inferred across a conversation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ExtractedData;
use crate::domain::property::PropertyType;

/// How soon the user intends to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    #[serde(rename = "within_3_months")]
    WithinThreeMonths,
    #[serde(rename = "within_6_months")]
    WithinSixMonths,
    Flexible,
}

/// Why the user is looking for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Buy,
    Rent,
    Invest,
}

/// Price bounds in INR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl Budget {
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPreference {
    pub city: Option<String>,
    #[serde(default)]
    pub areas: Vec<String>,
    pub state: Option<String>,
}

/// Built-up area bounds in square feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min_sqft: Option<u32>,
    pub max_sqft: Option<u32>,
}

/// A preference field that must be known before a search is worthwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Budget,
    Location,
    PropertyType,
    Bedrooms,
}

impl Requirement {
    pub fn label(&self) -> &'static str {
        match self {
            Requirement::Budget => "budget",
            Requirement::Location => "preferred location",
            Requirement::PropertyType => "property type",
            Requirement::Bedrooms => "number of bedrooms",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Merged search criteria for a conversation.
///
/// Scalars are overwritten by newer values; amenities accumulate as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub location: LocationPreference,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    #[serde(default)]
    pub size_range: SizeRange,
    pub urgency: Option<Urgency>,
    pub purpose: Option<Purpose>,
}

impl Preferences {
    /// Folds one message's extracted data into the preferences.
    ///
    /// Only fields present in `data` are touched.
    pub fn merge(&mut self, data: &ExtractedData) {
        if let Some(min) = data.min_price {
            self.budget.min = Some(min);
        }
        if let Some(max) = data.max_price {
            self.budget.max = Some(max);
        }
        if let Some(city) = &data.location {
            self.location.city = Some(city.clone());
        }
        if let Some(property_type) = data.property_type {
            self.property_type = Some(property_type);
        }
        if let Some(bedrooms) = data.bedrooms {
            self.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = data.bathrooms {
            self.bathrooms = Some(bathrooms);
        }
        if let Some(amenities) = &data.amenities {
            self.amenities.extend(amenities.iter().cloned());
        }
        if let Some(urgency) = data.urgency {
            self.urgency = Some(urgency);
        }
        if let Some(purpose) = data.purpose {
            self.purpose = Some(purpose);
        }
    }

    /// Required fields that are still unknown, in asking order.
    pub fn missing_requirements(&self) -> Vec<Requirement> {
        let mut missing = Vec::new();
        if !self.budget.is_set() {
            missing.push(Requirement::Budget);
        }
        if self.location.city.is_none() {
            missing.push(Requirement::Location);
        }
        if self.property_type.is_none() {
            missing.push(Requirement::PropertyType);
        }
        if self.bedrooms.is_none() {
            missing.push(Requirement::Bedrooms);
        }
        missing
    }

    /// Returns true if any field usable as a search filter is set.
    pub fn has_search_criteria(&self) -> bool {
        self.budget.is_set()
            || self.location.city.is_some()
            || self.property_type.is_some()
            || self.bedrooms.is_some()
            || self.bathrooms.is_some()
            || !self.amenities.is_empty()
    }
}
