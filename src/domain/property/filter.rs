//! Structured property query.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{ListingStatus, Property, PropertyType};
use crate::domain::conversation::Preferences;

/// Filter applied to the property repository.
///
/// Every `None`/empty field is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFilter {
    pub status: Option<ListingStatus>,
    pub property_type: Option<PropertyType>,
    /// Matched as a case-insensitive substring of the listing city.
    pub city: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    /// Any-of, case-insensitive.
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl PropertyFilter {
    /// Builds a filter for available listings from merged preferences.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            status: Some(ListingStatus::Available),
            property_type: prefs.property_type,
            city: prefs.location.city.clone(),
            min_price: prefs.budget.min,
            max_price: prefs.budget.max,
            min_bedrooms: prefs.bedrooms,
            min_bathrooms: prefs.bathrooms,
            amenities: prefs.amenities.iter().cloned().collect(),
        }
    }

    /// Case-insensitive pattern for the city with regex metacharacters escaped.
    pub fn city_pattern(&self) -> Option<Regex> {
        let city = self.city.as_deref()?.trim();
        if city.is_empty() {
            return None;
        }
        RegexBuilder::new(&regex::escape(city))
            .case_insensitive(true)
            .build()
            .ok()
    }

    /// Evaluates the filter against a listing in memory.
    pub fn matches(&self, property: &Property) -> bool {
        if self.status.is_some_and(|s| s != property.status) {
            return false;
        }
        if self.property_type.is_some_and(|t| t != property.property_type) {
            return false;
        }
        if self.city.is_some() {
            match self.city_pattern() {
                Some(re) if re.is_match(&property.location.city) => {}
                _ => return false,
            }
        }
        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        if self.min_bedrooms.is_some_and(|n| property.bedrooms < n) {
            return false;
        }
        if self.min_bathrooms.is_some_and(|n| property.bathrooms < n) {
            return false;
        }
        if !self.amenities.is_empty() && !self.amenities.iter().any(|a| property.has_amenity(a)) {
            return false;
        }
        true
    }
}

/// Result ordering for repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
}

impl SortOrder {
    /// Orders two listings according to this sort.
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortOrder::NewestFirst => b.created_at.cmp(&a.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{extract, Preferences};
    use crate::domain::property::fixtures::property;

    fn rajkot_flat() -> Property {
        property("Rajkot", PropertyType::Flat, 3, 8_000_000)
    }

    mod matches {
        use super::*;

        #[test]
        fn empty_filter_matches_everything() {
            assert!(PropertyFilter::default().matches(&rajkot_flat()));
        }

        #[test]
        fn city_match_is_case_insensitive() {
            let filter = PropertyFilter {
                city: Some("rajKOT".to_string()),
                ..Default::default()
            };
            assert!(filter.matches(&rajkot_flat()));
        }

        #[test]
        fn city_metacharacters_are_escaped() {
            let filter = PropertyFilter {
                city: Some("Raj.ot".to_string()),
                ..Default::default()
            };
            assert!(!filter.matches(&rajkot_flat()));
        }

        #[test]
        fn price_bounds_are_inclusive() {
            let filter = PropertyFilter {
                min_price: Some(8_000_000),
                max_price: Some(8_000_000),
                ..Default::default()
            };
            assert!(filter.matches(&rajkot_flat()));
        }

        #[test]
        fn bedrooms_are_a_lower_bound() {
            let mut filter = PropertyFilter {
                min_bedrooms: Some(2),
                ..Default::default()
            };
            assert!(filter.matches(&rajkot_flat()));
            filter.min_bedrooms = Some(4);
            assert!(!filter.matches(&rajkot_flat()));
        }

        #[test]
        fn amenities_are_any_of() {
            let filter = PropertyFilter {
                amenities: vec!["pool".to_string(), "parking".to_string()],
                ..Default::default()
            };
            assert!(filter.matches(&rajkot_flat()));

            let filter = PropertyFilter {
                amenities: vec!["pool".to_string()],
                ..Default::default()
            };
            assert!(!filter.matches(&rajkot_flat()));
        }

        #[test]
        fn status_excludes_sold_listings() {
            let mut sold = rajkot_flat();
            sold.status = ListingStatus::Sold;
            let filter = PropertyFilter {
                status: Some(ListingStatus::Available),
                ..Default::default()
            };
            assert!(filter.matches(&rajkot_flat()));
            assert!(!filter.matches(&sold));
        }
    }

    #[test]
    fn filter_from_extracted_search_matches_seeded_listing() {
        let mut prefs = Preferences::default();
        prefs.merge(&extract("3bhk flat in Rajkot under 80 lakh with parking"));

        let filter = PropertyFilter::from_preferences(&prefs);

        assert_eq!(filter.status, Some(ListingStatus::Available));
        assert_eq!(filter.max_price, Some(8_000_000));
        assert!(filter.matches(&rajkot_flat()));
    }

    #[test]
    fn newest_first_orders_by_creation_desc() {
        let newer = rajkot_flat();
        let mut older = rajkot_flat();
        older.created_at = newer.created_at.minus_days(1);

        assert_eq!(SortOrder::NewestFirst.compare(&newer, &older), Ordering::Less);
        assert_eq!(SortOrder::NewestFirst.compare(&older, &newer), Ordering::Greater);
    }
}
