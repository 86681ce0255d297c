//! Rule-based extraction of search criteria from free text.
//!
//! Every field is optional. A field that did not match is left as `None`
//! and omitted from serialized output, so downstream merging can tell
//! "not mentioned" apart from an explicit value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Purpose, Urgency};
use crate::domain::property::PropertyType;

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

static PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(crores?|crs?|lakhs?|lacs?)\b").expect("price regex")
});

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[Ii]n|[Aa]t|[Nn]ear)\s+([A-Z][a-zA-Z]*(?:\s+[A-Z][a-zA-Z]*)*)")
        .expect("location regex")
});

static BEDROOMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*bhk").expect("bedrooms regex"));

static BATHROOMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:bath|bathroom|washroom|toilet)s?\b").expect("bathrooms regex")
});

static PROPERTY_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b(?:property|listing|option|number|no\.?)\s*#?\s*|#\s*)(\d+)\b")
        .expect("reference regex")
});

static ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(first|second|third|fourth|fifth|1st|2nd|3rd|4th|5th)\b")
        .expect("ordinal regex")
});

/// Amenity synonyms in match order, mapped to their canonical name.
const AMENITY_SYNONYMS: &[(&str, &str)] = &[
    ("swimming pool", "pool"),
    ("pool", "pool"),
    ("gymnasium", "gym"),
    ("gym", "gym"),
    ("fitness center", "gym"),
    ("parking", "parking"),
    ("garage", "parking"),
    ("garden", "garden"),
    ("lawn", "garden"),
    ("elevator", "lift"),
    ("lift", "lift"),
    ("security", "security"),
    ("cctv", "security"),
    ("gated", "security"),
    ("power backup", "power backup"),
    ("generator", "power backup"),
    ("club house", "clubhouse"),
    ("clubhouse", "clubhouse"),
    ("playground", "play area"),
    ("play area", "play area"),
    ("balcony", "balcony"),
    ("furnished", "furnished"),
];

static PURPOSE_RULES: Lazy<Vec<(Regex, Purpose)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\binvest(ment|ing|or)?\b").expect("invest regex"),
            Purpose::Invest,
        ),
        (
            Regex::new(r"(?i)\b(rent|rental|lease|renting)\b").expect("rent regex"),
            Purpose::Rent,
        ),
        (
            Regex::new(r"(?i)\b(buy|buying|purchase|own)\b").expect("buy regex"),
            Purpose::Buy,
        ),
    ]
});

static URGENCY_RULES: Lazy<Vec<(Regex, Urgency)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\b(urgent(ly)?|asap|immediately|right\s+away)\b")
                .expect("immediate regex"),
            Urgency::Immediate,
        ),
        (
            Regex::new(r"(?i)\b(within|in)\s+(1|2|3|one|two|three)\s+months?\b|\bnext\s+month\b")
                .expect("three months regex"),
            Urgency::WithinThreeMonths,
        ),
        (
            Regex::new(r"(?i)\b(within|in)\s+(4|5|6|four|five|six)\s+months?\b")
                .expect("six months regex"),
            Urgency::WithinSixMonths,
        ),
        (
            Regex::new(r"(?i)\b(no\s+rush|no\s+hurry|just\s+exploring|flexible)\b")
                .expect("flexible regex"),
            Urgency::Flexible,
        ),
    ]
});

/// Structured criteria pulled out of a single message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amenities: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub purpose: Option<Purpose>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub urgency: Option<Urgency>,
}

impl ExtractedData {
    /// Returns true if a field usable as a search filter was extracted.
    ///
    /// Purpose and urgency describe the buyer, not the listing, and do not count.
    pub fn has_search_data(&self) -> bool {
        self.min_price.is_some()
            || self.max_price.is_some()
            || self.location.is_some()
            || self.bedrooms.is_some()
            || self.bathrooms.is_some()
            || self.property_type.is_some()
            || self.amenities.as_ref().is_some_and(|a| !a.is_empty())
    }
}

/// Extracts every recognised criterion from `text`.
pub fn extract(text: &str) -> ExtractedData {
    let prices = price_mentions(text);

    ExtractedData {
        min_price: prices.iter().copied().min(),
        max_price: prices.iter().copied().max(),
        location: extract_location(text),
        bedrooms: capture_number(&BEDROOMS, text),
        bathrooms: capture_number(&BATHROOMS, text),
        property_type: PropertyType::find_in(text),
        amenities: extract_amenities(text),
        purpose: first_rule(&PURPOSE_RULES, text),
        urgency: first_rule(&URGENCY_RULES, text),
    }
}

/// Every price mentioned in `text`, converted to rupees.
///
/// Values keep their order of appearance.
pub fn price_mentions(text: &str) -> Vec<u64> {
    PRICE
        .captures_iter(text)
        .filter_map(|caps| {
            let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
            let unit = caps.get(2)?.as_str().to_lowercase();
            let multiplier = if unit.starts_with('c') { CRORE } else { LAKH };
            Some((amount * multiplier).round() as u64)
        })
        .collect()
}

/// One-based position of a previously shown property referenced in `text`,
/// e.g. "the second one", "property 3" or "#2".
pub fn property_reference(text: &str) -> Option<usize> {
    if let Some(caps) = PROPERTY_REFERENCE.captures(text) {
        if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse().ok()) {
            return Some(n);
        }
    }

    let word = ORDINAL.captures(text)?.get(1)?.as_str().to_lowercase();
    match word.as_str() {
        "first" | "1st" => Some(1),
        "second" | "2nd" => Some(2),
        "third" | "3rd" => Some(3),
        "fourth" | "4th" => Some(4),
        "fifth" | "5th" => Some(5),
        _ => None,
    }
}

fn extract_location(text: &str) -> Option<String> {
    LOCATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn capture_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn extract_amenities(text: &str) -> Option<BTreeSet<String>> {
    let lower = text.to_lowercase();
    let found: BTreeSet<String> = AMENITY_SYNONYMS
        .iter()
        .filter(|(needle, _)| lower.contains(needle))
        .map(|(_, canonical)| canonical.to_string())
        .collect();

    (!found.is_empty()).then_some(found)
}

fn first_rule<T: Copy>(rules: &[(Regex, T)], text: &str) -> Option<T> {
    rules
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod price {
        use super::*;

        #[test]
        fn single_crore_mention_sets_both_bounds() {
            let data = extract("something under 2 crores");
            assert_eq!(price_mentions("something under 2 crores"), vec![20_000_000]);
            assert_eq!(data.min_price, Some(20_000_000));
            assert_eq!(data.max_price, Some(20_000_000));
        }

        #[test]
        fn range_uses_min_and_max_of_mentions() {
            let data = extract("between 50 lakh and 1.2 cr");
            assert_eq!(data.min_price, Some(5_000_000));
            assert_eq!(data.max_price, Some(12_000_000));
        }

        #[test]
        fn range_is_order_independent() {
            let data = extract("from 1.2 Cr down to 50 lacs");
            assert_eq!(data.min_price, Some(5_000_000));
            assert_eq!(data.max_price, Some(12_000_000));
        }

        #[test]
        fn no_unit_means_no_price() {
            let data = extract("budget is 5000000");
            assert_eq!(data.min_price, None);
            assert_eq!(data.max_price, None);
        }
    }

    mod fields {
        use super::*;

        #[test]
        fn extracts_full_search_message() {
            let data = extract("3bhk flat in Rajkot under 80 lakh with parking");

            assert_eq!(data.bedrooms, Some(3));
            assert_eq!(data.location.as_deref(), Some("Rajkot"));
            assert_eq!(data.property_type, Some(PropertyType::Flat));
            assert_eq!(data.max_price, Some(8_000_000));
            assert!(data.amenities.unwrap().contains("parking"));
        }

        #[test]
        fn location_captures_multi_word_city() {
            let data = extract("a villa near Navi Mumbai please");
            assert_eq!(data.location.as_deref(), Some("Navi Mumbai"));
        }

        #[test]
        fn lowercase_place_is_not_a_location() {
            assert_eq!(extract("somewhere in the city").location, None);
        }

        #[test]
        fn amenity_synonyms_are_deduplicated() {
            let data = extract("Need a swimming pool, an elevator and a lift");
            let amenities = data.amenities.unwrap();
            assert_eq!(amenities.len(), 2);
            assert!(amenities.contains("pool"));
            assert!(amenities.contains("lift"));
        }

        #[test]
        fn extracts_bathrooms_purpose_and_urgency() {
            let data = extract("want to rent with 2 bathrooms, need it urgently");
            assert_eq!(data.bathrooms, Some(2));
            assert_eq!(data.purpose, Some(Purpose::Rent));
            assert_eq!(data.urgency, Some(Urgency::Immediate));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn absent_fields_are_omitted() {
            let data = extract("2bhk please");
            let json = serde_json::to_value(&data).unwrap();
            assert_eq!(json, serde_json::json!({ "bedrooms": 2 }));
        }

        #[test]
        fn empty_extraction_has_no_data() {
            let data = extract("thanks!");
            assert!(!data.has_search_data());
            assert_eq!(serde_json::to_string(&data).unwrap(), "{}");
        }
    }

    mod search_data {
        use super::*;

        #[test]
        fn purpose_alone_is_not_search_data() {
            let data = extract("I want to buy a property");
            assert_eq!(data.purpose, Some(Purpose::Buy));
            assert!(!data.has_search_data());
        }

        #[test]
        fn urgency_alone_is_not_search_data() {
            let data = extract("I need something urgently");
            assert!(!data.has_search_data());
        }

        #[test]
        fn any_listing_field_is_search_data() {
            assert!(extract("2bhk please").has_search_data());
            assert!(extract("somewhere near Surat").has_search_data());
            assert!(extract("must have a gym").has_search_data());
            assert!(extract("under 50 lakh").has_search_data());
        }
    }

    mod references {
        use super::*;

        #[test]
        fn numeric_references() {
            assert_eq!(property_reference("show property 3"), Some(3));
            assert_eq!(property_reference("what about #2"), Some(2));
        }

        #[test]
        fn ordinal_references() {
            assert_eq!(property_reference("tell me about the first one"), Some(1));
            assert_eq!(property_reference("the 2nd option"), Some(2));
        }

        #[test]
        fn no_reference() {
            assert_eq!(property_reference("tell me more"), None);
        }
    }
}
