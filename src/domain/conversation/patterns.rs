//! Static pattern library for intent classification.
//!
//! Each category owns an ordered list of case-insensitive regular expressions.
//! Categories are listed in priority order; the classifier stops at the first
//! category with at least one matching pattern.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Intent;

/// Rule category a message can be matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    PlatformQuestions,
    Greeting,
    PropertySearch,
    PropertyDetails,
    Negotiation,
    VisitScheduling,
}

impl PatternCategory {
    /// Intent produced when this category wins.
    pub fn intent(&self) -> Intent {
        match self {
            PatternCategory::PlatformQuestions => Intent::AskQuestions,
            PatternCategory::Greeting => Intent::GeneralChat,
            PatternCategory::PropertySearch => Intent::SearchProperty,
            PatternCategory::PropertyDetails => Intent::GetPropertyDetails,
            PatternCategory::Negotiation => Intent::NegotiatePrice,
            PatternCategory::VisitScheduling => Intent::ScheduleVisit,
        }
    }

    /// Confidence reported regardless of how many patterns matched, if any.
    pub fn fixed_confidence(&self) -> Option<f32> {
        match self {
            PatternCategory::Greeting => Some(0.8),
            PatternCategory::Negotiation => Some(1.0),
            _ => None,
        }
    }
}

/// An ordered set of patterns for one category.
#[derive(Debug)]
pub struct PatternGroup {
    pub category: PatternCategory,
    patterns: Vec<Regex>,
}

impl PatternGroup {
    fn new(category: PatternCategory, sources: &[&str]) -> Self {
        let patterns = sources
            .iter()
            .map(|src| {
                Regex::new(&format!("(?i){}", src))
                    .unwrap_or_else(|e| panic!("invalid {:?} pattern '{}': {}", category, src, e))
            })
            .collect();
        Self { category, patterns }
    }

    /// Number of patterns in this group that match `text`.
    pub fn match_count(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }

    /// Total number of patterns in this group.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

static PATTERN_GROUPS: Lazy<Vec<PatternGroup>> = Lazy::new(|| {
    vec![
        PatternGroup::new(
            PatternCategory::PlatformQuestions,
            &[
                r"\bhow\b.*\bworks?\b",
                r"\b(sign\s*up|register|create\s+(an\s+)?account|join)\b",
                r"\b(contact|reach\s+you|phone\s+number|email|support|customer\s+care)\b",
                r"\babout\s+(you|this\s+(platform|site|website|service)|your\s+(company|platform|service))\b",
                r"\bwho\s+are\s+you\b",
                r"\b(fees?|charges|commission|pricing)\b",
                r"\bwhat\s+is\s+this\s+(platform|service|site|website|app)\b",
            ],
        ),
        PatternGroup::new(
            PatternCategory::Greeting,
            &[r"^\s*(hi|hello|hey|namaste|greetings|good\s+(morning|afternoon|evening))\b"],
        ),
        PatternGroup::new(
            PatternCategory::PropertySearch,
            &[
                r"\b(looking\s+for|search(ing)?\s+for|find|want|need|buy|rent|purchase)\b.*\b(propert(y|ies)|apartments?|flats?|villas?|houses?|homes?|plots?|land|office|shop)\b",
                r"\d+\s*bhk\b",
                r"\d+(\.\d+)?\s*(crores?|crs?|lakhs?|lacs?)\b",
                r"\b(budget|price\s+range)\b",
                r"\b(apartments?|flats?|villas?|houses?|plots?)\s+(in|at|near)\b",
            ],
        ),
        PatternGroup::new(
            PatternCategory::PropertyDetails,
            &[
                r"\b(details?|more\s+info(rmation)?)\b",
                r"\btell\s+me\s+more\s+about\b",
                r"\bspecifications?\b",
                r"\bproperty\s*#?\s*\d+\b",
                r"\b(first|second|third|fourth|fifth|1st|2nd|3rd|4th|5th)\s+(one|property|listing|option)\b",
            ],
        ),
        PatternGroup::new(
            PatternCategory::Negotiation,
            &[
                r"\bnegotiat",
                r"\bdiscount",
                r"\b(lower|reduce)\s+(the\s+)?price\b",
                r"\b(best|final)\s+price\b",
                r"\btoo\s+(expensive|costly|high)\b",
                r"\boffer\b",
                r"\bbargain",
            ],
        ),
        PatternGroup::new(
            PatternCategory::VisitScheduling,
            &[
                r"\bvisit",
                r"\bviewing\b",
                r"\bschedul",
                r"\bappointment\b",
                r"\bbook\s+(a\s+)?(visit|tour|viewing)\b",
                r"\bsee\s+(the|this|that)\s+(property|flat|house|villa|apartment|place)\b",
                r"\btour\b",
            ],
        ),
    ]
});

/// Returns the pattern groups in priority order.
pub fn pattern_groups() -> &'static [PatternGroup] {
    PATTERN_GROUPS.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(category: PatternCategory) -> &'static PatternGroup {
        pattern_groups()
            .iter()
            .find(|g| g.category == category)
            .unwrap()
    }

    #[test]
    fn groups_are_in_priority_order() {
        let order: Vec<_> = pattern_groups().iter().map(|g| g.category).collect();
        assert_eq!(
            order,
            vec![
                PatternCategory::PlatformQuestions,
                PatternCategory::Greeting,
                PatternCategory::PropertySearch,
                PatternCategory::PropertyDetails,
                PatternCategory::Negotiation,
                PatternCategory::VisitScheduling,
            ]
        );
    }

    #[test]
    fn every_group_has_patterns() {
        assert!(pattern_groups().iter().all(|g| !g.is_empty()));
    }

    #[test]
    fn greeting_only_matches_at_start() {
        let greeting = group(PatternCategory::Greeting);
        assert_eq!(greeting.match_count("Hello there"), 1);
        assert_eq!(greeting.match_count("  good morning!"), 1);
        assert_eq!(greeting.match_count("I said hello"), 0);
        assert_eq!(greeting.match_count("highway villa"), 0);
    }

    #[test]
    fn search_patterns_count_multiple_matches() {
        let search = group(PatternCategory::PropertySearch);
        assert_eq!(search.match_count("3bhk flat in Rajkot under 80 lakh"), 3);
    }

    #[test]
    fn details_matches_property_reference() {
        let details = group(PatternCategory::PropertyDetails);
        assert!(details.match_count("show property #2") > 0);
        assert!(details.match_count("the second one looks nice") > 0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let negotiation = group(PatternCategory::Negotiation);
        assert!(negotiation.match_count("Is there any DISCOUNT?") > 0);
    }

    #[test]
    fn categories_map_to_intents() {
        assert_eq!(PatternCategory::Greeting.intent(), Intent::GeneralChat);
        assert_eq!(PatternCategory::PlatformQuestions.intent(), Intent::AskQuestions);
        assert_eq!(PatternCategory::VisitScheduling.intent(), Intent::ScheduleVisit);
    }
}
