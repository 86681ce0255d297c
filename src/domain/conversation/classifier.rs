//! Deterministic, priority-ordered intent classification.

use serde::Serialize;

use super::patterns::{pattern_groups, PatternCategory};
use super::Intent;

/// Outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntentMatch {
    pub intent: Intent,
    /// Category that won, `None` when nothing matched.
    pub category: Option<PatternCategory>,
    /// Informational only; never used for control flow.
    pub confidence: f32,
}

impl IntentMatch {
    /// Returns true if the greeting rule produced this match.
    pub fn is_greeting(&self) -> bool {
        self.category == Some(PatternCategory::Greeting)
    }

    fn fallback() -> Self {
        Self {
            intent: Intent::GeneralChat,
            category: None,
            confidence: 0.0,
        }
    }
}

/// Classifies a message into exactly one intent.
///
/// Groups are evaluated in priority order and the first group with at least
/// one matching pattern wins. Later groups are never consulted.
pub fn classify(text: &str) -> IntentMatch {
    for group in pattern_groups() {
        let matches = group.match_count(text);
        if matches == 0 {
            continue;
        }

        let confidence = group
            .category
            .fixed_confidence()
            .unwrap_or(matches as f32 / group.len() as f32);

        return IntentMatch {
            intent: group.category.intent(),
            category: Some(group.category),
            confidence,
        };
    }

    IntentMatch::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod priority {
        use super::*;

        #[test]
        fn platform_question_beats_greeting() {
            let m = classify("Hi, how does this platform work?");
            assert_eq!(m.intent, Intent::AskQuestions);
            assert_eq!(m.category, Some(PatternCategory::PlatformQuestions));
        }

        #[test]
        fn greeting_beats_search() {
            let m = classify("Hello, I want to buy a flat");
            assert_eq!(m.intent, Intent::GeneralChat);
            assert!(m.is_greeting());
        }

        #[test]
        fn search_beats_negotiation() {
            let m = classify("any discount on a 2bhk?");
            assert_eq!(m.intent, Intent::SearchProperty);
        }

        #[test]
        fn details_beats_visit() {
            let m = classify("more details before I visit");
            assert_eq!(m.intent, Intent::GetPropertyDetails);
        }
    }

    mod confidence {
        use super::*;

        #[test]
        fn greeting_confidence_is_fixed() {
            assert_eq!(classify("good evening").confidence, 0.8);
        }

        #[test]
        fn negotiation_confidence_is_fixed() {
            assert_eq!(classify("can you lower the price").confidence, 1.0);
        }

        #[test]
        fn search_confidence_is_match_ratio() {
            let m = classify("3bhk flat in Rajkot under 80 lakh");
            assert_eq!(m.intent, Intent::SearchProperty);
            assert!((m.confidence - 3.0 / 5.0).abs() < f32::EPSILON);
        }
    }

    mod fallback {
        use super::*;

        #[test]
        fn unmatched_message_is_general_chat() {
            let m = classify("the weather is lovely today");
            assert_eq!(m.intent, Intent::GeneralChat);
            assert_eq!(m.category, None);
            assert!(!m.is_greeting());
        }

        #[test]
        fn visit_request_is_classified() {
            assert_eq!(
                classify("can I schedule a visit tomorrow").intent,
                Intent::ScheduleVisit
            );
        }
    }
}
