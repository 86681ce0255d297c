//! Classified purpose of a single user message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The intent detected for a user message.
///
/// Recorded on every user turn; never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SearchProperty,
    GetPropertyDetails,
    NegotiatePrice,
    ScheduleVisit,
    AskQuestions,
    #[default]
    GeneralChat,
}

impl Intent {
    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SearchProperty => "search_property",
            Intent::GetPropertyDetails => "get_property_details",
            Intent::NegotiatePrice => "negotiate_price",
            Intent::ScheduleVisit => "schedule_visit",
            Intent::AskQuestions => "ask_questions",
            Intent::GeneralChat => "general_chat",
        }
    }

    /// Returns true if a dedicated response handler exists for this intent.
    ///
    /// Intents without one fall through to state-based dispatch.
    pub fn has_dedicated_handler(&self) -> bool {
        !matches!(self, Intent::GeneralChat)
    }

    /// Returns true if extracted criteria from this message should be merged
    /// into the conversation preferences.
    pub fn merges_preferences(&self) -> bool {
        !matches!(self, Intent::AskQuestions)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&Intent::GetPropertyDetails).unwrap();
        assert_eq!(json, "\"get_property_details\"");
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Intent::NegotiatePrice.to_string(), "negotiate_price");
    }

    #[test]
    fn general_chat_has_no_dedicated_handler() {
        assert!(!Intent::GeneralChat.has_dedicated_handler());
        assert!(Intent::AskQuestions.has_dedicated_handler());
    }

    #[test]
    fn only_ask_questions_skips_preference_merge() {
        assert!(!Intent::AskQuestions.merges_preferences());
        assert!(Intent::SearchProperty.merges_preferences());
        assert!(Intent::GeneralChat.merges_preferences());
    }
}
