//! Conversation state machine.
//!
//! Defines the dialog states of a conversation and how intents move it
//! between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Intent;
use crate::domain::foundation::StateMachine;

/// The dialog state of a conversation.
///
/// A conversation is always in exactly one state and never terminates:
/// - `Greeting`: fresh session, nothing exchanged yet
/// - `GatheringRequirements`: collecting search criteria
/// - `Searching`: criteria known, results being shown
/// - `ShowingResults`: user is looking at a specific listing
/// - `Negotiating`: user is discussing price
/// - `SchedulingVisit`: user wants to see a property
/// - `FollowUp`: reserved for out-of-band follow-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Greeting,
    GatheringRequirements,
    Searching,
    ShowingResults,
    Negotiating,
    SchedulingVisit,
    FollowUp,
}

impl ConversationState {
    const ALL: [ConversationState; 7] = [
        ConversationState::Greeting,
        ConversationState::GatheringRequirements,
        ConversationState::Searching,
        ConversationState::ShowingResults,
        ConversationState::Negotiating,
        ConversationState::SchedulingVisit,
        ConversationState::FollowUp,
    ];

    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Greeting => "greeting",
            ConversationState::GatheringRequirements => "gathering_requirements",
            ConversationState::Searching => "searching",
            ConversationState::ShowingResults => "showing_results",
            ConversationState::Negotiating => "negotiating",
            ConversationState::SchedulingVisit => "scheduling_visit",
            ConversationState::FollowUp => "follow_up",
        }
    }

    /// Computes the state that follows this one for a classified message.
    ///
    /// `has_data` is true when the message yielded at least one searchable
    /// field. Intent-specific rules always override the current state.
    pub fn next(self, intent: Intent, has_data: bool) -> Self {
        use ConversationState::*;
        match intent {
            Intent::SearchProperty if has_data => Searching,
            Intent::SearchProperty => GatheringRequirements,
            Intent::GetPropertyDetails => ShowingResults,
            Intent::NegotiatePrice => Negotiating,
            Intent::ScheduleVisit => SchedulingVisit,
            Intent::AskQuestions | Intent::GeneralChat => match self {
                Greeting => GatheringRequirements,
                other => other,
            },
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConversationState {
    type Err = crate::domain::foundation::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                crate::domain::foundation::ValidationError::invalid_format(
                    "state",
                    format!("unknown conversation state '{}'", s),
                )
            })
    }
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        // Greeting is only ever the initial state.
        *target != ConversationState::Greeting
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConversationState::*;

    mod state_definition {
        use super::*;

        #[test]
        fn default_state_is_greeting() {
            assert_eq!(ConversationState::default(), Greeting);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&SchedulingVisit).unwrap();
            assert_eq!(json, "\"scheduling_visit\"");
        }

        #[test]
        fn parses_wire_names() {
            assert_eq!("follow_up".parse::<ConversationState>().unwrap(), FollowUp);
            assert!("closed".parse::<ConversationState>().is_err());
        }
    }

    mod next {
        use super::*;

        #[test]
        fn greeting_moves_to_gathering_on_questions() {
            assert_eq!(
                Greeting.next(Intent::AskQuestions, false),
                GatheringRequirements
            );
        }

        #[test]
        fn greeting_moves_to_gathering_on_chat() {
            assert_eq!(
                Greeting.next(Intent::GeneralChat, false),
                GatheringRequirements
            );
        }

        #[test]
        fn other_states_unchanged_on_chat() {
            for state in [Searching, Negotiating, ShowingResults, FollowUp] {
                assert_eq!(state.next(Intent::GeneralChat, true), state);
                assert_eq!(state.next(Intent::AskQuestions, false), state);
            }
        }

        #[test]
        fn search_with_data_overrides_negotiating() {
            assert_eq!(Negotiating.next(Intent::SearchProperty, true), Searching);
        }

        #[test]
        fn search_without_data_gathers_requirements() {
            assert_eq!(
                Searching.next(Intent::SearchProperty, false),
                GatheringRequirements
            );
        }

        #[test]
        fn intent_specific_targets() {
            assert_eq!(
                Greeting.next(Intent::GetPropertyDetails, false),
                ShowingResults
            );
            assert_eq!(Searching.next(Intent::NegotiatePrice, false), Negotiating);
            assert_eq!(
                Negotiating.next(Intent::ScheduleVisit, false),
                SchedulingVisit
            );
        }

        #[test]
        fn next_never_returns_greeting() {
            let intents = [
                Intent::SearchProperty,
                Intent::GetPropertyDetails,
                Intent::NegotiatePrice,
                Intent::ScheduleVisit,
                Intent::AskQuestions,
                Intent::GeneralChat,
            ];
            for state in ConversationState::ALL {
                for intent in intents {
                    for has_data in [true, false] {
                        assert_ne!(state.next(intent, has_data), Greeting);
                    }
                }
            }
        }
    }

    mod state_machine {
        use super::*;

        #[test]
        fn no_state_is_terminal() {
            assert!(ConversationState::ALL.iter().all(|s| !s.is_terminal()));
        }

        #[test]
        fn follow_up_is_reachable() {
            assert_eq!(Searching.transition_to(FollowUp), Ok(FollowUp));
        }

        #[test]
        fn cannot_return_to_greeting() {
            assert!(Searching.transition_to(Greeting).is_err());
        }
    }
}
