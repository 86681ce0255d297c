//! ResponseComposer - builds the assistant reply for one classified message.
//!
//! Intent-specific handlers take priority; `general_chat` falls through to
//! the handler for the conversation's current state. The composer reads the
//! conversation but never mutates it.

use std::sync::Arc;

use crate::adapters::ai::ModelGateway;
use crate::domain::conversation::{
    property_reference, Conversation, ConversationState, Intent, IntentMatch, Preferences,
};
use crate::domain::property::{Property, PropertyFilter, SortOrder};
use crate::ports::{Message, PropertyRepository};

use super::templates;

const ASSISTANT_PERSONA: &str = "You are Realty Concierge, a friendly assistant for an Indian \
real-estate platform. Help users find flats, villas, houses and plots. Keep answers short \
(under 120 words), quote prices in INR using lakh and crore, and steer the conversation \
back to their property search when appropriate.";

/// Tunables for reply composition.
#[derive(Debug, Clone, Copy)]
pub struct ComposerSettings {
    /// Maximum listings returned by a search.
    pub result_limit: u32,
    /// History turns sent to the model as context.
    pub context_turns: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            result_limit: 5,
            context_turns: 6,
        }
    }
}

/// A composed reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Listings shown in the reply.
    pub properties: Vec<Property>,
    /// True when `properties` are search suggestions that later messages
    /// may refer to by number.
    pub suggests: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: Vec::new(),
            suggests: false,
        }
    }

    /// IDs to record on the assistant turn.
    pub fn suggested_ids(&self) -> Vec<crate::domain::foundation::PropertyId> {
        if self.suggests {
            self.properties.iter().map(|p| p.id).collect()
        } else {
            Vec::new()
        }
    }
}

/// Produces replies from (state, intent, extracted data).
#[derive(Clone)]
pub struct ResponseComposer {
    properties: Arc<dyn PropertyRepository>,
    gateway: Option<ModelGateway>,
    settings: ComposerSettings,
}

impl ResponseComposer {
    /// Creates a composer. Without a gateway, free-text replies stay on templates.
    pub fn new(properties: Arc<dyn PropertyRepository>, gateway: Option<ModelGateway>) -> Self {
        Self {
            properties,
            gateway,
            settings: ComposerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ComposerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Composes the reply for `text`.
    ///
    /// `conversation` must already reflect the transition for this message.
    pub async fn compose(
        &self,
        conversation: &Conversation,
        text: &str,
        classification: &IntentMatch,
    ) -> Reply {
        let mut reply = match classification.intent {
            Intent::AskQuestions => Reply::text(templates::platform(text)),
            Intent::SearchProperty => self.search(conversation.preferences()).await,
            Intent::GetPropertyDetails => self.details(conversation, text).await,
            Intent::NegotiatePrice => Reply::text(templates::negotiation(text)),
            Intent::ScheduleVisit => Reply::text(templates::visit(text)),
            Intent::GeneralChat => self.by_state(conversation, text, classification).await,
        };

        if classification.is_greeting() {
            reply.text.insert_str(0, templates::GREETING_PREFIX);
        }
        reply
    }

    async fn by_state(
        &self,
        conversation: &Conversation,
        text: &str,
        classification: &IntentMatch,
    ) -> Reply {
        match conversation.state() {
            ConversationState::GatheringRequirements => {
                Reply::text(gather(conversation.preferences()))
            }
            ConversationState::Negotiating => Reply::text(templates::negotiation(text)),
            ConversationState::SchedulingVisit => Reply::text(templates::visit(text)),
            ConversationState::Greeting
            | ConversationState::Searching
            | ConversationState::ShowingResults
            | ConversationState::FollowUp => {
                if classification.is_greeting() {
                    return Reply::text(templates::welcome());
                }
                Reply::text(self.general(conversation, text).await)
            }
        }
    }

    async fn search(&self, preferences: &Preferences) -> Reply {
        if !preferences.has_search_criteria() {
            return Reply::text(templates::needs_criteria());
        }

        let filter = PropertyFilter::from_preferences(preferences);
        let found = self
            .properties
            .find(&filter, self.settings.result_limit, SortOrder::NewestFirst)
            .await;

        match found {
            Ok(properties) if properties.is_empty() => {
                Reply::text(templates::no_results(preferences))
            }
            Ok(properties) => Reply {
                text: templates::search_results(&properties),
                properties,
                suggests: true,
            },
            Err(e) => {
                tracing::error!(error = %e, "Property search failed");
                Reply::text(templates::SEARCH_UNAVAILABLE)
            }
        }
    }

    async fn details(&self, conversation: &Conversation, text: &str) -> Reply {
        let referenced = property_reference(text)
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| conversation.last_suggested_properties().get(index).copied());

        let Some(id) = referenced else {
            return Reply::text(templates::details(text));
        };

        match self.properties.find_by_id(&id).await {
            Ok(Some(property)) => {
                let repository = Arc::clone(&self.properties);
                tokio::spawn(async move {
                    if let Err(e) = repository.increment_views(&id).await {
                        tracing::warn!(property_id = %id, error = %e, "Failed to record view");
                    }
                });

                Reply {
                    text: templates::property_card(&property),
                    properties: vec![property],
                    suggests: false,
                }
            }
            Ok(None) => Reply::text(templates::details(text)),
            Err(e) => {
                tracing::error!(property_id = %id, error = %e, "Property lookup failed");
                Reply::text(templates::SEARCH_UNAVAILABLE)
            }
        }
    }

    async fn general(&self, conversation: &Conversation, text: &str) -> String {
        if let Some(reply) = templates::general(text) {
            return reply;
        }

        let Some(gateway) = &self.gateway else {
            return templates::welcome();
        };

        let mut messages = vec![Message::system(format!(
            "{} Known preferences: {}.",
            ASSISTANT_PERSONA,
            templates::describe_preferences(conversation.preferences())
        ))];
        for turn in conversation.recent_turns(self.settings.context_turns) {
            messages.push(if turn.is_user() {
                Message::user(turn.content())
            } else {
                Message::assistant(turn.content())
            });
        }
        messages.push(Message::user(text));

        match gateway.complete(messages, false).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => templates::APOLOGY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Model gateway failed; using fallback reply");
                templates::APOLOGY.to_string()
            }
        }
    }
}

fn gather(preferences: &Preferences) -> String {
    let missing = preferences.missing_requirements();
    if missing.is_empty() {
        templates::ready_to_search(preferences)
    } else {
        templates::gather_requirements(&missing)
    }
}
