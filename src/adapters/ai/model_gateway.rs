//! Model Gateway - resilient multi-model completion client.
//!
//! Walks a fixed priority list of model identifiers against one provider.
//! The first model that answers wins. A rejected credential stops the walk
//! because every model shares the same key; any other failure moves on to
//! the next model. Each attempt is bounded by its own timeout.
//!
//! # Example
//!
//! ```ignore
//! let gateway = ModelGateway::new(provider, vec!["primary".into(), "backup".into()])
//!     .with_temperature(0.3)
//!     .with_attempt_timeout(Duration::from_secs(20));
//!
//! let reply = gateway.complete(messages, false).await?;
//! let draft: DraftFilter = gateway.complete_json(messages).await?;
//! ```

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::json_extract::parse_json;
use super::ordered_fallback::{first_success, FallbackError};
use crate::ports::{AIError, AIProvider, CompletionRequest, Message};

/// Errors from a gateway call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// No model produced a completion.
    #[error("model service error: {0}")]
    Service(#[from] AIError),

    /// A model answered but the output was not the expected JSON.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Ordered multi-model completion client.
#[derive(Clone)]
pub struct ModelGateway {
    provider: Arc<dyn AIProvider>,
    models: Vec<String>,
    temperature: f32,
    attempt_timeout: Duration,
    max_tokens: Option<u32>,
}

impl ModelGateway {
    /// Creates a gateway over `models`, tried in the given order.
    pub fn new(provider: Arc<dyn AIProvider>, models: Vec<String>) -> Self {
        Self {
            provider,
            models,
            temperature: 0.7,
            attempt_timeout: Duration::from_secs(30),
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// The configured model priority list.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Returns the content of the first successful completion.
    ///
    /// # Errors
    ///
    /// - `AuthenticationFailed` as soon as any model rejects the key
    /// - the last model's error when every model fails
    /// - `InvalidRequest` when no models are configured
    pub async fn complete(&self, messages: Vec<Message>, json_mode: bool) -> Result<String, AIError> {
        first_success(
            &self.models,
            |model| self.attempt(model, &messages, json_mode),
            AIError::is_authorization,
        )
        .await
        .map_err(|err| match err {
            FallbackError::NoCandidates => {
                AIError::InvalidRequest("no candidate models configured".to_string())
            }
            FallbackError::Aborted(e) | FallbackError::Exhausted(e) => e,
        })
    }

    /// Requests JSON output and deserializes it into `T`.
    ///
    /// Markdown fences and surrounding prose are stripped before parsing.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        messages: Vec<Message>,
    ) -> Result<T, GatewayError> {
        let raw = self.complete(messages, true).await?;
        parse_json(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Model returned unparseable JSON");
            GatewayError::MalformedResponse(e.reason)
        })
    }

    async fn attempt(
        &self,
        model: &str,
        messages: &[Message],
        json_mode: bool,
    ) -> Result<String, AIError> {
        let mut request = CompletionRequest::new(model)
            .with_messages(messages.to_vec())
            .with_temperature(self.temperature)
            .with_json_mode(json_mode);
        if let Some(max) = self.max_tokens {
            request = request.with_max_tokens(max);
        }

        let response = tokio::time::timeout(self.attempt_timeout, self.provider.complete(request))
            .await
            .map_err(|_| AIError::timeout(self.attempt_timeout))??;

        tracing::debug!(
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "Completion succeeded"
        );
        Ok(response.content)
    }
}
