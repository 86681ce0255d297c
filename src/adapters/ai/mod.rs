//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port plus the multi-model gateway
//! built on top of it.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - any OpenAI-compatible `/chat/completions` endpoint (OpenRouter by default)
//! - `MockAIProvider` - Configurable mock for testing
//! - `ModelGateway` - Ordered fallback across models with per-attempt timeouts and JSON cleanup

pub mod json_extract;
mod mock_provider;
mod model_gateway;
mod openai_provider;
pub mod ordered_fallback;

pub use json_extract::{extract_json, parse_json, JsonExtractError};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use model_gateway::{GatewayError, ModelGateway};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL};
pub use ordered_fallback::{first_success, FallbackError};
