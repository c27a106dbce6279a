//! LLM Provider Abstraction Layer
//!
//! Provides a unified streaming interface over OpenAI-compatible chat
//! completion endpoints. The debate engine only sees the [`CompletionClient`]
//! trait, so tests can swap in scripted providers.

pub mod error;
pub mod factory;
mod openai;
pub mod tokens;
mod r#trait;

// Re-exports
pub use error::{ProviderError, Result};
pub use factory::create_client;
pub use openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiClient};
pub use r#trait::{CompletionClient, FragmentStream};
pub use tokens::estimate_tokens;
