//! The completion contract consumed by the debate engine.

use super::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A finite sequence of text fragments, pulled until exhausted or failed.
///
/// Fragments arrive in model output order and are never reordered or dropped;
/// the consumer's only job is to concatenate them.
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// One model endpoint, as seen by the debate engine.
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug {
    /// Deterministic token estimate for a piece of text.
    ///
    /// Used for display and accounting only — never for control flow.
    fn count_tokens(&self, text: &str) -> u32;

    /// Submit one two-message exchange (system instruction + user content)
    /// and return the streaming response.
    ///
    /// A failed call is surfaced as-is; callers never retry.
    async fn stream_complete(&self, instruction: &str, content: &str) -> Result<FragmentStream>;
}
