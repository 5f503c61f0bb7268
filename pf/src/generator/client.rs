//! CompletionClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::GeneratorError;

/// The two shapes a generation response can take
///
/// The endpoint normally answers with a JSON object carrying a `result`
/// string, but the contract is loose: anything else is passed through as
/// the raw body. The shape is resolved exactly once, in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    /// JSON object with a string `result` field
    Structured(String),
    /// Anything else - the raw response body, verbatim
    Raw(String),
}

impl PlanSource {
    /// The plan text, whichever shape it arrived in
    pub fn text(&self) -> &str {
        match self {
            Self::Structured(text) | Self::Raw(text) => text,
        }
    }

    /// Consume into the plan text
    pub fn into_text(self) -> String {
        match self {
            Self::Structured(text) | Self::Raw(text) => text,
        }
    }
}

/// Stateless generation client - each call is independent
///
/// One prompt in, one plan out. No conversation state, no streaming,
/// no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and wait for the generated plan
    async fn generate(&self, prompt: &str) -> Result<PlanSource, GeneratorError>;
}
