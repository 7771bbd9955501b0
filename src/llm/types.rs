//! LLM types: streaming trait, text stream alias and errors.
//!
//! Provider-neutral types shared by the Groq and Ollama clients.

use std::pin::Pin;

use futures::Stream;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// STREAMING
// =============================================================================

/// Incremental model output. Each item is one non-empty text delta.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Anything that can turn a prompt into a stream of text deltas.
///
/// Implemented by [`super::LlmClient`] in production and by mocks in tests.
#[async_trait::async_trait]
pub trait LlmStream: Send + Sync {
    /// Start a completion for `prompt`, capped at `max_tokens` output tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the provider
    /// responds with a non-success status before streaming begins.
    async fn stream(&self, prompt: &str, max_tokens: u32) -> Result<TextStream, LlmError>;
}
