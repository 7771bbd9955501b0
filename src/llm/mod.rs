//! LLM: streaming adapter for the AI chat endpoints.
//!
//! DESIGN
//! ======
//! Uses environment variables instead of config files. The `LlmClient`
//! dispatches to Groq (hosted, when `GROQ_API_KEY` is set) or a local
//! Ollama daemon. Both providers stream line-framed bodies that are reduced
//! to plain text deltas before they reach the routes.

pub mod config;
pub mod groq;
pub mod lines;
pub mod ollama;
pub mod types;

use std::time::Duration;

use config::{LlmConfig, LlmProvider, LlmTimeouts, SamplingOptions};
pub use types::LlmStream;
use types::{LlmError, TextStream};

const ERROR_BODY_LIMIT: usize = 512;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Groq or Ollama.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: Provider,
    model: String,
    provider_name: &'static str,
    sampling: SamplingOptions,
}

enum Provider {
    Groq(groq::GroqClient),
    Ollama(ollama::OllamaClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let provider_name = config.provider_name();
        let inner = match config.provider {
            LlmProvider::Groq { api_key, base_url } => {
                Provider::Groq(groq::GroqClient::new(api_key, base_url, config.timeouts)?)
            }
            LlmProvider::Ollama { host } => Provider::Ollama(ollama::OllamaClient::new(host, config.timeouts)?),
        };
        Ok(Self { inner, model: config.model, provider_name, sampling: config.sampling })
    }

    /// Return the configured model name (e.g. `"llama3"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Return the provider label (`"groq"` or `"ollama"`).
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.provider_name
    }
}

#[async_trait::async_trait]
impl LlmStream for LlmClient {
    async fn stream(&self, prompt: &str, max_tokens: u32) -> Result<TextStream, LlmError> {
        match &self.inner {
            Provider::Groq(c) => c.stream(&self.model, prompt, max_tokens, &self.sampling).await,
            Provider::Ollama(c) => c.stream(&self.model, prompt, max_tokens, &self.sampling).await,
        }
    }
}

// =============================================================================
// SHARED HTTP HELPERS
// =============================================================================

fn build_http_client(timeouts: LlmTimeouts) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > ERROR_BODY_LIMIT {
        let cut = (0..=ERROR_BODY_LIMIT)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    Err(LlmError::ApiResponse { status: status.as_u16(), body })
}
