//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const SYSTEM_PROMPT: &str = "You are a helpful academic assistant. Be concise and helpful.";

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self { temperature: 0.3, top_p: 0.9, repeat_penalty: 1.1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    /// Hosted OpenAI-compatible endpoint, used when an API key is present.
    Groq { api_key: String, base_url: String },
    /// Local Ollama daemon.
    Ollama { host: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub sampling: SamplingOptions,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Groq is selected when `GROQ_API_KEY` is set and non-empty:
    /// - `GROQ_MODEL`: default `llama-3.1-8b-instant`
    /// - `GROQ_BASE_URL`: default Groq OpenAI-compatible endpoint
    ///
    /// Otherwise Ollama:
    /// - `OLLAMA_HOST`: default `http://localhost:11434`
    /// - `OLLAMA_MODEL`: default `llama3`
    ///
    /// Both:
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 60
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is empty after trimming.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is empty after trimming.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let groq_key = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty());

        let (provider, model) = if let Some(api_key) = groq_key {
            let base_url =
                normalize_base_url(&lookup("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_owned()))?;
            let model = lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_owned());
            (LlmProvider::Groq { api_key, base_url }, model)
        } else {
            let host = normalize_base_url(&lookup("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_owned()))?;
            let model = lookup("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_owned());
            (LlmProvider::Ollama { host }, model)
        };

        let timeouts = LlmTimeouts {
            request_secs: parse_u64(lookup("LLM_REQUEST_TIMEOUT_SECS"), DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("LLM_CONNECT_TIMEOUT_SECS"), DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, model, sampling: SamplingOptions::default(), timeouts })
    }

    /// Short provider label for logs.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            LlmProvider::Groq { .. } => "groq",
            LlmProvider::Ollama { .. } => "ollama",
        }
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, LlmError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(LlmError::ConfigParse("empty base URL".into()));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
