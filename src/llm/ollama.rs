//! Ollama client: `/api/generate` with NDJSON streaming.

#[cfg(test)]
#[path = "ollama_test.rs"]
mod ollama_test;

use serde::{Deserialize, Serialize};

use super::config::{LlmTimeouts, SamplingOptions};
use super::lines::{LineEvent, deltas, into_lines};
use super::types::{LlmError, TextStream};

pub struct OllamaClient {
    http: reqwest::Client,
    host: String,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

impl OllamaClient {
    /// Build a client for the daemon at `host` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(host: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = super::build_http_client(timeouts)?;
        Ok(Self { http, host })
    }

    /// Start a streamed generation for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon is unreachable or answers with a
    /// non-success status.
    pub async fn stream(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
        sampling: &SamplingOptions,
    ) -> Result<TextStream, LlmError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: true,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature: sampling.temperature,
                top_p: sampling.top_p,
                repeat_penalty: sampling.repeat_penalty,
            },
        };
        let url = format!("{}/api/generate", self.host);
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::ApiRequest(format!("cannot connect to Ollama at {}", self.host))
                } else {
                    LlmError::ApiRequest(e.to_string())
                }
            })?;
        let response = super::ensure_success(response).await?;

        Ok(deltas(into_lines(response.bytes_stream()), parse_ndjson_line))
    }
}

/// Interpret one NDJSON line from `/api/generate`.
pub(crate) fn parse_ndjson_line(line: &str) -> LineEvent {
    let line = line.trim();
    if line.is_empty() {
        return LineEvent::Skip;
    }
    let Ok(chunk) = serde_json::from_str::<GenerateChunk>(line) else {
        return LineEvent::Skip;
    };
    if !chunk.response.is_empty() {
        return LineEvent::Text(chunk.response);
    }
    if chunk.done { LineEvent::Done } else { LineEvent::Skip }
}
