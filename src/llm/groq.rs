//! Groq client: OpenAI-compatible `/chat/completions` with SSE streaming.

#[cfg(test)]
#[path = "groq_test.rs"]
mod groq_test;

use serde::{Deserialize, Serialize};

use super::config::{LlmTimeouts, SYSTEM_PROMPT, SamplingOptions};
use super::lines::{LineEvent, deltas, into_lines};
use super::types::{LlmError, TextStream};

pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: [CcMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct CcChunk {
    #[serde(default)]
    choices: Vec<CcChoice>,
}

#[derive(Deserialize)]
struct CcChoice {
    #[serde(default)]
    delta: CcDelta,
}

#[derive(Default, Deserialize)]
struct CcDelta {
    content: Option<String>,
}

impl GroqClient {
    /// Build a client for `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = super::build_http_client(timeouts)?;
        Ok(Self { http, api_key, base_url })
    }

    /// Start a streamed chat completion for a single user prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    pub async fn stream(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
        sampling: &SamplingOptions,
    ) -> Result<TextStream, LlmError> {
        let body = CcRequest {
            model,
            messages: [
                CcMessage { role: "system", content: SYSTEM_PROMPT },
                CcMessage { role: "user", content: prompt },
            ],
            max_tokens,
            temperature: sampling.temperature,
            stream: true,
        };
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        let response = super::ensure_success(response).await?;

        Ok(deltas(into_lines(response.bytes_stream()), parse_sse_line))
    }
}

/// Interpret one SSE line from a chat-completions stream.
pub(crate) fn parse_sse_line(line: &str) -> LineEvent {
    let Some(data) = line.strip_prefix("data:") else {
        return LineEvent::Skip;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return LineEvent::Done;
    }
    let Ok(chunk) = serde_json::from_str::<CcChunk>(data) else {
        return LineEvent::Skip;
    };
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map_or(LineEvent::Skip, LineEvent::Text)
}
