//! AI service: prompt → provider stream → plain text response body.
//!
//! DESIGN
//! ======
//! The widget renders whatever text arrives, so provider failures are
//! reported in-band as a final `[AI error: ...]` chunk instead of a status
//! code. Once streaming has started the status line is already sent, and
//! failures before the first byte are handled the same way for consistency.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{info, warn};

use crate::llm::LlmStream;
use crate::llm::types::{LlmError, TextStream};

/// Response body chunks. Never fails; errors are rendered as text.
pub type TextBody = Pin<Box<dyn Stream<Item = Result<String, Infallible>> + Send>>;

/// Text appended when the provider fails.
#[must_use]
pub fn error_chunk(err: &LlmError) -> String {
    format!("[AI error: {err}]")
}

/// Provider error body, if the failure carried one.
#[must_use]
pub fn upstream_body(err: &LlmError) -> Option<&str> {
    match err {
        LlmError::ApiResponse { body, .. } if !body.is_empty() => Some(body.as_str()),
        _ => None,
    }
}

/// Start a completion and adapt it into a response body.
pub async fn relay(llm: Arc<dyn LlmStream>, prompt: &str, max_tokens: u32, route: &'static str) -> TextBody {
    match llm.stream(prompt, max_tokens).await {
        Ok(stream) => {
            info!(route, max_tokens, "AI stream started");
            inline_errors(stream, route)
        }
        Err(e) => {
            warn!(route, error = %e, upstream_body = upstream_body(&e).unwrap_or_default(), "AI stream failed to start");
            Box::pin(futures::stream::once(async move { Ok::<_, Infallible>(error_chunk(&e)) }))
        }
    }
}

/// Forward deltas until the first error, which becomes the last chunk.
pub fn inline_errors(stream: TextStream, route: &'static str) -> TextBody {
    let body = futures::stream::unfold(Some((stream, 0usize)), move |state| async move {
        let (mut stream, chunks) = state?;
        match stream.next().await {
            Some(Ok(text)) => Some((Ok::<_, Infallible>(text), Some((stream, chunks + 1)))),
            Some(Err(e)) => {
                warn!(
                    route,
                    chunks,
                    error = %e,
                    upstream_body = upstream_body(&e).unwrap_or_default(),
                    "AI stream failed mid-response"
                );
                Some((Ok(error_chunk(&e)), None))
            }
            None => {
                info!(route, chunks, "AI stream finished");
                None
            }
        }
    });
    Box::pin(body)
}
