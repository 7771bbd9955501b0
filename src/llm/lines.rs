//! Line framing for streamed provider responses.
//!
//! Both providers stream line-oriented bodies (SSE for Groq, NDJSON for
//! Ollama). Network chunks do not respect line or UTF-8 boundaries, so bytes
//! are buffered until a full `\n`-terminated line is available.

#[cfg(test)]
#[path = "lines_test.rs"]
mod lines_test;

use std::collections::VecDeque;

use futures::{Stream, StreamExt};

use super::types::{LlmError, TextStream};

/// Accumulates raw bytes and yields complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append `bytes` and return every line completed by them, without
    /// their `\n` / `\r\n` terminators.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(decode_line(&raw[..raw.len() - 1]));
        }
        lines
    }

    /// Flush a trailing unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.pending);
        Some(decode_line(&raw))
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// What a single provider line means for the output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A text delta to forward.
    Text(String),
    /// The provider signalled the end of the completion.
    Done,
    /// Keep-alives, empty deltas and lines that failed to parse.
    Skip,
}

/// Re-frame a byte stream into lines.
pub fn into_lines<S, B, E>(body: S) -> impl Stream<Item = Result<String, LlmError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: std::fmt::Display + Send,
{
    let state = (Box::pin(body), LineBuffer::default(), VecDeque::new(), false);
    futures::stream::unfold(state, |(mut body, mut buf, mut ready, mut ended)| async move {
        loop {
            if let Some(line) = ready.pop_front() {
                return Some((Ok(line), (body, buf, ready, ended)));
            }
            if ended {
                return None;
            }
            match body.next().await {
                Some(Ok(chunk)) => ready.extend(buf.push(chunk.as_ref())),
                Some(Err(e)) => {
                    ended = true;
                    return Some((Err(LlmError::ApiRequest(e.to_string())), (body, buf, ready, ended)));
                }
                None => {
                    ended = true;
                    ready.extend(buf.finish());
                }
            }
        }
    })
}

/// Turn a line stream into text deltas using a provider-specific parser.
/// Stops at the first [`LineEvent::Done`].
pub fn deltas<L>(lines: L, parse: fn(&str) -> LineEvent) -> TextStream
where
    L: Stream<Item = Result<String, LlmError>> + Send + 'static,
{
    let stream = lines
        .map(move |line| line.map(|l| parse(&l)))
        .take_while(|event| futures::future::ready(!matches!(event, Ok(LineEvent::Done))))
        .filter_map(|event| {
            futures::future::ready(match event {
                Ok(LineEvent::Text(text)) => Some(Ok(text)),
                Ok(LineEvent::Done | LineEvent::Skip) => None,
                Err(e) => Some(Err(e)),
            })
        });
    Box::pin(stream)
}
