//! Typing effect helpers.
//!
//! Bot text is revealed one token per tick. Tokens alternate between words
//! and whitespace runs so joining them reproduces the input byte for byte.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

/// Split `text` into alternating word and whitespace-run tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_space: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if prev_space.is_some_and(|prev| prev != space) {
            tokens.push(&text[start..i]);
            start = i;
        }
        prev_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Wait between typing ticks. Resolves immediately outside the browser.
#[allow(clippy::unused_async)]
pub async fn pause(delay_ms: u32) {
    #[cfg(feature = "hydrate")]
    {
        if delay_ms > 0 {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay_ms;
    }
}
