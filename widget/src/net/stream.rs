//! Streaming POST to the AI endpoints.
//!
//! DESIGN
//! ======
//! `stream_to_ai` sends a form-urlencoded POST through `gloo-net`, then
//! reads the raw body through a `ReadableStreamDefaultReader` so text can be
//! rendered as it arrives. Reading and decoding are split: the browser side
//! only turns reader results into byte chunks, and [`collect_chunks`] owns
//! decoding and accumulation so it can be driven natively in tests.
//!
//! ERROR HANDLING
//! ==============
//! Every failure maps to one [`StreamError`] variant for logging. A non-2xx
//! status is an error. A response without a body resolves to the empty
//! string.

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

use futures::{Stream, StreamExt};

use super::decode::Utf8StreamDecoder;

/// Failure of one streaming request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("reading response body failed: {0}")]
    Read(String),
}

/// Decode byte chunks, invoking `on_chunk` for each non-empty decoded piece
/// in arrival order, and return the full text.
///
/// # Errors
///
/// Returns the first error yielded by `chunks`. Text already delivered to
/// `on_chunk` stays delivered.
pub async fn collect_chunks<S>(chunks: S, on_chunk: &mut dyn FnMut(&str)) -> Result<String, StreamError>
where
    S: Stream<Item = Result<Vec<u8>, StreamError>>,
{
    let mut chunks = std::pin::pin!(chunks);
    let mut decoder = Utf8StreamDecoder::new();
    let mut buffer = String::new();

    while let Some(bytes) = chunks.next().await {
        let text = decoder.push(&bytes?);
        emit(&mut buffer, &text, on_chunk);
    }
    let tail = decoder.finish();
    emit(&mut buffer, &tail, on_chunk);

    Ok(buffer)
}

fn emit(buffer: &mut String, text: &str, on_chunk: &mut dyn FnMut(&str)) {
    if text.is_empty() {
        return;
    }
    buffer.push_str(text);
    on_chunk(text);
}

// =============================================================================
// BROWSER FETCH
// =============================================================================

/// POST `fields` form-urlencoded to `path` and stream the response text.
///
/// # Errors
///
/// [`StreamError::Network`] if the request cannot be built or sent,
/// [`StreamError::Status`] on a non-2xx response, [`StreamError::Read`] if
/// the body reader fails mid-stream.
#[cfg(feature = "hydrate")]
pub async fn stream_to_ai(
    path: &str,
    fields: &[(&str, &str)],
    on_chunk: &mut dyn FnMut(&str),
) -> Result<String, StreamError> {
    use wasm_bindgen::JsCast;

    let params = web_sys::UrlSearchParams::new().map_err(|e| StreamError::Network(format!("{e:?}")))?;
    for (name, value) in fields {
        params.append(name, value);
    }
    let body = String::from(params.to_string());

    let response = gloo_net::http::Request::post(path)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .map_err(|e| StreamError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| StreamError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(StreamError::Status(response.status()));
    }
    let Some(body) = response.body() else {
        return Ok(String::new());
    };
    let reader: web_sys::ReadableStreamDefaultReader = body.get_reader().unchecked_into();

    collect_chunks(read_chunks(reader), on_chunk).await
}

#[cfg(feature = "hydrate")]
fn read_chunks(reader: web_sys::ReadableStreamDefaultReader) -> impl Stream<Item = Result<Vec<u8>, StreamError>> {
    futures::stream::unfold(Some(reader), |reader| async move {
        let reader = reader?;
        match read_next(&reader).await {
            Ok(Some(bytes)) => Some((Ok(bytes), Some(reader))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// One `reader.read()`. `Ok(None)` once the body is exhausted.
#[cfg(feature = "hydrate")]
async fn read_next(reader: &web_sys::ReadableStreamDefaultReader) -> Result<Option<Vec<u8>>, StreamError> {
    use js_sys::{Reflect, Uint8Array};
    use wasm_bindgen::{JsCast, JsValue};

    let result = wasm_bindgen_futures::JsFuture::from(reader.read())
        .await
        .map_err(|e| StreamError::Read(format!("{e:?}")))?;

    let done = Reflect::get(&result, &JsValue::from_str("done"))
        .map_err(|e| StreamError::Read(format!("{e:?}")))?
        .as_bool()
        .unwrap_or(true);
    if done {
        return Ok(None);
    }

    let value = Reflect::get(&result, &JsValue::from_str("value")).map_err(|e| StreamError::Read(format!("{e:?}")))?;
    if value.is_undefined() {
        return Ok(Some(Vec::new()));
    }
    let array: Uint8Array = value
        .dyn_into()
        .map_err(|_| StreamError::Read("chunk is not a Uint8Array".to_owned()))?;
    Ok(Some(array.to_vec()))
}
