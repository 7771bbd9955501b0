//! Streaming HTTP client for the AI endpoints.
//!
//! `decode` and the chunk driver in `stream` are plain Rust and tested
//! natively; the `fetch` glue compiles only with the `hydrate` feature.

pub mod decode;
pub mod stream;
