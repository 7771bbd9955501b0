//! # chat-widget
//!
//! WASM chat widget for the course dashboard. Attaches to server-rendered
//! markup, toggles the chat panel, posts questions and semester summaries
//! to the `coursechat` server and renders the streamed replies.
//!
//! Browser glue (`dom`, the `fetch` client, the `start`/`say` exports)
//! compiles only with the `hydrate` feature. Everything else is plain Rust
//! and tested natively.
//!
//! Load the bundle at the end of `<body>` (or as a module script) so the
//! markup exists when `start` runs.

pub mod config;
pub mod controller;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod navigation;
pub mod net;
pub mod selectors;
pub mod state;
pub mod typing;

/// Module entry point: install logging and mount the widget.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    dom::mount();
}

/// Push a bot message into the chat from host-page script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn say(text: String) {
    dom::say(text);
}
