//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the two streaming AI endpoints the chat widget posts to, a health
//! probe, and the static directory holding the compiled widget bundle
//! (`chat_widget.js` + `.wasm`) that host pages load.

pub mod ai;
pub mod auth;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the directory served under `/static`.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("widget/pkg"))
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/ai/search", post(ai::search))
        .route("/ai/summarize", post(ai::summarize))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
