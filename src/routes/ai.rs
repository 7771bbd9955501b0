//! Streaming AI routes used by the chat widget.
//!
//! Both endpoints accept `application/x-www-form-urlencoded` bodies and
//! answer with a chunked `text/plain` stream that the widget appends to the
//! bot message as it arrives.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::llm::LlmStream;
use crate::routes::auth::AuthUser;
use crate::services::ai::{TextBody, relay};
use crate::services::courses::{self, parse_semester};
use crate::services::prompt::{
    NO_COURSES_MESSAGE, SEARCH_MAX_TOKENS, SUMMARIZE_MAX_TOKENS, search_prompt, summarize_prompt,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub semester: String,
}

/// `POST /ai/search`: answer a free-form question using the user's courses.
pub async fn search(State(state): State<AppState>, auth: AuthUser, Form(form): Form<SearchForm>) -> Response {
    let query = form.query.trim();
    if query.is_empty() {
        return (StatusCode::BAD_REQUEST, "query required").into_response();
    }
    let llm = match require_llm(&state) {
        Ok(llm) => llm,
        Err(resp) => return resp,
    };

    let courses = match courses::list_courses(&state.pool, auth.user.id).await {
        Ok(courses) => courses,
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user.id, "course lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::info!(user_id = %auth.user.id, course_count = courses.len(), "ai search");
    let prompt = search_prompt(query, &courses);
    text_stream_response(relay(llm, &prompt, SEARCH_MAX_TOKENS, "search").await)
}

/// `POST /ai/summarize`: overview and study tips for one semester.
pub async fn summarize(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<SummarizeForm>,
) -> Response {
    let Some(semester) = parse_semester(&form.semester) else {
        return (StatusCode::BAD_REQUEST, "semester must be between 1 and 8").into_response();
    };

    let courses = match courses::list_semester_courses(&state.pool, auth.user.id, semester).await {
        Ok(courses) => courses,
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user.id, semester, "course lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    if courses.is_empty() {
        return plain_text_response(NO_COURSES_MESSAGE);
    }

    let llm = match require_llm(&state) {
        Ok(llm) => llm,
        Err(resp) => return resp,
    };

    tracing::info!(user_id = %auth.user.id, semester, course_count = courses.len(), "ai summarize");
    let prompt = summarize_prompt(semester, &courses);
    text_stream_response(relay(llm, &prompt, SUMMARIZE_MAX_TOKENS, "summarize").await)
}

fn require_llm(state: &AppState) -> Result<Arc<dyn LlmStream>, Response> {
    state
        .llm
        .clone()
        .ok_or_else(|| (StatusCode::SERVICE_UNAVAILABLE, "AI service not configured").into_response())
}

pub(crate) fn text_stream_response(body: TextBody) -> Response {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8"), (CACHE_CONTROL, "no-cache")],
        Body::from_stream(body),
    )
        .into_response()
}

fn plain_text_response(text: &'static str) -> Response {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
