use super::*;
use axum::extract::FromRequestParts;
use axum::http::Request;

use crate::state::test_helpers::test_app_state;

fn parts_with_cookie(cookie: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder().method("POST").uri("/ai/search");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn missing_cookie_is_unauthorized() {
    let state = test_app_state();
    let mut parts = parts_with_cookie(None);
    let result = AuthUser::from_request_parts(&mut parts, &state).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn empty_session_cookie_is_unauthorized() {
    let state = test_app_state();
    let mut parts = parts_with_cookie(Some("session_token="));
    let result = AuthUser::from_request_parts(&mut parts, &state).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn unrelated_cookie_is_unauthorized() {
    let state = test_app_state();
    let mut parts = parts_with_cookie(Some("theme=dark; other=1"));
    let result = AuthUser::from_request_parts(&mut parts, &state).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
}
