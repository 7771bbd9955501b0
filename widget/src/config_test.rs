use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn defaults_cover_both_namespaces() {
    let config = WidgetConfig::default();
    assert_eq!(config.selectors.toggle, vec!["#chat-toggle-btn", "#ai-chatbot-button"]);
    assert_eq!(config.selectors.body, vec!["#chat-body", "#ai-chatbot-messages"]);
    assert_eq!(config.selectors.semester_card, ".semester-card");
}

#[test]
fn defaults_match_server_routes() {
    let config = WidgetConfig::default();
    assert_eq!(config.search, Endpoint::new("/ai/search", "query"));
    assert_eq!(config.summarize, Endpoint::new("/ai/summarize", "semester"));
    assert_eq!(config.typing_delay_ms, 20);
    assert_eq!(config.open_class, "open");
}

// =============================================================
// from_json
// =============================================================

#[test]
fn partial_json_keeps_other_defaults() {
    let config = WidgetConfig::from_json(r##"{"typing_delay_ms": 0, "selectors": {"toggle": ["#bot"]}}"##).unwrap();
    assert_eq!(config.typing_delay_ms, 0);
    assert_eq!(config.selectors.toggle, vec!["#bot"]);
    assert_eq!(config.selectors.panel, Selectors::default().panel);
    assert_eq!(config.error_text, WidgetConfig::default().error_text);
}

#[test]
fn endpoint_override_replaces_path_and_field() {
    let config = WidgetConfig::from_json(r#"{"search": {"path": "/api/ask", "field": "q"}}"#).unwrap();
    assert_eq!(config.search, Endpoint::new("/api/ask", "q"));
    assert_eq!(config.summarize.path, "/ai/summarize");
}

#[test]
fn endpoint_path_only_keeps_default_field() {
    let config = WidgetConfig::from_json(r#"{"search": {"path": "/api/ask"}}"#).unwrap();
    assert_eq!(config.search, Endpoint::new("/api/ask", "query"));
    assert_eq!(config.summarize, Endpoint::summarize());
}

#[test]
fn endpoint_field_only_keeps_default_path() {
    let config = WidgetConfig::from_json(r#"{"summarize": {"field": "term"}}"#).unwrap();
    assert_eq!(config.summarize, Endpoint::new("/ai/summarize", "term"));
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(WidgetConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
}

// =============================================================
// from_inline
// =============================================================

#[test]
fn inline_missing_or_blank_uses_defaults() {
    assert_eq!(WidgetConfig::from_inline(None), WidgetConfig::default());
    assert_eq!(WidgetConfig::from_inline(Some("  \n")), WidgetConfig::default());
}

#[test]
fn inline_malformed_falls_back_to_defaults() {
    assert_eq!(WidgetConfig::from_inline(Some("[1, 2")), WidgetConfig::default());
}

#[test]
fn inline_partial_endpoint_keeps_sibling_overrides() {
    let config = WidgetConfig::from_inline(Some(r#"{"search": {"path": "/api/ask"}, "open_class": "visible"}"#));
    assert_eq!(config.search.path, "/api/ask");
    assert_eq!(config.search.field, "query");
    assert_eq!(config.open_class, "visible");
}

#[test]
fn inline_valid_is_applied() {
    let config = WidgetConfig::from_inline(Some(r#"{"open_class": "visible"}"#));
    assert_eq!(config.open_class, "visible");
}
