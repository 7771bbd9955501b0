//! Widget configuration.
//!
//! Every element the widget attaches to is located through a list of
//! candidate selectors tried in order, so one bundle serves both markup
//! namespaces (`#chat-*` and `#ai-chatbot-*`). Host pages may override any
//! field by embedding a JSON object in
//! `<script type="application/json" id="chat-widget-config">`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Deserializer};

/// Element id of the optional inline JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "chat-widget-config";

/// Errors raised while reading host-provided configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid widget config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Candidate selectors for every element the widget touches.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub toggle: Vec<String>,
    pub panel: Vec<String>,
    pub close: Vec<String>,
    pub form: Vec<String>,
    pub input: Vec<String>,
    pub body: Vec<String>,
    pub summarize_form: Vec<String>,
    pub semester_select: Vec<String>,
    /// Cards carrying a `data-url` attribute to navigate to on click.
    pub semester_card: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            toggle: candidates(&["#chat-toggle-btn", "#ai-chatbot-button"]),
            panel: candidates(&["#chat-panel", "#ai-chatbot-box"]),
            close: candidates(&["#chat-close", "#ai-chatbot-close"]),
            form: candidates(&["#chat-form", "#ai-chat-form"]),
            input: candidates(&["#chat-input", "#ai-query"]),
            body: candidates(&["#chat-body", "#ai-chatbot-messages"]),
            summarize_form: candidates(&["#ai-summarize-form"]),
            semester_select: candidates(&["#ai-summary-semester"]),
            semester_card: ".semester-card".to_owned(),
        }
    }
}

/// A POST endpoint and the single form field it reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub field: String,
}

impl Endpoint {
    fn new(path: &str, field: &str) -> Self {
        Self { path: path.to_owned(), field: field.to_owned() }
    }

    fn search() -> Self {
        Self::new("/ai/search", "query")
    }

    fn summarize() -> Self {
        Self::new("/ai/summarize", "semester")
    }
}

/// JSON shape of an endpoint override; omitted keys keep the default.
#[derive(Deserialize)]
struct EndpointOverride {
    path: Option<String>,
    field: Option<String>,
}

impl EndpointOverride {
    fn apply(self, base: Endpoint) -> Endpoint {
        Endpoint {
            path: self.path.unwrap_or(base.path),
            field: self.field.unwrap_or(base.field),
        }
    }
}

fn search_endpoint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Endpoint, D::Error> {
    Ok(EndpointOverride::deserialize(deserializer)?.apply(Endpoint::search()))
}

fn summarize_endpoint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Endpoint, D::Error> {
    Ok(EndpointOverride::deserialize(deserializer)?.apply(Endpoint::summarize()))
}

/// Full widget configuration. Omitted JSON fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub selectors: Selectors,
    #[serde(deserialize_with = "search_endpoint")]
    pub search: Endpoint,
    #[serde(deserialize_with = "summarize_endpoint")]
    pub summarize: Endpoint,
    /// Delay between revealed tokens in the typing effect.
    pub typing_delay_ms: u32,
    /// Text shown in place of a bot reply when a request fails.
    pub error_text: String,
    /// Class toggled on the panel to show it.
    pub open_class: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            search: Endpoint::search(),
            summarize: Endpoint::summarize(),
            typing_delay_ms: 20,
            error_text: "Sorry, I encountered an error. Please try again.".to_owned(),
            open_class: "open".to_owned(),
        }
    }
}

impl WidgetConfig {
    /// Parse a (possibly partial) JSON override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse the inline config block, falling back to defaults when it is
    /// absent, blank or malformed.
    pub fn from_inline(text: Option<&str>) -> Self {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}

fn candidates(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| (*s).to_owned()).collect()
}
