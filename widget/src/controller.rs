//! Chat controller: the submit → stream → render cycle.
//!
//! DESIGN
//! ======
//! Both forms (free-text search and semester summary) run through one
//! controller so they share the in-flight guard, the typing indicator and
//! the failure fallback. The controller never touches the DOM directly. It
//! drives a [`ChatView`] and fetches through an [`AiTransport`], which lets
//! the whole exchange run natively against fakes.
//!
//! SYSTEM CONTEXT
//! ==============
//! `dom` implements both traits for the browser and wires event listeners
//! to [`ChatController::submit_search`], [`ChatController::submit_summarize`]
//! and the panel methods. Each submit runs as one local task; the in-flight
//! flag is the only coordination between them.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures are logged with their cause and rendered as the
//! configured fallback text in place of the bot reply. Nothing is retried.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};

use crate::config::{Endpoint, WidgetConfig};
use crate::net::stream::StreamError;
use crate::state::chat::{ChatState, Message, Role};
use crate::state::panel::PanelState;
use crate::typing::{pause, tokenize};

// =============================================================================
// SEAMS
// =============================================================================

/// Rendering surface for the chat panel.
///
/// Every method must tolerate missing elements; a page without a message
/// list simply renders nothing.
pub trait ChatView {
    /// Handle to one rendered message.
    type Node;

    /// Create a message node for `role` and append it to the message list.
    fn create_message(&self, role: Role) -> Option<Self::Node>;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn push_text(&self, node: &Self::Node, text: &str);
    fn show_typing_indicator(&self);
    fn remove_typing_indicator(&self);
    fn scroll_to_bottom(&self);
    /// Disable or re-enable both forms while an exchange runs.
    fn set_busy(&self, busy: bool);
    fn set_panel_open(&self, open: bool);
    fn query_text(&self) -> String;
    fn clear_query_input(&self);
    fn semester_value(&self) -> String;
    fn reset_semester_select(&self);
}

/// Streaming POST to an AI endpoint.
#[async_trait::async_trait(?Send)]
pub trait AiTransport {
    /// Send `fields` form-encoded to `path`, calling `on_chunk` for each
    /// decoded piece of the response, and return the full text.
    async fn stream(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        on_chunk: &mut dyn FnMut(&str),
    ) -> Result<String, StreamError>;
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct ChatController<V, T> {
    view: V,
    transport: T,
    config: WidgetConfig,
    state: RefCell<ChatState>,
    panel: Cell<PanelState>,
}

impl<V: ChatView, T: AiTransport> ChatController<V, T> {
    pub fn new(view: V, transport: T, config: WidgetConfig) -> Self {
        Self {
            view,
            transport,
            config,
            state: RefCell::new(ChatState::default()),
            panel: Cell::new(PanelState::default()),
        }
    }

    /// Start from the panel state already present in the markup.
    #[must_use]
    pub fn with_panel(self, panel: PanelState) -> Self {
        self.panel.set(panel);
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().in_flight()
    }

    pub fn panel(&self) -> PanelState {
        self.panel.get()
    }

    // -------------------------------------------------------------------------
    // Panel
    // -------------------------------------------------------------------------

    pub fn toggle_panel(&self) {
        let mut panel = self.panel.get();
        let open = panel.toggle();
        self.panel.set(panel);
        self.view.set_panel_open(open);
    }

    pub fn close_panel(&self) {
        let mut panel = self.panel.get();
        panel.close();
        self.panel.set(panel);
        self.view.set_panel_open(false);
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Render a user message immediately.
    pub fn append_user(&self, text: &str) -> Message {
        let id = self.state.borrow_mut().next_id();
        if let Some(node) = self.view.create_message(Role::User) {
            self.view.set_text(&node, text);
        }
        self.view.scroll_to_bottom();
        Message::user(id, text)
    }

    /// Render a bot message with the typing effect.
    ///
    /// Returns `None` when the page has no message list.
    pub async fn say(&self, text: &str) -> Option<Message> {
        let id = self.state.borrow_mut().next_id();
        let node = self.view.create_message(Role::Bot)?;
        let mut message = Message::pending_bot(id);

        for token in tokenize(text) {
            message.push_chunk(token);
            self.view.push_text(&node, token);
            self.view.scroll_to_bottom();
            pause(self.config.typing_delay_ms).await;
        }
        self.view.scroll_to_bottom();
        message.finish();
        Some(message)
    }

    // -------------------------------------------------------------------------
    // Submit paths
    // -------------------------------------------------------------------------

    /// Handle the free-text form. Returns the bot reply, or `None` when the
    /// submit was ignored (blank query or an exchange already in flight).
    pub async fn submit_search(&self) -> Option<Message> {
        let raw = self.view.query_text();
        let query = raw.trim();
        if query.is_empty() || !self.begin_exchange() {
            return None;
        }

        self.append_user(query);
        self.view.clear_query_input();
        let reply = self.exchange(&self.config.search, query).await;

        self.end_exchange();
        Some(reply)
    }

    /// Handle the semester summary form.
    pub async fn submit_summarize(&self) -> Option<Message> {
        let raw = self.view.semester_value();
        let semester = raw.trim();
        if semester.is_empty() || !self.begin_exchange() {
            return None;
        }

        self.append_user(&format!("Summarize semester {semester}"));
        let reply = self.exchange(&self.config.summarize, semester).await;
        self.view.reset_semester_select();

        self.end_exchange();
        Some(reply)
    }

    fn begin_exchange(&self) -> bool {
        let claimed = self.state.borrow_mut().begin_exchange();
        if claimed {
            self.view.set_busy(true);
        } else {
            log::debug!("exchange in flight; submit ignored");
        }
        claimed
    }

    fn end_exchange(&self) {
        self.state.borrow_mut().end_exchange();
        self.view.set_busy(false);
    }

    /// Stream one reply. The bot node appears with the first chunk, or once
    /// the request settles if no chunk ever arrived.
    async fn exchange(&self, endpoint: &Endpoint, value: &str) -> Message {
        let mut reply = Message::pending_bot(self.state.borrow_mut().next_id());
        let mut node: Option<V::Node> = None;
        let mut revealed = false;

        self.view.show_typing_indicator();
        self.view.scroll_to_bottom();

        let view = &self.view;
        let mut on_chunk = |chunk: &str| {
            if !revealed {
                view.remove_typing_indicator();
                node = view.create_message(Role::Bot);
                revealed = true;
            }
            reply.push_chunk(chunk);
            if let Some(node) = &node {
                view.push_text(node, chunk);
            }
            view.scroll_to_bottom();
        };
        let fields = [(endpoint.field.as_str(), value)];
        let result = self.transport.stream(&endpoint.path, &fields, &mut on_chunk).await;

        if !revealed {
            self.view.remove_typing_indicator();
            node = self.view.create_message(Role::Bot);
        }
        match result {
            Ok(text) => {
                log::debug!("{} streamed {} bytes", endpoint.path, text.len());
                reply.finish();
            }
            Err(e) => {
                log::warn!("{} failed: {e}", endpoint.path);
                reply.fail(&self.config.error_text);
                if let Some(node) = &node {
                    self.view.set_text(node, &reply.text);
                }
            }
        }
        self.view.scroll_to_bottom();
        reply
    }
}
