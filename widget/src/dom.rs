//! Browser bindings for the chat widget.
//!
//! Resolves the widget's elements, implements [`ChatView`] and
//! [`AiTransport`] over `web-sys`, and attaches the event listeners.
//! Listeners live for the page's lifetime, so their closures are leaked
//! with `Closure::forget`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlSelectElement};

use crate::config::{CONFIG_ELEMENT_ID, Selectors, WidgetConfig};
use crate::controller::{AiTransport, ChatController, ChatView};
use crate::navigation::navigation_target;
use crate::net::stream::{StreamError, stream_to_ai};
use crate::selectors::first_match;
use crate::state::chat::Role;
use crate::state::panel::PanelState;

pub type DomController = ChatController<DomView, FetchTransport>;

thread_local! {
    static MOUNTED: RefCell<Option<Rc<DomController>>> = const { RefCell::new(None) };
}

// =============================================================================
// MOUNT
// =============================================================================

/// Attach the widget to the current document. Does nothing when the page
/// has no toggle button.
pub fn mount() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let config = read_config(&document);
    let Some(elements) = Elements::resolve(&document, &config.selectors) else {
        log::debug!("chat toggle not found; widget inactive");
        return;
    };

    bind_semester_cards(&document, &config.selectors.semester_card);

    let panel = PanelState {
        open: elements
            .panel
            .as_ref()
            .is_some_and(|p| p.class_list().contains(&config.open_class)),
    };
    let view = DomView {
        document,
        panel: elements.panel.clone(),
        body: elements.body.clone(),
        input: elements.input.clone(),
        semester_select: elements.semester_select.clone(),
        forms: elements.form.iter().chain(&elements.summarize_form).cloned().collect(),
        open_class: config.open_class.clone(),
        indicator: RefCell::new(None),
    };
    let controller = Rc::new(ChatController::new(view, FetchTransport, config).with_panel(panel));

    bind(&elements, &controller);
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(controller));
    log::info!("chat widget mounted");
}

/// Type `text` into the chat as a bot message.
pub fn say(text: String) {
    let Some(controller) = MOUNTED.with(|mounted| mounted.borrow().clone()) else {
        log::warn!("say() called before the chat widget mounted");
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        controller.say(&text).await;
    });
}

fn read_config(document: &Document) -> WidgetConfig {
    let text = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    WidgetConfig::from_inline(text.as_deref())
}

// =============================================================================
// ELEMENTS
// =============================================================================

struct Elements {
    toggle: Element,
    panel: Option<Element>,
    close: Option<Element>,
    form: Option<Element>,
    input: Option<HtmlInputElement>,
    body: Option<Element>,
    summarize_form: Option<Element>,
    semester_select: Option<HtmlSelectElement>,
}

impl Elements {
    fn resolve(document: &Document, selectors: &Selectors) -> Option<Self> {
        let find = |candidates: &[String]| first_match(candidates, |s| document.query_selector(s).ok().flatten());

        Some(Self {
            toggle: find(&selectors.toggle)?,
            panel: find(&selectors.panel),
            close: find(&selectors.close),
            form: find(&selectors.form),
            input: find(&selectors.input).and_then(|el| el.dyn_into().ok()),
            body: find(&selectors.body),
            summarize_form: find(&selectors.summarize_form),
            semester_select: find(&selectors.semester_select).and_then(|el| el.dyn_into().ok()),
        })
    }
}

// =============================================================================
// EVENTS
// =============================================================================

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("failed to bind {event} listener: {e:?}");
    }
    closure.forget();
}

fn bind(elements: &Elements, controller: &Rc<DomController>) {
    let ctrl = Rc::clone(controller);
    listen(&elements.toggle, "click", move |_| ctrl.toggle_panel());

    if let (Some(close), Some(_)) = (&elements.close, &elements.panel) {
        let ctrl = Rc::clone(controller);
        listen(close, "click", move |_| ctrl.close_panel());
    }

    if let Some(form) = &elements.form {
        let ctrl = Rc::clone(controller);
        listen(form, "submit", move |event| {
            event.prevent_default();
            let ctrl = Rc::clone(&ctrl);
            wasm_bindgen_futures::spawn_local(async move {
                ctrl.submit_search().await;
            });
        });
    }

    if let Some(form) = &elements.summarize_form {
        let ctrl = Rc::clone(controller);
        listen(form, "submit", move |event| {
            event.prevent_default();
            let ctrl = Rc::clone(&ctrl);
            wasm_bindgen_futures::spawn_local(async move {
                ctrl.submit_summarize().await;
            });
        });
    }
}

fn bind_semester_cards(document: &Document, selector: &str) {
    let Ok(cards) = document.query_selector_all(selector) else {
        return;
    };
    for i in 0..cards.length() {
        let Some(card) = cards.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let target = card.clone();
        listen(&card, "click", move |event| {
            let inside_anchor = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a").ok().flatten())
                .is_some();
            let data_url = target.get_attribute("data-url");
            let Some(url) = navigation_target(inside_anchor, data_url.as_deref()) else {
                return;
            };
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(url) {
                    log::warn!("navigation to {url} failed: {e:?}");
                }
            }
        });
    }
}

// =============================================================================
// VIEW
// =============================================================================

pub struct DomView {
    document: Document,
    panel: Option<Element>,
    body: Option<Element>,
    input: Option<HtmlInputElement>,
    semester_select: Option<HtmlSelectElement>,
    forms: Vec<Element>,
    open_class: String,
    indicator: RefCell<Option<Element>>,
}

impl ChatView for DomView {
    type Node = Element;

    fn create_message(&self, role: Role) -> Option<Element> {
        let body = self.body.as_ref()?;
        let node = self.document.create_element("div").ok()?;
        node.set_class_name(role.class_name());
        body.append_child(&node).ok()?;
        Some(node)
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn push_text(&self, node: &Element, text: &str) {
        let mut current = node.text_content().unwrap_or_default();
        current.push_str(text);
        node.set_text_content(Some(&current));
    }

    fn show_typing_indicator(&self) {
        let Some(body) = &self.body else {
            return;
        };
        let Ok(indicator) = self.document.create_element("div") else {
            return;
        };
        indicator.set_class_name("typing-indicator");
        for _ in 0..3 {
            if let Ok(dot) = self.document.create_element("span") {
                let _ = indicator.append_child(&dot);
            }
        }
        self.remove_typing_indicator();
        if body.append_child(&indicator).is_ok() {
            *self.indicator.borrow_mut() = Some(indicator);
        }
    }

    fn remove_typing_indicator(&self) {
        if let Some(indicator) = self.indicator.borrow_mut().take() {
            indicator.remove();
        }
    }

    fn scroll_to_bottom(&self) {
        if let Some(body) = &self.body {
            body.set_scroll_top(body.scroll_height());
        }
    }

    fn set_busy(&self, busy: bool) {
        if let Some(input) = &self.input {
            input.set_disabled(busy);
        }
        if let Some(select) = &self.semester_select {
            select.set_disabled(busy);
        }
        for form in &self.forms {
            let _ = if busy {
                form.set_attribute("aria-busy", "true")
            } else {
                form.remove_attribute("aria-busy")
            };
        }
    }

    fn set_panel_open(&self, open: bool) {
        let Some(panel) = &self.panel else {
            return;
        };
        let classes = panel.class_list();
        let _ = if open {
            classes.add_1(&self.open_class)
        } else {
            classes.remove_1(&self.open_class)
        };
    }

    fn query_text(&self) -> String {
        self.input.as_ref().map(HtmlInputElement::value).unwrap_or_default()
    }

    fn clear_query_input(&self) {
        if let Some(input) = &self.input {
            input.set_value("");
        }
    }

    fn semester_value(&self) -> String {
        self.semester_select
            .as_ref()
            .map(HtmlSelectElement::value)
            .unwrap_or_default()
    }

    fn reset_semester_select(&self) {
        if let Some(select) = &self.semester_select {
            select.set_value("");
        }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// `fetch`-backed transport.
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl AiTransport for FetchTransport {
    async fn stream(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        on_chunk: &mut dyn FnMut(&str),
    ) -> Result<String, StreamError> {
        stream_to_ai(path, fields, on_chunk).await
    }
}
