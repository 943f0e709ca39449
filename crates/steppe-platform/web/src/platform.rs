//! Window/document access shared by the adapters.

use std::fmt;
use steppe_core::{LocalTask, TaskSpawner};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, Window};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    NoWindow,
    NoDocument,
    NoScrollingRoot,
    Listener { event: String, reason: String },
    Query { selector: String, reason: String },
    Timer { reason: String },
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallError::NoWindow => write!(f, "no global window exists"),
            InstallError::NoDocument => write!(f, "window has no document"),
            InstallError::NoScrollingRoot => write!(f, "document has no scrolling element"),
            InstallError::Listener { event, reason } => {
                write!(f, "failed to listen for '{event}': {reason}")
            }
            InstallError::Query { selector, reason } => {
                write!(f, "failed to query '{selector}': {reason}")
            }
            InstallError::Timer { reason } => write!(f, "failed to schedule timer: {reason}"),
        }
    }
}

impl std::error::Error for InstallError {}

pub struct WebPlatform {
    window: Window,
    document: Document,
}

impl WebPlatform {
    pub fn new() -> Result<Self, InstallError> {
        let window = web_sys::window().ok_or(InstallError::NoWindow)?;
        let document = window.document().ok_or(InstallError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// `document.scrollingElement`, falling back to the document element.
    pub fn scrolling_root(&self) -> Result<Element, InstallError> {
        self.document
            .scrolling_element()
            .or_else(|| self.document.document_element())
            .ok_or(InstallError::NoScrollingRoot)
    }

    pub fn is_loading(&self) -> bool {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "loading")
    }
}

/// Runs controller continuations on the browser's microtask queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebSpawner;

impl TaskSpawner for WebSpawner {
    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Event target as an element; `None` for window, document or text targets.
pub fn target_element(event: &Event) -> Option<Element> {
    event.target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// Attaches a listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), InstallError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|err| InstallError::Listener {
            event: event.to_string(),
            reason: js_error_message(&err),
        })?;
    closure.forget();
    Ok(())
}

/// Message of a thrown value: `error.message` when present, the value
/// itself otherwise.
pub fn js_error_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .filter(|message| !message.is_empty())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}
