//! `Page` over the live document.

use crate::platform::js_error_message;
use steppe_core::{Page, SyntheticEvent};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventInit, HtmlElement, HtmlInputElement};

#[derive(Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Page for WebPage {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        if id.is_empty() {
            return None;
        }
        self.document.get_element_by_id(id)
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        match element.closest(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector '{selector}': {}", js_error_message(&err));
                None
            }
        }
    }

    fn set_class(&self, element: &Element, class: &str, enabled: bool) {
        if let Err(err) = element.class_list().toggle_with_force(class, enabled) {
            log::warn!("cannot toggle class '{class}': {}", js_error_message(&err));
        }
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Err(err) = element.toggle_attribute_with_force("disabled", disabled) {
            log::warn!("cannot toggle disabled: {}", js_error_message(&err));
        }
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
            return;
        }
        // textarea, select and custom form controls
        if let Err(err) = js_sys::Reflect::set(
            element,
            &JsValue::from_str("value"),
            &JsValue::from_str(value),
        ) {
            log::warn!("cannot set value: {}", js_error_message(&err));
        }
    }

    fn dispatch(&self, element: &Element, event: SyntheticEvent) {
        let init = EventInit::new();
        init.set_bubbles(event.bubbles());
        let dispatched = Event::new_with_event_init_dict(event.event_type(), &init)
            .and_then(|synthetic| element.dispatch_event(&synthetic));
        if let Err(err) = dispatched {
            log::warn!(
                "cannot dispatch '{}': {}",
                event.event_type(),
                js_error_message(&err)
            );
        }
    }

    fn focus(&self, element: &Element) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.focus() {
            log::warn!("cannot focus element: {}", js_error_message(&err));
        }
    }
}
