//! `LayoutTree` backed by computed styles and live scroll offsets.

use crate::platform::{js_error_message, InstallError, WebPlatform};
use steppe_core::{LayoutTree, Overflow, ScrollMetrics};
use wasm_bindgen::JsValue;
use web_sys::{Element, Window};

pub struct WebLayout {
    window: Window,
    root: Element,
}

impl WebLayout {
    pub fn new(platform: &WebPlatform) -> Result<Self, InstallError> {
        Ok(Self {
            window: platform.window().clone(),
            root: platform.scrolling_root()?,
        })
    }
}

impl LayoutTree for WebLayout {
    type Node = Element;

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn overflow_y(&self, node: &Element) -> Overflow {
        match self.window.get_computed_style(node) {
            Ok(Some(style)) => style
                .get_property_value("overflow-y")
                .map(|value| Overflow::parse(&value))
                .unwrap_or_default(),
            Ok(None) => Overflow::default(),
            Err(err) => {
                log::trace!("computed style unavailable: {}", js_error_message(&err));
                Overflow::default()
            }
        }
    }

    fn scroll_metrics(&self, node: &Element) -> ScrollMetrics {
        // `scrollTop` is fractional on zoomed or high-DPI pages.
        let scroll_top = js_sys::Reflect::get(node, &JsValue::from_str("scrollTop"))
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or_default();
        ScrollMetrics::new(
            scroll_top,
            f64::from(node.scroll_height()),
            f64::from(node.client_height()),
        )
    }

    fn scrolling_root(&self) -> Element {
        self.root.clone()
    }
}
