//! Window-level wheel and touch listeners feeding the scroll guard.

use crate::layout::WebLayout;
use crate::platform::{listen, target_element, InstallError, WebPlatform};
use std::cell::RefCell;
use std::rc::Rc;
use steppe_core::PageSettings;
use steppe_foundation::{ScrollGuard, TouchSample, WheelGesture};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, TouchEvent, WheelEvent};

/// Registers the guard on the window. Wheel and touchmove listeners are
/// non-passive so they may cancel the default scroll.
pub fn install(platform: &WebPlatform, settings: &PageSettings) -> Result<(), InstallError> {
    let guard = Rc::new(RefCell::new(ScrollGuard::from_settings(
        WebLayout::new(platform)?,
        settings,
    )));
    let window: &EventTarget = platform.window().as_ref();

    let wheel_guard = Rc::clone(&guard);
    listen(window, "wheel", false, move |event: Event| {
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        let gesture = WheelGesture {
            delta_y: wheel.delta_y(),
            zoom_modifier: wheel.ctrl_key(),
            target: target_element(&event),
        };
        if wheel_guard.borrow().on_wheel(&gesture).should_suppress() {
            event.prevent_default();
        }
    })?;

    let start_guard = Rc::clone(&guard);
    listen(window, "touchstart", true, move |event: Event| {
        if let Some(touch) = event.dyn_ref::<TouchEvent>() {
            start_guard.borrow_mut().on_touch_start(touch_sample(touch));
        }
    })?;

    let move_guard = Rc::clone(&guard);
    listen(window, "touchmove", false, move |event: Event| {
        let Some(touch) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        let target = target_element(&event);
        let verdict = move_guard
            .borrow_mut()
            .on_touch_move(touch_sample(touch), target.as_ref());
        if verdict.should_suppress() {
            event.prevent_default();
        }
    })?;

    for name in ["touchend", "touchcancel"] {
        let end_guard = Rc::clone(&guard);
        listen(window, name, true, move |_| end_guard.borrow_mut().on_touch_end())?;
    }

    log::debug!("overscroll guard installed");
    Ok(())
}

fn touch_sample(event: &TouchEvent) -> TouchSample {
    let touches = event.touches();
    let client_y = touches
        .get(0)
        .map(|touch| f64::from(touch.client_y()))
        .unwrap_or_default();
    TouchSample {
        touches: touches.length() as usize,
        client_y,
    }
}
