//! Timed dismissal of server-rendered flash alerts.

use crate::platform::{js_error_message, InstallError, WebPlatform};
use steppe_core::AlertSettings;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Alert)]
    type BootstrapAlert;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap, js_class = "Alert")]
    fn new(element: &Element) -> Result<BootstrapAlert, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Alert")]
    fn close(this: &BootstrapAlert) -> Result<(), JsValue>;
}

/// Schedules a close for every alert present now. Returns how many were
/// scheduled.
pub fn schedule_dismissal(
    platform: &WebPlatform,
    settings: &AlertSettings,
) -> Result<u32, InstallError> {
    let alerts = platform
        .document()
        .query_selector_all(&settings.selector)
        .map_err(|err| InstallError::Query {
            selector: settings.selector.clone(),
            reason: js_error_message(&err),
        })?;
    let delay = i32::try_from(settings.dismiss_after_ms).unwrap_or(i32::MAX);

    let mut scheduled = 0;
    for index in 0..alerts.length() {
        let Some(alert) = alerts
            .get(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let callback = Closure::once_into_js(move || close_alert(&alert));
        platform
            .window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay,
            )
            .map_err(|err| InstallError::Timer {
                reason: js_error_message(&err),
            })?;
        scheduled += 1;
    }
    Ok(scheduled)
}

fn close_alert(element: &Element) {
    // The element may have been closed by hand already; bootstrap still
    // accepts it, and a missing bootstrap global lands here as an error.
    match BootstrapAlert::new(element).and_then(|alert| alert.close()) {
        Ok(()) => log::trace!("alert dismissed"),
        Err(err) => log::warn!("cannot dismiss alert: {}", js_error_message(&err)),
    }
}
