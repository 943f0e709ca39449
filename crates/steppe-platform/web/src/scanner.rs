//! Scanner widget wiring and its handle exported to the host page.

use crate::html5_qrcode::Html5QrcodeEngine;
use crate::page::WebPage;
use crate::platform::{listen, InstallError, WebPlatform, WebSpawner};
use steppe_core::{BindingRole, PageSettings, ScannerBindings};
use steppe_scanner::ScannerController;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

type WebScanner = ScannerController<WebPage, Html5QrcodeEngine>;

/// Live scanner attached to a page.
#[wasm_bindgen]
pub struct QrScanner {
    controller: WebScanner,
}

#[wasm_bindgen]
impl QrScanner {
    /// One of `idle`, `requesting`, `scanning` or `stopping`.
    pub fn state(&self) -> String {
        self.controller.state().name().to_string()
    }

    pub fn start(&self) {
        self.controller.start();
    }

    pub fn stop(&self) {
        self.controller.stop();
    }
}

/// Reads element ids from a plain options object. Missing or non-string
/// entries stay empty and fail resolution later.
pub fn bindings_from_options(options: &JsValue) -> ScannerBindings {
    let mut bindings = ScannerBindings::default();
    for role in BindingRole::ALL {
        let id = js_sys::Reflect::get(options, &JsValue::from_str(role.option_key()))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        bindings.set_id(role, id);
    }
    bindings
}

/// Mounts the controller and attaches the control listeners. `Ok(None)`
/// when the markup is incomplete or the engine is absent.
pub fn mount(
    platform: &WebPlatform,
    bindings: &ScannerBindings,
    settings: &PageSettings,
) -> Result<Option<QrScanner>, InstallError> {
    let page = WebPage::new(platform.document().clone());
    let mounted = match ScannerController::mount(
        page,
        bindings,
        settings,
        WebSpawner,
        Html5QrcodeEngine::probe,
    ) {
        Ok(mounted) => mounted,
        Err(err) => {
            log::debug!("scanner not mounted: {err}");
            return Ok(None);
        }
    };
    let Some(controller) = mounted.controller() else {
        return Ok(None);
    };

    let elements = controller.view().elements().clone();

    let on_start = controller.clone();
    listen(elements.start.as_ref(), "click", false, move |_| on_start.start())?;

    let on_stop = controller.clone();
    listen(elements.stop.as_ref(), "click", false, move |_| on_stop.stop())?;

    let on_pick = controller.clone();
    listen(elements.image_input.as_ref(), "change", false, move |event: Event| {
        let file = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        on_pick.select_file(file);
    })?;

    Ok(Some(QrScanner { controller }))
}
