//! Browser entry points for the Steppe page behaviors.
//!
//! The module's start hook sets up logging. The host page then calls
//! [`install_page_behaviors`] once per page and [`init_qr_scanner`] for each
//! scanner widget it renders.

mod alerts;
mod html5_qrcode;
mod layout;
mod overscroll;
mod page;
mod platform;
mod scanner;

pub use html5_qrcode::Html5QrcodeEngine;
pub use layout::WebLayout;
pub use page::WebPage;
pub use platform::{InstallError, WebPlatform, WebSpawner};
pub use scanner::QrScanner;

use std::cell::Cell;
use std::rc::Rc;
use steppe_core::PageSettings;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }
}

/// Installs overscroll containment and alert auto-dismissal. Runs right
/// away once the document is parsed, otherwise on `DOMContentLoaded`.
/// Failures are logged and never thrown to the page.
#[wasm_bindgen]
pub fn install_page_behaviors() {
    let platform = match WebPlatform::new() {
        Ok(platform) => platform,
        Err(err) => {
            log::error!("page behaviors not installed: {err}");
            return;
        }
    };
    if !platform.is_loading() {
        install(&platform);
        return;
    }

    let pending = Rc::new(Cell::new(true));
    let target = platform.document().clone();
    let deferred = platform::listen(target.as_ref(), "DOMContentLoaded", true, move |_| {
        if pending.replace(false) {
            match WebPlatform::new() {
                Ok(platform) => install(&platform),
                Err(err) => log::error!("page behaviors not installed: {err}"),
            }
        }
    });
    if let Err(err) = deferred {
        log::error!("page behaviors not installed: {err}");
    }
}

fn install(platform: &WebPlatform) {
    let settings = PageSettings::default();
    if let Err(err) = overscroll::install(platform, &settings) {
        log::error!("overscroll guard not installed: {err}");
    }
    match alerts::schedule_dismissal(platform, &settings.alerts) {
        Ok(count) => log::debug!("{count} alert(s) scheduled for dismissal"),
        Err(err) => log::warn!("alert dismissal not scheduled: {err}"),
    }
}

/// Mounts a scanner on the elements named in `options`
/// (`inputId`, `readerId`, `startButtonId`, `stopButtonId`, `imageInputId`,
/// `statusId`). Returns `undefined` when the markup is incomplete or the
/// decoding library is not loaded.
#[wasm_bindgen]
pub fn init_qr_scanner(options: JsValue) -> Option<QrScanner> {
    let platform = match WebPlatform::new() {
        Ok(platform) => platform,
        Err(err) => {
            log::error!("scanner not mounted: {err}");
            return None;
        }
    };
    let bindings = scanner::bindings_from_options(&options);
    match scanner::mount(&platform, &bindings, &PageSettings::default()) {
        Ok(scanner) => scanner,
        Err(err) => {
            log::error!("scanner listeners not attached: {err}");
            None
        }
    }
}
