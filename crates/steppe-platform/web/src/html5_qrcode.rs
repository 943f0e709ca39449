//! Binding to the page-global `Html5Qrcode` decoder.

use crate::platform::js_error_message;
use js_sys::{Function, Object, Promise, Reflect};
use std::cell::RefCell;
use steppe_core::{
    CameraConstraints, DecodeCallback, DecodingEngine, EngineError, EngineFuture, MissCallback,
    ScanParameters,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

const GLOBAL_NAME: &str = "Html5Qrcode";

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    type Html5Qrcode;

    #[wasm_bindgen(constructor, catch)]
    fn new(element_id: &str) -> Result<Html5Qrcode, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn start(
        this: &Html5Qrcode,
        camera: &JsValue,
        config: &JsValue,
        on_success: &Function,
        on_failure: &Function,
    ) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn stop(this: &Html5Qrcode) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = scanFile)]
    fn scan_file(this: &Html5Qrcode, file: &File, show_image: bool) -> Result<Promise, JsValue>;
}

/// Callbacks handed to the running camera session. Kept alive until the
/// next session replaces them, since `stop` can be called from inside one.
struct SessionCallbacks {
    _on_success: Closure<dyn FnMut(String)>,
    _on_failure: Closure<dyn FnMut(JsValue)>,
}

pub struct Html5QrcodeEngine {
    scanner: Html5Qrcode,
    callbacks: RefCell<Option<SessionCallbacks>>,
}

impl Html5QrcodeEngine {
    /// Attaches to `viewport_id`, or `None` when the library is not loaded.
    pub fn probe(viewport_id: &str) -> Option<Self> {
        let loaded = Reflect::has(&js_sys::global(), &JsValue::from_str(GLOBAL_NAME))
            .unwrap_or(false);
        if !loaded {
            return None;
        }
        match Html5Qrcode::new(viewport_id) {
            Ok(scanner) => Some(Self {
                scanner,
                callbacks: RefCell::new(None),
            }),
            Err(err) => {
                log::warn!("{GLOBAL_NAME} rejected #{viewport_id}: {}", js_error_message(&err));
                None
            }
        }
    }
}

impl DecodingEngine for Html5QrcodeEngine {
    type File = File;

    fn start(
        &self,
        camera: &CameraConstraints,
        params: &ScanParameters,
        mut on_decode: DecodeCallback,
        mut on_miss: MissCallback,
    ) -> EngineFuture<()> {
        let on_success = Closure::wrap(Box::new(move |text: String| on_decode(text))
            as Box<dyn FnMut(String)>);
        let on_failure = Closure::wrap(Box::new(move |err: JsValue| {
            on_miss(js_error_message(&err))
        }) as Box<dyn FnMut(JsValue)>);

        let call = self.scanner.start(
            &camera_options(camera),
            &scan_config(params),
            on_success.as_ref().unchecked_ref(),
            on_failure.as_ref().unchecked_ref(),
        );
        *self.callbacks.borrow_mut() = Some(SessionCallbacks {
            _on_success: on_success,
            _on_failure: on_failure,
        });

        let settled = settle(call);
        Box::pin(async move { settled.await.map(|_| ()) })
    }

    fn stop(&self) -> EngineFuture<()> {
        let settled = settle(self.scanner.stop());
        Box::pin(async move { settled.await.map(|_| ()) })
    }

    fn scan_file(&self, file: File, verbose: bool) -> EngineFuture<String> {
        let settled = settle(self.scanner.scan_file(&file, verbose));
        Box::pin(async move {
            settled
                .await?
                .as_string()
                .ok_or_else(|| EngineError::new("decoded value is not text"))
        })
    }
}

fn settle(call: Result<Promise, JsValue>) -> EngineFuture<JsValue> {
    Box::pin(async move {
        let promise = call.map_err(|err| EngineError::new(js_error_message(&err)))?;
        JsFuture::from(promise)
            .await
            .map_err(|err| EngineError::new(js_error_message(&err)))
    })
}

fn set(target: &Object, key: &str, value: &JsValue) {
    if let Err(err) = Reflect::set(target, &JsValue::from_str(key), value) {
        log::warn!("cannot set '{key}': {}", js_error_message(&err));
    }
}

fn camera_options(camera: &CameraConstraints) -> JsValue {
    let options = Object::new();
    set(&options, "facingMode", &JsValue::from_str(&camera.facing_mode));
    options.into()
}

fn scan_config(params: &ScanParameters) -> JsValue {
    let qrbox = Object::new();
    set(&qrbox, "width", &JsValue::from(params.qrbox.width));
    set(&qrbox, "height", &JsValue::from(params.qrbox.height));

    let config = Object::new();
    set(&config, "fps", &JsValue::from(params.fps));
    set(&config, "qrbox", &qrbox);
    config.into()
}
