//! Camera session state machine.
//!
//! Every engine call is issued synchronously from the triggering handler;
//! only the continuation that waits for the engine is spawned. Session state
//! lives in a `RefCell` whose borrows never cross an `.await`.

use crate::messages;
use crate::state::ScannerState;
use crate::view::{normalize_code, ScannerElements, ScannerView};
use std::cell::RefCell;
use std::rc::Rc;
use steppe_core::{
    BindingError, BindingRole, CameraConstraints, DecodeCallback, DecodingEngine, EngineError,
    MissCallback, Page, PageSettings, ScanParameters, ScannerBindings, TaskSpawner,
};

/// Outcome of mounting the scanner on a page.
pub enum ScannerMount<P, G>
where
    P: Page + 'static,
    G: DecodingEngine + 'static,
    G::File: 'static,
{
    Ready(ScannerController<P, G>),
    /// The engine is not available; the start control is disabled and the
    /// operator types codes by hand.
    ManualEntry,
}

impl<P, G> ScannerMount<P, G>
where
    P: Page + 'static,
    G: DecodingEngine + 'static,
    G::File: 'static,
{
    pub fn controller(self) -> Option<ScannerController<P, G>> {
        match self {
            ScannerMount::Ready(controller) => Some(controller),
            ScannerMount::ManualEntry => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StopReason {
    /// Stop control activated
    User,
    /// A code was read from the camera
    Decoded,
    /// The camera reported a frame whose payload was blank
    BlankDecode,
    /// An image was picked while the camera was live
    FileSelected,
}

struct Session<F> {
    state: ScannerState,
    /// Stop activated while the camera was still starting
    cancel_requested: bool,
    /// Image waiting for the camera to settle or for the running image
    /// decode to finish
    queued_file: Option<F>,
    /// An image decode is in flight; start stays disabled until it settles
    decoding_file: bool,
}

struct Inner<P, G>
where
    P: Page,
    G: DecodingEngine,
{
    view: ScannerView<P>,
    engine: G,
    spawner: Rc<dyn TaskSpawner>,
    camera: CameraConstraints,
    scan: ScanParameters,
    session: RefCell<Session<G::File>>,
}

/// Per-page scanner instance. Clones share the same session.
pub struct ScannerController<P, G>
where
    P: Page + 'static,
    G: DecodingEngine + 'static,
    G::File: 'static,
{
    inner: Rc<Inner<P, G>>,
}

impl<P, G> Clone for ScannerController<P, G>
where
    P: Page + 'static,
    G: DecodingEngine + 'static,
    G::File: 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P, G> ScannerController<P, G>
where
    P: Page + 'static,
    G: DecodingEngine + 'static,
    G::File: 'static,
{
    /// Resolves the bindings and attaches to the engine.
    ///
    /// `probe` receives the viewport id and returns the engine, or `None`
    /// when the decoding library is not loaded on the page. A missing
    /// element aborts before anything on the page is changed.
    pub fn mount<S>(
        page: P,
        bindings: &ScannerBindings,
        settings: &PageSettings,
        spawner: S,
        probe: impl FnOnce(&str) -> Option<G>,
    ) -> Result<ScannerMount<P, G>, BindingError>
    where
        S: TaskSpawner + 'static,
    {
        let elements = ScannerElements::resolve(&page, bindings, &settings.classes.shell_selector)?;
        let view = ScannerView::new(page, elements, settings.classes.clone());

        let Some(engine) = probe(bindings.id(BindingRole::Viewport)) else {
            log::warn!("decoding engine not available, scanner falls back to manual entry");
            view.set_status(&messages::engine_unavailable());
            view.set_start_enabled(false);
            return Ok(ScannerMount::ManualEntry);
        };

        let inner = Rc::new(Inner {
            view,
            engine,
            spawner: Rc::new(spawner),
            camera: settings.camera.clone(),
            scan: settings.scan,
            session: RefCell::new(Session {
                state: ScannerState::Idle,
                cancel_requested: false,
                queued_file: None,
                decoding_file: false,
            }),
        });
        inner.view.show_idle();
        log::debug!("scanner mounted on #{}", bindings.id(BindingRole::Viewport));
        Ok(ScannerMount::Ready(Self { inner }))
    }

    pub fn state(&self) -> ScannerState {
        self.inner.state()
    }

    pub fn view(&self) -> &ScannerView<P> {
        &self.inner.view
    }

    /// Start control activated. Ignored unless idle.
    pub fn start(&self) {
        self.inner.start();
    }

    /// Stop control activated. A no-op apart from re-asserting the idle UI
    /// when no session is running.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Image picker changed. `None` means the selection was emptied.
    pub fn select_file(&self, file: Option<G::File>) {
        if let Some(file) = file {
            self.inner.select_file(file);
        }
    }
}

impl<P, G> Inner<P, G>
where
    P: Page + 'static,
    G: DecodingEngine + 'static,
    G::File: 'static,
{
    fn state(&self) -> ScannerState {
        self.session.borrow().state
    }

    fn set_state(&self, state: ScannerState) {
        self.session.borrow_mut().state = state;
    }

    /// Idle UI, with start held disabled while an image is being decoded.
    fn show_idle(&self) {
        self.view.show_idle();
        if self.session.borrow().decoding_file {
            self.view.set_start_enabled(false);
        }
    }

    fn start(self: &Rc<Self>) {
        {
            let mut session = self.session.borrow_mut();
            if session.state != ScannerState::Idle {
                log::debug!("start ignored while {}", session.state);
                return;
            }
            if session.decoding_file {
                log::debug!("start ignored while an image is decoding");
                return;
            }
            session.state = ScannerState::Requesting;
            session.cancel_requested = false;
        }
        self.view.set_status(&messages::requesting_camera());
        self.view.show_scanning();

        let weak = Rc::downgrade(self);
        let on_decode: DecodeCallback = Box::new(move |raw| {
            if let Some(inner) = weak.upgrade() {
                inner.on_decoded(raw);
            }
        });
        // Fires for every frame without a code.
        let on_miss: MissCallback = Box::new(|_| {});

        let started = self
            .engine
            .start(&self.camera, &self.scan, on_decode, on_miss);
        let inner = Rc::clone(self);
        self.spawner.spawn_local(Box::pin(async move {
            match started.await {
                Ok(()) => inner.session_started(),
                Err(err) => inner.start_failed(err),
            }
        }));
    }

    fn session_started(self: &Rc<Self>) {
        let follow_up = {
            let mut session = self.session.borrow_mut();
            session.state = ScannerState::Scanning;
            if session.queued_file.is_some() {
                Some(StopReason::FileSelected)
            } else if session.cancel_requested {
                Some(StopReason::User)
            } else {
                None
            }
        };
        match follow_up {
            None => self.view.set_status(&messages::point_camera()),
            Some(reason) => {
                log::debug!("camera started after {reason:?}, stopping it");
                self.begin_stop(reason);
            }
        }
    }

    fn start_failed(self: &Rc<Self>, err: EngineError) {
        log::warn!("camera start failed: {err}");
        {
            let mut session = self.session.borrow_mut();
            session.state = ScannerState::Idle;
            session.cancel_requested = false;
        }
        self.show_idle();
        self.view.set_status(&messages::camera_failed(err.message()));
        self.decode_queued_file();
    }

    fn on_decoded(self: &Rc<Self>, raw: String) {
        let state = self.state();
        if state != ScannerState::Scanning {
            log::trace!("decoded frame ignored while {state}");
            return;
        }
        let reason = if self.apply_code(&raw) {
            StopReason::Decoded
        } else {
            StopReason::BlankDecode
        };
        self.begin_stop(reason);
    }

    fn stop(self: &Rc<Self>) {
        let state = self.state();
        match state {
            ScannerState::Idle => self.show_idle(),
            ScannerState::Requesting => {
                log::debug!("stop requested while the camera is starting");
                self.session.borrow_mut().cancel_requested = true;
            }
            ScannerState::Scanning => self.begin_stop(StopReason::User),
            ScannerState::Stopping => log::debug!("stop already in flight"),
        }
    }

    fn select_file(self: &Rc<Self>, file: G::File) {
        self.view.set_status(&messages::decoding_image());
        let state = self.state();
        match state {
            ScannerState::Idle if self.session.borrow().decoding_file => {
                let replaced = self.session.borrow_mut().queued_file.replace(file).is_some();
                log::debug!("image queued behind running decode (replaced previous: {replaced})");
            }
            ScannerState::Idle => self.decode_file(file),
            ScannerState::Scanning => {
                self.session.borrow_mut().queued_file = Some(file);
                self.begin_stop(StopReason::FileSelected);
            }
            ScannerState::Requesting | ScannerState::Stopping => {
                let replaced = self.session.borrow_mut().queued_file.replace(file).is_some();
                log::debug!("image queued while {state} (replaced previous: {replaced})");
            }
        }
    }

    /// Scanning -> Stopping. The session always ends in Idle, even when the
    /// engine fails to stop.
    fn begin_stop(self: &Rc<Self>, reason: StopReason) {
        {
            let mut session = self.session.borrow_mut();
            session.state = ScannerState::Stopping;
            session.cancel_requested = false;
        }
        let stopped = self.engine.stop();
        let inner = Rc::clone(self);
        self.spawner.spawn_local(Box::pin(async move {
            let result = stopped.await;
            inner.session_stopped(reason, result);
        }));
    }

    fn session_stopped(self: &Rc<Self>, reason: StopReason, result: Result<(), EngineError>) {
        self.set_state(ScannerState::Idle);
        self.show_idle();
        match result {
            Ok(()) if matches!(reason, StopReason::User | StopReason::BlankDecode) => {
                self.view.set_status(&messages::camera_stopped());
            }
            Ok(()) => {}
            Err(err) => log::warn!("camera stop failed, forcing idle: {err}"),
        }
        self.decode_queued_file();
    }

    fn decode_queued_file(self: &Rc<Self>) {
        let queued = self.session.borrow_mut().queued_file.take();
        if let Some(file) = queued {
            self.decode_file(file);
        }
    }

    fn decode_file(self: &Rc<Self>, file: G::File) {
        self.session.borrow_mut().decoding_file = true;
        self.view.set_start_enabled(false);
        let decoded = self.engine.scan_file(file, true);
        let inner = Rc::clone(self);
        self.spawner.spawn_local(Box::pin(async move {
            match decoded.await {
                Ok(raw) => {
                    if !inner.apply_code(&raw) {
                        inner
                            .view
                            .set_status(&messages::image_not_decoded(messages::EMPTY_RESULT));
                    }
                }
                Err(err) => {
                    log::debug!("image decode failed: {err}");
                    inner
                        .view
                        .set_status(&messages::image_not_decoded(err.message()));
                }
            }
            inner.view.clear_file_selection();
            inner.session.borrow_mut().decoding_file = false;
            inner.view.set_start_enabled(true);
            inner.decode_queued_file();
        }));
    }

    /// Writes a non-empty code into the field. Returns whether anything was
    /// applied.
    fn apply_code(&self, raw: &str) -> bool {
        let code = normalize_code(raw);
        if code.is_empty() {
            return false;
        }
        self.view.apply_value(code);
        self.view.set_status(&messages::code_found(code));
        true
    }
}
