//! Scriptable stand-in for the decoding engine.
//!
//! Camera starts and file scans stay pending until the test completes them.
//! Stops complete according to [`StopMode`].

use crate::deferred::{deferred, Deferred};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use steppe_core::{
    CameraConstraints, DecodeCallback, DecodingEngine, EngineError, EngineFuture, MissCallback,
    ScanParameters,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopMode {
    /// Stop resolves immediately.
    Succeed,
    /// Stop rejects immediately with this message.
    Fail(String),
    /// Stop stays pending until `resolve_stop` / `reject_stop`.
    Hold,
}

struct EngineState {
    starts: Vec<(CameraConstraints, ScanParameters)>,
    stops: usize,
    scans: Vec<(String, bool)>,
    session_open: bool,
    on_decode: Option<DecodeCallback>,
    on_miss: Option<MissCallback>,
    pending_start: Option<Deferred<Result<(), EngineError>>>,
    pending_stops: VecDeque<Deferred<Result<(), EngineError>>>,
    pending_scans: VecDeque<Deferred<Result<String, EngineError>>>,
    stop_mode: StopMode,
}

/// Files are identified by name.
#[derive(Clone)]
pub struct FakeEngine {
    state: Rc<RefCell<EngineState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(EngineState {
                starts: Vec::new(),
                stops: 0,
                scans: Vec::new(),
                session_open: false,
                on_decode: None,
                on_miss: None,
                pending_start: None,
                pending_stops: VecDeque::new(),
                pending_scans: VecDeque::new(),
                stop_mode: StopMode::Succeed,
            })),
        }
    }

    pub fn set_stop_mode(&self, mode: StopMode) {
        self.state.borrow_mut().stop_mode = mode;
    }

    pub fn start_calls(&self) -> usize {
        self.state.borrow().starts.len()
    }

    pub fn last_start(&self) -> Option<(CameraConstraints, ScanParameters)> {
        self.state.borrow().starts.last().cloned()
    }

    pub fn stop_calls(&self) -> usize {
        self.state.borrow().stops
    }

    /// `(file name, verbose)` for every `scan_file` call.
    pub fn scanned_files(&self) -> Vec<(String, bool)> {
        self.state.borrow().scans.clone()
    }

    pub fn has_pending_start(&self) -> bool {
        self.state.borrow().pending_start.is_some()
    }

    pub fn resolve_start(&self) {
        self.complete_start(Ok(()));
    }

    pub fn reject_start(&self, message: &str) {
        self.state.borrow_mut().session_open = false;
        self.complete_start(Err(EngineError::new(message)));
    }

    pub fn resolve_stop(&self) {
        self.complete_stop(Ok(()));
    }

    pub fn reject_stop(&self, message: &str) {
        self.complete_stop(Err(EngineError::new(message)));
    }

    pub fn resolve_scan(&self, text: &str) {
        self.complete_scan(Ok(text.to_string()));
    }

    pub fn reject_scan(&self, message: &str) {
        self.complete_scan(Err(EngineError::new(message)));
    }

    /// Delivers a decoded frame to the running session.
    pub fn emit_decode(&self, text: &str) {
        let callback = self.state.borrow_mut().on_decode.take();
        if let Some(mut callback) = callback {
            callback(text.to_string());
            let mut state = self.state.borrow_mut();
            if state.session_open && state.on_decode.is_none() {
                state.on_decode = Some(callback);
            }
        }
    }

    /// Delivers a frame without a readable code.
    pub fn emit_miss(&self, reason: &str) {
        let callback = self.state.borrow_mut().on_miss.take();
        if let Some(mut callback) = callback {
            callback(reason.to_string());
            let mut state = self.state.borrow_mut();
            if state.session_open && state.on_miss.is_none() {
                state.on_miss = Some(callback);
            }
        }
    }

    fn complete_start(&self, result: Result<(), EngineError>) {
        let pending = self.state.borrow_mut().pending_start.take();
        pending.expect("no camera start in flight").resolve(result);
    }

    fn complete_stop(&self, result: Result<(), EngineError>) {
        let pending = self.state.borrow_mut().pending_stops.pop_front();
        pending.expect("no camera stop in flight").resolve(result);
    }

    fn complete_scan(&self, result: Result<String, EngineError>) {
        let pending = self.state.borrow_mut().pending_scans.pop_front();
        pending.expect("no file scan in flight").resolve(result);
    }
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodingEngine for FakeEngine {
    type File = String;

    fn start(
        &self,
        camera: &CameraConstraints,
        params: &ScanParameters,
        on_decode: DecodeCallback,
        on_miss: MissCallback,
    ) -> EngineFuture<()> {
        let (resolver, future) = deferred();
        let mut state = self.state.borrow_mut();
        state.starts.push((camera.clone(), *params));
        state.session_open = true;
        state.on_decode = Some(on_decode);
        state.on_miss = Some(on_miss);
        state.pending_start = Some(resolver);
        Box::pin(future)
    }

    fn stop(&self) -> EngineFuture<()> {
        let mut state = self.state.borrow_mut();
        state.stops += 1;
        state.session_open = false;
        state.on_decode = None;
        state.on_miss = None;
        match state.stop_mode.clone() {
            StopMode::Succeed => Box::pin(std::future::ready(Ok(()))),
            StopMode::Fail(message) => Box::pin(std::future::ready(Err(EngineError::new(message)))),
            StopMode::Hold => {
                let (resolver, future) = deferred();
                state.pending_stops.push_back(resolver);
                Box::pin(future)
            }
        }
    }

    fn scan_file(&self, file: String, verbose: bool) -> EngineFuture<String> {
        let (resolver, future) = deferred();
        let mut state = self.state.borrow_mut();
        state.scans.push((file, verbose));
        state.pending_scans.push_back(resolver);
        Box::pin(future)
    }
}
