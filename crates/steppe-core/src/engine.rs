//! Contract of the external code-decoding engine.
//!
//! The engine owns camera access and the decoding algorithm. The scanner
//! only needs the asynchronous start/stop/scan_file shape below.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Future returned by engine operations. Runs on the UI thread only.
pub type EngineFuture<T> = Pin<Box<dyn Future<Output = Result<T, EngineError>>>>;

/// Invoked by the engine with the raw decoded text for every successful frame.
pub type DecodeCallback = Box<dyn FnMut(String)>;

/// Invoked by the engine for every frame without a readable code.
pub type MissCallback = Box<dyn FnMut(String)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing_mode: String,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            facing_mode: "environment".into(),
        }
    }
}

/// Scan region size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrBox {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanParameters {
    pub fps: u32,
    pub qrbox: QrBox,
}

impl Default for ScanParameters {
    fn default() -> Self {
        Self {
            fps: 10,
            qrbox: QrBox {
                width: 250,
                height: 250,
            },
        }
    }
}

pub trait DecodingEngine {
    /// Image handle accepted by [`DecodingEngine::scan_file`].
    type File;

    /// Opens a camera session. The callbacks stay registered until the
    /// session is stopped.
    fn start(
        &self,
        camera: &CameraConstraints,
        params: &ScanParameters,
        on_decode: DecodeCallback,
        on_miss: MissCallback,
    ) -> EngineFuture<()>;

    /// Closes the running camera session.
    fn stop(&self) -> EngineFuture<()>;

    /// Decodes a single still image.
    fn scan_file(&self, file: Self::File, verbose: bool) -> EngineFuture<String>;
}

/// Failure reported by the engine, reduced to its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EngineError {}
