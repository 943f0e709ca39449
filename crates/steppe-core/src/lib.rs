//! Ports and shared data model for the Steppe page behaviors.
//!
//! Nothing in this crate touches a real browser. The host environment is
//! injected through the [`Page`], [`LayoutTree`], [`DecodingEngine`] and
//! [`TaskSpawner`] traits so the behaviors can run against an in-memory DOM
//! in tests and against `web-sys` in the browser.

pub mod bindings;
pub mod engine;
pub mod layout;
pub mod page;
pub mod platform;
pub mod settings;
pub mod status;

pub use bindings::{BindingError, BindingRole, ScannerBindings};
pub use engine::{
    CameraConstraints, DecodeCallback, DecodingEngine, EngineError, EngineFuture, MissCallback,
    QrBox, ScanParameters,
};
pub use layout::{LayoutTree, Overflow, ScrollMetrics};
pub use page::{Page, SyntheticEvent};
pub use platform::{LocalTask, TaskSpawner};
pub use settings::{AlertSettings, PageSettings, ScannerClasses};
pub use status::{StatusKind, StatusMessage};
