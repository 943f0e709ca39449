//! Scanner widget lifecycle.
//!
//! [`ScannerController`] owns the single camera session of a page, decodes
//! user-supplied images, and writes decoded codes into the bound form field
//! with status feedback. The decoding engine and the page are injected, so
//! the controller runs the same against the browser and the test harness.

mod controller;
pub mod messages;
mod state;
mod view;

pub use controller::{ScannerController, ScannerMount};
pub use state::ScannerState;
pub use view::{normalize_code, ScannerElements, ScannerView};
