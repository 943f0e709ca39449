use crate::engine::{CameraConstraints, ScanParameters};

/// CSS hooks the scanner toggles on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerClasses {
    /// Hides an element (viewport, start or stop control)
    pub hidden: String,
    /// Added to the viewfinder shell while the camera is live
    pub scanning: String,
    /// Status display class for a found code
    pub ok: String,
    /// Status display class for failures
    pub error: String,
    /// Selector of the optional frame around the camera viewport
    pub shell_selector: String,
}

impl Default for ScannerClasses {
    fn default() -> Self {
        Self {
            hidden: "d-none".into(),
            scanning: "is-scanning".into(),
            ok: "ok".into(),
            error: "error".into(),
            shell_selector: ".qr-viewfinder-shell".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertSettings {
    /// Alerts matching this selector at install time are closed automatically
    pub selector: String,
    pub dismiss_after_ms: u32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            selector: ".alert-dismissible".into(),
            dismiss_after_ms: 5_000,
        }
    }
}

/// Configuration for every behavior installed on a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSettings {
    /// Slack in CSS pixels absorbed when comparing scroll extents
    pub scroll_tolerance: f64,
    pub camera: CameraConstraints,
    pub scan: ScanParameters,
    pub classes: ScannerClasses,
    pub alerts: AlertSettings,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            scroll_tolerance: 1.0,
            camera: CameraConstraints::default(),
            scan: ScanParameters::default(),
            classes: ScannerClasses::default(),
            alerts: AlertSettings::default(),
        }
    }
}
