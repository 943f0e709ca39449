use std::fmt;

/// Lifecycle of the camera session. There is no terminal state; the
/// controller is reused for the lifetime of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScannerState {
    #[default]
    Idle,
    /// Camera start in flight
    Requesting,
    /// Live decode loop running
    Scanning,
    /// Camera stop in flight
    Stopping,
}

impl ScannerState {
    pub fn name(self) -> &'static str {
        match self {
            ScannerState::Idle => "idle",
            ScannerState::Requesting => "requesting",
            ScannerState::Scanning => "scanning",
            ScannerState::Stopping => "stopping",
        }
    }
}

impl fmt::Display for ScannerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
