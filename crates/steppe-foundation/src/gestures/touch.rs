//! Single-finger touch tracking.
//!
//! Only one touch point is tracked. A gesture with any other number of
//! active touches (pinch, two-finger pan) is treated as non-directional and
//! clears tracking, so it is never blocked.

/// Snapshot of a touch event: how many touches are active and the vertical
/// position of the first one in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub touches: usize,
    pub client_y: f64,
}

impl TouchSample {
    pub fn single(client_y: f64) -> Self {
        Self {
            touches: 1,
            client_y,
        }
    }

    pub fn multi(touches: usize, client_y: f64) -> Self {
        Self { touches, client_y }
    }
}

/// Remembers where the active touch started.
///
/// Deltas follow the wheel convention: `start - current`, so a finger moving
/// up the screen (content dragged up, page scrolls down) yields a positive
/// delta. A gesture source with the opposite sign semantics has to flip its
/// coordinates before building a [`TouchSample`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchTracker {
    start_y: Option<f64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, sample: TouchSample) {
        self.start_y = (sample.touches == 1).then_some(sample.client_y);
    }

    /// Delta since the touch started, or `None` when nothing directional is
    /// being tracked.
    pub fn delta(&self, sample: TouchSample) -> Option<f64> {
        if sample.touches != 1 {
            return None;
        }
        self.start_y.map(|start| start - sample.client_y)
    }

    pub fn end(&mut self) {
        self.start_y = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_y.is_some()
    }
}
