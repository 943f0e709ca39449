pub mod scroll;
pub mod touch;

pub use scroll::{AncestorSet, GestureVerdict, ScrollGuard, WheelGesture};
pub use touch::{TouchSample, TouchTracker};
