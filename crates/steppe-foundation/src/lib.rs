//! Gesture handling shared by the page behaviors.

pub mod gesture_constants;
pub mod gestures;

pub use gesture_constants::SCROLL_TOLERANCE;
pub use gestures::{
    AncestorSet, GestureVerdict, ScrollGuard, TouchSample, TouchTracker, WheelGesture,
};
