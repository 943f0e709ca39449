//! Directional scroll containment.
//!
//! The guard stops the document from rubber-banding at its scroll extremes
//! while leaving nested scroll containers (panels, modals, code blocks)
//! fully usable. For every wheel or touch-move it walks the target's
//! ancestor chain and only suppresses the platform default when no element
//! on that chain can still move in the gesture's direction.
//!
//! The walk is recomputed per event. Layout and scroll offsets change
//! between gestures, so a cached chain would go stale.

use super::touch::{TouchSample, TouchTracker};
use crate::gesture_constants::SCROLL_TOLERANCE;
use smallvec::SmallVec;
use steppe_core::{LayoutTree, PageSettings};

/// Scrollable ancestors of a gesture target, innermost first, ending with
/// the scrolling root.
pub type AncestorSet<N> = SmallVec<[N; 4]>;

/// What the host should do with the platform's default scroll action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureVerdict {
    PassThrough,
    SuppressDefault,
}

impl GestureVerdict {
    pub fn should_suppress(self) -> bool {
        self == GestureVerdict::SuppressDefault
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelGesture<N> {
    /// Positive scrolls the page down, negative up.
    pub delta_y: f64,
    /// Platform zoom modifier (Ctrl, or pinch on trackpads).
    pub zoom_modifier: bool,
    /// `None` when the event target is not an element.
    pub target: Option<N>,
}

pub struct ScrollGuard<L: LayoutTree> {
    layout: L,
    tolerance: f64,
    touch: TouchTracker,
}

impl<L: LayoutTree> ScrollGuard<L> {
    pub fn new(layout: L) -> Self {
        Self {
            layout,
            tolerance: SCROLL_TOLERANCE,
            touch: TouchTracker::new(),
        }
    }

    pub fn from_settings(layout: L, settings: &PageSettings) -> Self {
        Self::new(layout).with_tolerance(settings.scroll_tolerance)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn is_tracking_touch(&self) -> bool {
        self.touch.is_tracking()
    }

    /// True iff the element's `overflow-y` lets it scroll and its content is
    /// taller than its box by more than the tolerance.
    pub fn is_vertically_scrollable(&self, element: Option<&L::Node>) -> bool {
        let Some(element) = element else {
            return false;
        };
        self.layout.overflow_y(element).allows_scrolling()
            && self.layout.scroll_metrics(element).overflows(self.tolerance)
    }

    /// Scroll containers from `target` outwards. The scrolling root is
    /// appended when the walk did not reach it, so the set is never empty
    /// and holds the root exactly once.
    pub fn scrollable_ancestors_of(&self, target: Option<&L::Node>) -> AncestorSet<L::Node> {
        let mut ancestors = AncestorSet::new();
        let mut node = target.cloned();
        while let Some(current) = node {
            if self.is_vertically_scrollable(Some(&current)) {
                ancestors.push(current.clone());
            }
            node = self.layout.parent(&current);
        }

        let root = self.layout.scrolling_root();
        if !ancestors.contains(&root) {
            ancestors.push(root);
        }
        ancestors
    }

    /// Whether any of `ancestors` can absorb a gesture with this delta.
    pub fn can_scroll_in_direction(&self, delta: f64, ancestors: &[L::Node]) -> bool {
        if delta == 0.0 || delta.is_nan() {
            return true;
        }
        if delta < 0.0 {
            return ancestors
                .iter()
                .any(|element| self.layout.scroll_metrics(element).can_scroll_up());
        }
        ancestors.iter().any(|element| {
            self.layout
                .scroll_metrics(element)
                .can_scroll_down(self.tolerance)
        })
    }

    pub fn on_wheel(&self, gesture: &WheelGesture<L::Node>) -> GestureVerdict {
        if gesture.zoom_modifier {
            return GestureVerdict::PassThrough;
        }
        self.gate(gesture.delta_y, gesture.target.as_ref())
    }

    pub fn on_touch_start(&mut self, sample: TouchSample) {
        self.touch.begin(sample);
    }

    pub fn on_touch_move(&mut self, sample: TouchSample, target: Option<&L::Node>) -> GestureVerdict {
        match self.touch.delta(sample) {
            Some(delta) => self.gate(delta, target),
            None => GestureVerdict::PassThrough,
        }
    }

    pub fn on_touch_end(&mut self) {
        self.touch.end();
    }

    fn gate(&self, delta: f64, target: Option<&L::Node>) -> GestureVerdict {
        let ancestors = self.scrollable_ancestors_of(target);
        if self.can_scroll_in_direction(delta, &ancestors) {
            GestureVerdict::PassThrough
        } else {
            log::trace!(
                "suppressing overscroll: delta={delta}, {} candidate containers",
                ancestors.len()
            );
            GestureVerdict::SuppressDefault
        }
    }
}
