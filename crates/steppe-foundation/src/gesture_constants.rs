//! Shared gesture constants.
//!
//! Values are in CSS pixels.

/// Slack absorbed when comparing scroll extents.
///
/// Renderers report fractional layout sizes rounded to whole pixels, so an
/// element whose content exactly fits can report a content height one pixel
/// larger than its box. Anything within this distance counts as "no room to
/// scroll". Exact cross-renderer behavior at the boundary is not pinned down;
/// override per guard with `ScrollGuard::with_tolerance` when a renderer
/// needs more slack.
pub const SCROLL_TOLERANCE: f64 = 1.0;
