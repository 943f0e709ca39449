//! Read-only view of the page layout used by the scroll guard.

/// Computed `overflow-y` keyword of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
    Overlay,
}

impl Overflow {
    /// Parses a computed style value. Unknown keywords fall back to `Visible`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hidden" => Overflow::Hidden,
            "clip" => Overflow::Clip,
            "auto" => Overflow::Auto,
            "scroll" => Overflow::Scroll,
            "overlay" => Overflow::Overlay,
            _ => Overflow::Visible,
        }
    }

    /// Whether the element may scroll its own content on this axis.
    pub fn allows_scrolling(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll | Overflow::Overlay)
    }
}

/// Vertical scroll metrics of one element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Content taller than the viewport by more than `tolerance`.
    pub fn overflows(&self, tolerance: f64) -> bool {
        self.scroll_height - self.client_height > tolerance
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll_top > 0.0
    }

    pub fn can_scroll_down(&self, tolerance: f64) -> bool {
        self.scroll_top + self.client_height < self.scroll_height - tolerance
    }
}

/// Element tree with computed style and scroll metrics.
///
/// Every read goes to the live layout; implementations must not cache.
pub trait LayoutTree {
    type Node: Clone + PartialEq;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn overflow_y(&self, node: &Self::Node) -> Overflow;

    fn scroll_metrics(&self, node: &Self::Node) -> ScrollMetrics;

    /// The element that scrolls the document itself.
    fn scrolling_root(&self) -> Self::Node;
}
