//! Element resolution and mutation on the host page.

/// Notification dispatched on a field after its value is changed in code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntheticEvent {
    Input,
    Change,
}

impl SyntheticEvent {
    pub fn event_type(self) -> &'static str {
        match self {
            SyntheticEvent::Input => "input",
            SyntheticEvent::Change => "change",
        }
    }

    /// Both notifications bubble so enclosing form logic observes them.
    pub fn bubbles(self) -> bool {
        true
    }
}

/// DOM operations the scanner needs.
///
/// Mutations are infallible from the caller's point of view. Implementations
/// log and swallow platform errors.
pub trait Page {
    type Element: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Nearest inclusive ancestor matching a CSS selector.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn set_class(&self, element: &Self::Element, class: &str, enabled: bool);

    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    /// Sets the `value` of a form control. An empty value clears a file input.
    fn set_value(&self, element: &Self::Element, value: &str);

    fn dispatch(&self, element: &Self::Element, event: SyntheticEvent);

    fn focus(&self, element: &Self::Element);
}
