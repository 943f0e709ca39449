//! Scanner markup: resolved elements and the UI toggles applied to them.

use steppe_core::{
    BindingError, BindingRole, Page, ScannerBindings, ScannerClasses, StatusKind, StatusMessage,
    SyntheticEvent,
};

/// Trims surrounding whitespace and line breaks from a decoded payload.
pub fn normalize_code(raw: &str) -> &str {
    raw.trim()
}

/// Elements the scanner drives, resolved once at mount time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerElements<E> {
    pub input: E,
    pub viewport: E,
    pub start: E,
    pub stop: E,
    pub image_input: E,
    pub status: E,
    /// Optional frame around the viewport that is highlighted while scanning
    pub shell: Option<E>,
}

impl<E: Clone> ScannerElements<E> {
    /// Looks up every bound id. Fails on the first id without an element;
    /// nothing on the page is touched in that case.
    pub fn resolve<P>(
        page: &P,
        bindings: &ScannerBindings,
        shell_selector: &str,
    ) -> Result<Self, BindingError>
    where
        P: Page<Element = E>,
    {
        let lookup = |role: BindingRole| {
            let id = bindings.id(role);
            page.element_by_id(id).ok_or_else(|| BindingError::Missing {
                role,
                id: id.to_string(),
            })
        };

        let input = lookup(BindingRole::Input)?;
        let viewport = lookup(BindingRole::Viewport)?;
        let start = lookup(BindingRole::StartControl)?;
        let stop = lookup(BindingRole::StopControl)?;
        let image_input = lookup(BindingRole::ImageInput)?;
        let status = lookup(BindingRole::Status)?;
        let shell = page.closest(&viewport, shell_selector);

        Ok(Self {
            input,
            viewport,
            start,
            stop,
            image_input,
            status,
            shell,
        })
    }
}

pub struct ScannerView<P: Page> {
    page: P,
    elements: ScannerElements<P::Element>,
    classes: ScannerClasses,
}

impl<P: Page> ScannerView<P> {
    pub fn new(page: P, elements: ScannerElements<P::Element>, classes: ScannerClasses) -> Self {
        Self {
            page,
            elements,
            classes,
        }
    }

    pub fn elements(&self) -> &ScannerElements<P::Element> {
        &self.elements
    }

    /// Viewport and stop hidden, start shown and enabled.
    pub fn show_idle(&self) {
        let hidden = &self.classes.hidden;
        self.page.set_class(&self.elements.viewport, hidden, true);
        self.page.set_class(&self.elements.start, hidden, false);
        self.page.set_class(&self.elements.stop, hidden, true);
        self.page.set_disabled(&self.elements.start, false);
        if let Some(shell) = &self.elements.shell {
            self.page.set_class(shell, &self.classes.scanning, false);
        }
    }

    pub fn show_scanning(&self) {
        let hidden = &self.classes.hidden;
        self.page.set_class(&self.elements.viewport, hidden, false);
        self.page.set_class(&self.elements.start, hidden, true);
        self.page.set_class(&self.elements.stop, hidden, false);
        if let Some(shell) = &self.elements.shell {
            self.page.set_class(shell, &self.classes.scanning, true);
        }
    }

    pub fn set_start_enabled(&self, enabled: bool) {
        self.page.set_disabled(&self.elements.start, !enabled);
    }

    /// Replaces the status text and its kind class.
    pub fn set_status(&self, status: &StatusMessage) {
        let el = &self.elements.status;
        self.page.set_text(el, &status.text);
        self.page
            .set_class(el, &self.classes.ok, status.kind == StatusKind::Ok);
        self.page
            .set_class(el, &self.classes.error, status.kind == StatusKind::Error);
    }

    /// Writes `code` into the bound field the way typing would: value, then
    /// bubbling `input` and `change`, then focus.
    pub fn apply_value(&self, code: &str) {
        let input = &self.elements.input;
        self.page.set_value(input, code);
        self.page.dispatch(input, SyntheticEvent::Input);
        self.page.dispatch(input, SyntheticEvent::Change);
        self.page.focus(input);
    }

    /// Clears the image picker so the same file fires `change` again.
    pub fn clear_file_selection(&self) {
        self.page.set_value(&self.elements.image_input, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steppe_testing::{FakeDom, PageTestRule};

    fn view(rule: &PageTestRule) -> ScannerView<FakeDom> {
        let classes = ScannerClasses::default();
        let elements =
            ScannerElements::resolve(&rule.dom, rule.bindings(), &classes.shell_selector)
                .expect("rule markup resolves");
        ScannerView::new(rule.dom.clone(), elements, classes)
    }

    #[test]
    fn test_normalize_code_trims_whitespace() {
        assert_eq!(normalize_code(" 123-ABC \n"), "123-ABC");
        assert_eq!(normalize_code("\t\r\n"), "");
    }

    #[test]
    fn test_resolve_reports_first_missing_role() {
        let rule = PageTestRule::new();
        let mut bindings = rule.bindings().clone();
        bindings.set_id(BindingRole::StopControl, "nope");

        let err = ScannerElements::resolve(&rule.dom, &bindings, ".qr-viewfinder-shell")
            .expect_err("stop control is missing");
        assert_eq!(
            err,
            BindingError::Missing {
                role: BindingRole::StopControl,
                id: "nope".into()
            }
        );
        assert_eq!(rule.dom.mutations(), 0);
    }

    #[test]
    fn test_resolve_finds_shell_around_viewport() {
        let rule = PageTestRule::new();
        let view = view(&rule);
        assert_eq!(view.elements().shell, rule.shell());

        let bare = PageTestRule::without_shell();
        assert_eq!(self::view(&bare).elements().shell, None);
    }

    #[test]
    fn test_idle_and_scanning_toggles() {
        let rule = PageTestRule::new();
        let view = view(&rule);
        let shell = rule.shell().expect("shell present");

        view.show_scanning();
        assert!(rule.shows_scanning_ui());
        assert!(rule.dom.has_class(shell, "is-scanning"));

        view.show_idle();
        assert!(rule.shows_idle_ui());
        assert!(!rule.dom.has_class(shell, "is-scanning"));
    }

    #[test]
    fn test_status_kind_replaces_previous_class() {
        let rule = PageTestRule::new();
        let view = view(&rule);

        view.set_status(&StatusMessage::error("boom"));
        assert_eq!(rule.status(), StatusMessage::error("boom"));

        view.set_status(&StatusMessage::ok("fine"));
        assert_eq!(rule.status(), StatusMessage::ok("fine"));

        view.set_status(&StatusMessage::neutral("waiting"));
        assert_eq!(rule.status(), StatusMessage::neutral("waiting"));
    }
}
