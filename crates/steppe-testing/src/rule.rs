use crate::dom::{ElementSpec, FakeDom, NodeId};
use crate::engine::FakeEngine;
use crate::executor::TestSpawner;
use steppe_core::{
    BindingRole, Page, ScannerBindings, ScannerClasses, StatusKind, StatusMessage,
};

/// Headless harness for exercising the scanner widget.
///
/// `PageTestRule` builds the scanner markup the host page renders (a form
/// input, a viewfinder shell around the camera viewport, start/stop buttons,
/// an image picker and a status line), plus a fake engine and a spawner
/// whose tasks only run when the test pumps them.
pub struct PageTestRule {
    pub dom: FakeDom,
    pub engine: FakeEngine,
    pub spawner: TestSpawner,
    bindings: ScannerBindings,
    shell: Option<NodeId>,
}

impl PageTestRule {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Same markup without the `.qr-viewfinder-shell` wrapper.
    pub fn without_shell() -> Self {
        Self::build(false)
    }

    fn build(with_shell: bool) -> Self {
        let dom = FakeDom::new();
        let classes = ScannerClasses::default();
        let form = dom.append(dom.body(), ElementSpec::new().id("checkout-form"));
        let mut bindings = ScannerBindings::default();

        let ids = [
            (BindingRole::Input, "id_inventory_number"),
            (BindingRole::Viewport, "qr-reader"),
            (BindingRole::StartControl, "qr-start"),
            (BindingRole::StopControl, "qr-stop"),
            (BindingRole::ImageInput, "qr-image"),
            (BindingRole::Status, "qr-status"),
        ];

        let mut shell = None;
        for (role, id) in ids {
            let parent = if role == BindingRole::Viewport && with_shell {
                let shell_class = classes.shell_selector.trim_start_matches('.');
                let node = dom.append(form, ElementSpec::new().class(shell_class));
                shell = Some(node);
                node
            } else {
                form
            };
            dom.append(parent, ElementSpec::new().id(id));
            bindings.set_id(role, id);
        }

        Self {
            dom,
            engine: FakeEngine::new(),
            spawner: TestSpawner::new(),
            bindings,
            shell,
        }
    }

    pub fn bindings(&self) -> &ScannerBindings {
        &self.bindings
    }

    pub fn node(&self, role: BindingRole) -> NodeId {
        self.dom
            .element_by_id(self.bindings.id(role))
            .expect("rule markup contains every bound element")
    }

    pub fn shell(&self) -> Option<NodeId> {
        self.shell
    }

    pub fn pump_until_idle(&self) {
        self.spawner.pump_until_idle();
    }

    /// Status line as rendered: its text plus the kind implied by its class.
    pub fn status(&self) -> StatusMessage {
        let classes = ScannerClasses::default();
        let node = self.node(BindingRole::Status);
        let kind = if self.dom.has_class(node, &classes.error) {
            StatusKind::Error
        } else if self.dom.has_class(node, &classes.ok) {
            StatusKind::Ok
        } else {
            StatusKind::Neutral
        };
        StatusMessage {
            text: self.dom.text(node),
            kind,
        }
    }

    /// True when only the start control is visible and the viewport is hidden.
    pub fn shows_idle_ui(&self) -> bool {
        let hidden = ScannerClasses::default().hidden;
        self.dom.has_class(self.node(BindingRole::Viewport), &hidden)
            && !self.dom.has_class(self.node(BindingRole::StartControl), &hidden)
            && self.dom.has_class(self.node(BindingRole::StopControl), &hidden)
    }

    /// True when the viewport and stop control are visible.
    pub fn shows_scanning_ui(&self) -> bool {
        let hidden = ScannerClasses::default().hidden;
        !self.dom.has_class(self.node(BindingRole::Viewport), &hidden)
            && self.dom.has_class(self.node(BindingRole::StartControl), &hidden)
            && !self.dom.has_class(self.node(BindingRole::StopControl), &hidden)
    }
}

impl Default for PageTestRule {
    fn default() -> Self {
        Self::new()
    }
}
