//! In-memory document with layout metrics.
//!
//! Node 0 is the document element and doubles as the scrolling root. Node 1
//! is `body`. `closest` understands `.class` and `#id` selectors only.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use steppe_core::{LayoutTree, Overflow, Page, ScrollMetrics, SyntheticEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
pub struct FakeNode {
    pub id: Option<String>,
    pub parent: Option<NodeId>,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub overflow_y: Overflow,
    pub metrics: ScrollMetrics,
}

impl FakeNode {
    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.contains(class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else {
            false
        }
    }
}

/// Builder for nodes appended to a [`FakeDom`].
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    node: FakeNode,
}

impl ElementSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.node.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.node.classes.insert(class.to_string());
        self
    }

    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.node.overflow_y = overflow;
        self
    }

    pub fn metrics(mut self, metrics: ScrollMetrics) -> Self {
        self.node.metrics = metrics;
        self
    }
}

#[derive(Default)]
struct DomState {
    nodes: Vec<FakeNode>,
    events: Vec<(NodeId, SyntheticEvent)>,
    focused: Option<NodeId>,
    mutations: usize,
}

/// Shared handle to an in-memory document. Clones see the same nodes.
#[derive(Clone)]
pub struct FakeDom {
    state: Rc<RefCell<DomState>>,
}

impl FakeDom {
    const ROOT: NodeId = NodeId(0);
    const BODY: NodeId = NodeId(1);

    /// A document with an 800px viewport whose content exactly fits.
    pub fn new() -> Self {
        let root = FakeNode {
            metrics: ScrollMetrics::new(0.0, 800.0, 800.0),
            ..FakeNode::default()
        };
        let body = FakeNode {
            parent: Some(Self::ROOT),
            ..FakeNode::default()
        };
        Self {
            state: Rc::new(RefCell::new(DomState {
                nodes: vec![root, body],
                ..DomState::default()
            })),
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn body(&self) -> NodeId {
        Self::BODY
    }

    pub fn append(&self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        let mut node = spec.node;
        node.parent = Some(parent);
        state.nodes.push(node);
        id
    }

    /// Edits a node directly. Does not count as a page mutation.
    pub fn update(&self, node: NodeId, edit: impl FnOnce(&mut FakeNode)) {
        edit(&mut self.state.borrow_mut().nodes[node.0]);
    }

    pub fn node(&self, node: NodeId) -> FakeNode {
        self.state.borrow().nodes[node.0].clone()
    }

    pub fn set_scroll_top(&self, node: NodeId, scroll_top: f64) {
        self.update(node, |n| n.metrics.scroll_top = scroll_top);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.state.borrow().nodes[node.0].classes.contains(class)
    }

    pub fn text(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node.0].text.clone()
    }

    pub fn value(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node.0].value.clone()
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.state.borrow().nodes[node.0].disabled
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    /// Synthetic events dispatched on `node`, in order.
    pub fn events(&self, node: NodeId) -> Vec<SyntheticEvent> {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|(target, _)| *target == node)
            .map(|(_, event)| *event)
            .collect()
    }

    pub fn event_count(&self, node: NodeId, event: SyntheticEvent) -> usize {
        self.events(node).into_iter().filter(|e| *e == event).count()
    }

    /// Number of `Page` mutations applied so far.
    pub fn mutations(&self) -> usize {
        self.state.borrow().mutations
    }

    fn mutate(&self, node: NodeId, edit: impl FnOnce(&mut FakeNode)) {
        let mut state = self.state.borrow_mut();
        state.mutations += 1;
        edit(&mut state.nodes[node.0]);
    }
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for FakeDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let state = self.state.borrow();
        let mut current = Some(*element);
        while let Some(node) = current {
            if state.nodes[node.0].matches(selector) {
                return Some(node);
            }
            current = state.nodes[node.0].parent;
        }
        None
    }

    fn set_class(&self, element: &NodeId, class: &str, enabled: bool) {
        self.mutate(*element, |node| {
            if enabled {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        });
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.mutate(*element, |node| node.text = text.to_string());
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) {
        self.mutate(*element, |node| node.disabled = disabled);
    }

    fn set_value(&self, element: &NodeId, value: &str) {
        self.mutate(*element, |node| node.value = value.to_string());
    }

    fn dispatch(&self, element: &NodeId, event: SyntheticEvent) {
        let mut state = self.state.borrow_mut();
        state.mutations += 1;
        state.events.push((*element, event));
    }

    fn focus(&self, element: &NodeId) {
        let mut state = self.state.borrow_mut();
        state.mutations += 1;
        state.focused = Some(*element);
    }
}

impl LayoutTree for FakeDom {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[node.0].parent
    }

    fn overflow_y(&self, node: &NodeId) -> Overflow {
        self.state.borrow().nodes[node.0].overflow_y
    }

    fn scroll_metrics(&self, node: &NodeId) -> ScrollMetrics {
        self.state.borrow().nodes[node.0].metrics
    }

    fn scrolling_root(&self) -> NodeId {
        Self::ROOT
    }
}
