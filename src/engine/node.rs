use crate::error::RenderError;
use ahash::AHashMap;

use super::condition::Condition;

/// Index of a field node inside its owning graph.
pub type NodeId = usize;

/// The role a node plays in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A value-bearing control (text, select, date).
    Input,
    /// A checkbox control.
    Checkbox,
    /// One choice of an exclusive-choice group.
    Radio,
    /// A structural grouping element with no value of its own.
    Container,
}

impl FieldKind {
    /// Checkbox and radio controls fold their checked state into their
    /// activity: an unchecked control is inactive no matter what.
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// A single entity in the dependency graph, wrapping one rendered control
/// (or a virtual grouping container). All authoritative state lives here;
/// render nodes only point back at it.
pub struct FieldNode {
    pub id: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    /// Exclusive-choice group name shared by like-named radio controls.
    pub group: Option<String>,
    pub(super) enabled: bool,
    pub(super) conditions: Vec<Condition>,
    pub(super) last_signature: Option<String>,
}

impl FieldNode {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            value: String::new(),
            checked: false,
            group: None,
            enabled: true,
            conditions: Vec::new(),
            last_signature: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }
}

/// Arena of field nodes with a unique-id index. Nodes live for the whole
/// form session; there is no partial removal.
#[derive(Default)]
pub struct FieldGraph {
    nodes: Vec<FieldNode>,
    index: AHashMap<String, NodeId>,
}

impl FieldGraph {
    /// Adds a node. Ids must be unique within a form instance.
    pub fn insert(&mut self, node: FieldNode) -> Result<NodeId, RenderError> {
        if self.index.contains_key(&node.id) {
            return Err(RenderError::DuplicateField(node.id.clone()));
        }
        let id = self.nodes.len();
        self.index.insert(node.id.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: NodeId) -> &FieldNode {
        &self.nodes[id]
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut FieldNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    /// Whether a node currently participates in the query. Checkable
    /// controls additionally require their checked state, so this is
    /// always derived from current state, never cached.
    pub fn is_active(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        node.enabled && (!node.kind.is_checkable() || node.checked)
    }

    /// The tracked state signature: activity plus literal value. Either
    /// kind of change counts as a state change for dependents.
    pub(super) fn signature(&self, id: NodeId) -> String {
        format!("{}:{}", self.is_active(id), self.nodes[id].value)
    }
}
