//! The dependency-propagation engine.
//!
//! Most of the functionality here is concerned with input dependencies:
//! a field may be enabled only while some other field has a particular
//! state. A checkbox next to an input is the simple case: the input is
//! disabled until the box is checked. Radio-gated groups are the larger
//! one: each choice of an exclusive group has nested fields that are
//! enabled only while that choice is selected.
//!
//! Changes are resolved breadth-first. Suppose B and C depend on A, and
//! D depends on B and C. Handling a change to A depth-first would visit
//! B, then D, with D reading a stale state for C. The engine instead
//! queues B and C, and D lands at the back of the same queue, so by the
//! time D is evaluated both of its ancestors have settled in this cycle.
//! A node already present in the queue is never added twice.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};

use crate::error::RenderError;

mod batch;
mod condition;
mod node;

pub use condition::Condition;
pub use node::{FieldGraph, FieldKind, FieldNode, NodeId};

use batch::UpdateBatch;

type UpdateHook = Box<dyn Fn(&FieldGraph)>;

/// Suffixes that may be found on related field ids, ordered by
/// dependency. An input `cost` can be structured as:
///
/// ```text
/// cost-row            the entire input row
///   cost-check        a checkbox that turns the input on/off
///     cost-field      an inner wrapper (with any text around the input)
///       cost          the actual input
/// ```
///
/// `cost` is enabled only if `cost-field` is active, `cost-field` only if
/// `cost-check` is, and `cost-check` only if `cost-row` is. Any of the
/// decorations may be absent; absent links just shorten the chain.
pub const RELATED_SUFFIXES: [&str; 4] = ["", "-field", "-check", "-row"];

/// Report of one settle cycle.
#[derive(Debug, Clone, Default)]
pub struct Settlement {
    /// Monotonic cycle counter; increments once per drained batch.
    pub generation: u64,
    /// Number of nodes dequeued and evaluated.
    pub processed: usize,
    /// Nodes whose state signature changed, in processing order.
    pub changed: Vec<NodeId>,
}

/// Owns the full set of field nodes, the directed dependency edges
/// between them, and the propagation scheduler. One engine per form;
/// engines are independently lifetimed and never shared.
#[derive(Default)]
pub struct DependencyEngine {
    graph: FieldGraph,
    /// Change-listener edges: source -> nodes to re-announce when the
    /// source's state signature changes.
    listeners: AHashMap<NodeId, Vec<NodeId>>,
    /// Per-node hooks fired after a cycle settles, once per node whose
    /// signature changed in that cycle.
    hooks: AHashMap<NodeId, Vec<UpdateHook>>,
    /// The currently open batch, if any change arrived since the last
    /// settle. Edges are never removed once added in a session.
    batch: Option<UpdateBatch>,
    generation: u64,
}

impl DependencyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &FieldGraph {
        &self.graph
    }

    /// Adds a node to the graph. Ids must be unique within the form.
    pub fn register(&mut self, node: FieldNode) -> Result<NodeId, RenderError> {
        self.graph.insert(node)
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.graph.lookup(id)
    }

    /// `dependent` stays enabled only while `source` is active.
    pub fn depends_on(&mut self, dependent: NodeId, source: NodeId) {
        self.add_condition(dependent, Condition::ActiveOf {
            source,
            invert: false,
        });
    }

    /// `dependent` stays enabled only while `source` is *inactive*.
    pub fn depends_on_not(&mut self, dependent: NodeId, source: NodeId) {
        self.add_condition(dependent, Condition::ActiveOf {
            source,
            invert: true,
        });
    }

    /// Appends a condition to the node's condition list. Activity-based
    /// conditions also register a change-listener edge so that future
    /// changes to the source propagate to the dependent.
    pub fn add_condition(&mut self, dependent: NodeId, condition: Condition) {
        if let Condition::ActiveOf { source, .. } = condition {
            self.update_on_change(dependent, source);
        }
        self.graph.node_mut(dependent).conditions.push(condition);
    }

    /// An arbitrary boolean check against the current graph state. The
    /// caller is responsible for announcing whatever the check reads.
    pub fn add_predicate<F>(&mut self, dependent: NodeId, check: F)
    where
        F: Fn(&FieldGraph) -> bool + 'static,
    {
        self.graph
            .node_mut(dependent)
            .conditions
            .push(Condition::Predicate(Box::new(check)));
    }

    /// Queues `target` for re-evaluation whenever `source`'s state
    /// signature changes.
    pub fn update_on_change(&mut self, target: NodeId, source: NodeId) {
        self.listeners.entry(source).or_default().push(target);
    }

    /// Adds a hook called whenever the node's signature changed in a
    /// settle cycle, after the whole cycle has drained.
    pub fn on_update<F>(&mut self, id: NodeId, hook: F)
    where
        F: Fn(&FieldGraph) + 'static,
    {
        self.hooks.entry(id).or_default().push(Box::new(hook));
    }

    /// Entry point for every raw input event. Opens a batch if none is
    /// open; the change is resolved at the next `settle` call, so a burst
    /// of near-simultaneous events coalesces into one cycle.
    pub fn notify_changed(&mut self, id: NodeId) {
        let batch = self.batch.get_or_insert_with(UpdateBatch::default);
        if batch.enqueue(id) {
            trace!("queued '{}'", self.graph.node(id).id);
        } else {
            trace!("'{}' is already in the update", self.graph.node(id).id);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.batch.is_some()
    }

    /// Records an edit of a value control and announces it.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        let node = self.graph.node_mut(id);
        if node.value != value {
            node.value = value.to_string();
        }
        self.notify_changed(id);
    }

    /// Records a checkbox toggle and announces it.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.graph.node_mut(id).checked = checked;
        self.notify_changed(id);
    }

    /// Selects one choice of an exclusive-choice group by its value. All
    /// like-named controls are treated as changed, which is what lets
    /// mutual exclusion resolve in a single cycle. Returns false when no
    /// control in the group carries the value.
    pub fn select_radio(&mut self, group: &str, value: &str) -> bool {
        let members = self.radio_members(group);
        let mut found = false;
        for &id in &members {
            let hit = self.graph.node(id).value == value;
            found |= hit;
            self.graph.node_mut(id).checked = hit;
        }
        for id in members {
            self.notify_changed(id);
        }
        found
    }

    fn radio_members(&self, group: &str) -> Vec<NodeId> {
        self.graph
            .ids()
            .filter(|&id| {
                let node = self.graph.node(id);
                node.kind == FieldKind::Radio && node.group.as_deref() == Some(group)
            })
            .collect()
    }

    /// Wires the default relationships implied by naming: the related
    /// suffix chains and mutual updates between like-named radio
    /// controls. Call once, after every node has been registered.
    pub fn connect_defaults(&mut self) {
        self.connect_related();
        self.link_radio_groups();
    }

    /// Resolves ids to base ids (`cost`, `cost-check` and `cost-row` are
    /// all base `cost`) and chains each present related element onto the
    /// next one up.
    fn connect_related(&mut self) {
        let ids: Vec<String> = self
            .graph
            .ids()
            .map(|id| self.graph.node(id).id.clone())
            .collect();
        let mut bases: AHashSet<String> = AHashSet::new();
        for elem_id in &ids {
            let mut base = elem_id.as_str();
            for suffix in RELATED_SUFFIXES.iter().skip(1) {
                if let Some(prefix) = elem_id.strip_suffix(suffix) {
                    base = prefix;
                }
            }
            if !bases.insert(base.to_string()) {
                continue;
            }
            debug!("connecting inputs for '{}'", base);
            let mut child: Option<NodeId> = None;
            for suffix in RELATED_SUFFIXES {
                if let Some(elem) = self.graph.lookup(&format!("{base}{suffix}")) {
                    if let Some(dependent) = child {
                        self.depends_on(dependent, elem);
                    }
                    child = Some(elem);
                }
            }
        }
    }

    /// A change to any control of an exclusive-choice group re-announces
    /// the whole group, without the controls sharing any stored state.
    fn link_radio_groups(&mut self) {
        let mut groups: AHashMap<String, Vec<NodeId>> = AHashMap::new();
        for id in self.graph.ids() {
            let node = self.graph.node(id);
            if node.kind == FieldKind::Radio {
                if let Some(group) = &node.group {
                    groups.entry(group.clone()).or_default().push(id);
                }
            }
        }
        for members in groups.values() {
            for &source in members {
                for &target in members {
                    self.update_on_change(target, source);
                }
            }
        }
    }

    /// Drains the pending batch in FIFO order. Processing a node may
    /// queue its dependents; those go to the back of the same queue, so a
    /// node with several ancestors is evaluated only after all of them
    /// have settled in this cycle. Exactly one settlement per drain.
    pub fn settle(&mut self) -> Settlement {
        if self.batch.is_none() {
            return Settlement {
                generation: self.generation,
                ..Settlement::default()
            };
        }
        self.generation += 1;
        let mut report = Settlement {
            generation: self.generation,
            ..Settlement::default()
        };
        loop {
            let next = self.batch.as_mut().and_then(UpdateBatch::pop);
            let Some(id) = next else { break };
            report.processed += 1;
            let enabled = self.evaluate(id);
            self.apply(id, enabled, &mut report);
        }
        self.batch = None;
        for &id in &report.changed {
            if let Some(hooks) = self.hooks.get(&id) {
                for hook in hooks {
                    hook(&self.graph);
                }
            }
        }
        debug!(
            "finished update #{} on {} elements ({} changed)",
            report.generation,
            report.processed,
            report.changed.len()
        );
        report
    }

    /// The AND of all registered conditions, evaluated against the
    /// current state of the graph at the time the cycle visits the node.
    fn evaluate(&self, id: NodeId) -> bool {
        self.graph
            .node(id)
            .conditions
            .iter()
            .all(|condition| condition.holds(&self.graph))
    }

    /// The only place the enabled flag is flipped. Always followed by a
    /// signature recheck, so reactivating a node whose value did not
    /// change while inactive still re-triggers its dependents.
    fn apply(&mut self, id: NodeId, enabled: bool, report: &mut Settlement) {
        self.graph.node_mut(id).enabled = enabled;
        self.check_state(id, report);
    }

    /// Compares the node's state signature against the last one seen and,
    /// on change, re-announces every listener within the same cycle.
    fn check_state(&mut self, id: NodeId, report: &mut Settlement) {
        let signature = self.graph.signature(id);
        {
            let node = self.graph.node_mut(id);
            if node.last_signature.as_deref() == Some(signature.as_str()) {
                return;
            }
            trace!(
                "state check for '{}': {:?} -> '{}'",
                node.id, node.last_signature, signature
            );
            node.last_signature = Some(signature);
        }
        report.changed.push(id);
        if let Some(dependents) = self.listeners.get(&id) {
            let batch = self.batch.get_or_insert_with(UpdateBatch::default);
            for &dependent in dependents {
                batch.enqueue(dependent);
            }
        }
    }
}
