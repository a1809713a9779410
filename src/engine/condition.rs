use std::fmt;

use super::node::{FieldGraph, NodeId};

/// A predicate attached to a node that must hold for the node to stay
/// enabled. A node is enabled only while every one of its conditions
/// holds; a node with no conditions is always enabled.
pub enum Condition {
    /// Satisfied while the source node is active (or inactive, when
    /// inverted; used for mutual exclusion).
    ActiveOf { source: NodeId, invert: bool },
    /// An arbitrary check against the current graph state.
    Predicate(Box<dyn Fn(&FieldGraph) -> bool>),
}

impl Condition {
    pub fn holds(&self, graph: &FieldGraph) -> bool {
        match self {
            Condition::ActiveOf { source, invert } => graph.is_active(*source) != *invert,
            Condition::Predicate(check) => check(graph),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::ActiveOf { source, invert } => f
                .debug_struct("ActiveOf")
                .field("source", source)
                .field("invert", invert)
                .finish(),
            Condition::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
