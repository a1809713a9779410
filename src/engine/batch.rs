use ahash::AHashSet;
use std::collections::VecDeque;

use super::node::NodeId;

/// The pending work of one settle cycle: a FIFO queue of node ids plus a
/// membership set for O(1) double-processing checks. Membership persists
/// for the whole cycle, so a node handled once is never handled again
/// even if a later update re-announces it.
#[derive(Default)]
pub(super) struct UpdateBatch {
    queue: VecDeque<NodeId>,
    seen: AHashSet<NodeId>,
}

impl UpdateBatch {
    /// Returns false when the node was already part of this cycle.
    pub(super) fn enqueue(&mut self, id: NodeId) -> bool {
        if self.seen.insert(id) {
            self.queue.push_back(id);
            true
        } else {
            false
        }
    }

    pub(super) fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }
}
