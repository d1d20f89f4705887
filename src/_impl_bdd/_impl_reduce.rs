use log::{debug, trace};

use crate::branch::Label;
use crate::diagram::Diagram;
use crate::error::BddError;
use crate::node::Node;
use crate::node_id::NodeId;

impl Diagram {
    /// Returns the first node in `candidates` that is *similar* to `node`
    /// and is not `node` itself, or `None`. The root is never considered
    /// similar to anything — it cannot merge (spec.md §4.5, scenarios
    /// S3/S4).
    pub fn find_similar_node(&self, node: NodeId, candidates: &[NodeId]) -> Option<NodeId> {
        for &candidate in candidates {
            if candidate == node {
                continue;
            }
            if self.get_node(candidate).is_root() {
                continue;
            }
            if self.are_similar(node, candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn are_similar(&self, a: NodeId, b: NodeId) -> bool {
        let a_node = self.get_node(a);
        let b_node = self.get_node(b);
        if a_node.level(self.num_vars) != b_node.level(self.num_vars) {
            return false;
        }
        match (a_node, b_node) {
            (Node::Leaf { value: va, .. }, Node::Leaf { value: vb, .. }) => va == vb,
            (Node::Internal { branches: ba, .. }, Node::Internal { branches: bb, .. }) => {
                ba.get(Label::Zero) == bb.get(Label::Zero) && ba.get(Label::One) == bb.get(Label::One)
            }
            _ => false,
        }
    }

    /// Merges `x` into a structurally identical sibling at the same level,
    /// if one exists: every edge pointing at `x` is rewired to the sibling
    /// and `x` is removed. Returns whether a merge happened.
    pub fn apply_reduction_rule(&mut self, x: NodeId) -> Result<bool, BddError> {
        if self.get_node(x).is_root() {
            return Ok(false);
        }
        let level = self.get_node(x).level(self.num_vars);
        let candidates = self.get_nodes_of_level(level).to_vec();
        let similar = match self.find_similar_node(x, &candidates) {
            Some(y) => y,
            None => return Ok(false),
        };

        debug!("reduction: merging {x} into {similar} at level {level}");
        let edges = self
            .get_node(x)
            .parents()
            .expect("non-root node has a parent set")
            .edges()
            .to_vec();
        for &(parent, label) in &edges {
            self.set_branch(parent, label, similar);
        }
        self.detach_outgoing_edges(x);
        self.remove_node(level, x);
        Ok(true)
    }

    /// Removes `x` if it is an internal node whose two branches are the
    /// same node by identity, rewiring every edge that pointed at `x` to
    /// that common child. Returns whether an elimination happened.
    pub fn apply_elimination_rule(&mut self, x: NodeId) -> Result<bool, BddError> {
        let (level, common_child) = match self.get_node(x) {
            Node::Internal { level, branches, .. } if branches.has_equal_branches() => {
                (*level, branches.get(Label::Zero))
            }
            _ => return Ok(false),
        };

        trace!("elimination: collapsing {x} at level {level} into {common_child}");
        let edges = self
            .get_node(x)
            .parents()
            .expect("internal node has a parent set")
            .edges()
            .to_vec();
        for &(parent, label) in &edges {
            self.set_branch(parent, label, common_child);
        }
        self.detach_outgoing_edges(x);
        self.remove_node(level, x);
        Ok(true)
    }

    /// Removes `x`'s own `(x, label)` entries from its children's parent
    /// sets. `set_branch` keeps a parent's *incoming* bookkeeping exact when
    /// a node is rewired, but a node slated for removal also leaves
    /// up-references of its own in whatever it used to point at — those go
    /// stale the instant `remove_node` erases `x`, so both reduction and
    /// elimination call this right before removing the node they merged
    /// away. A no-op for leaves, which own no branches.
    fn detach_outgoing_edges(&mut self, x: NodeId) {
        let branches = match self.get_node(x).branches() {
            Some(b) => *b,
            None => return,
        };
        for label in [Label::Zero, Label::One] {
            let child = branches.get(label);
            if let Some(parents) = self.get_node_mut(child).parents_mut() {
                parents.remove(x, label);
            }
        }
    }

    /// Fixed-point reduction driver (spec.md §4.7). Repeats leaves-first
    /// passes — reduction rule then elimination rule, level by level from
    /// `N` down to `1` — until a full pass makes no change, or stops after
    /// one pass if `until_done` is `false` (used in tests to observe
    /// intermediate states).
    pub fn minimize(&mut self, until_done: bool) -> Result<(), BddError> {
        loop {
            let mut changed = false;
            for level in (1..=self.num_vars).rev() {
                let snapshot: Vec<NodeId> = self.get_nodes_of_level(level).to_vec();
                for x in snapshot {
                    if self.try_get_node(x).is_none() {
                        continue; // already merged away earlier in this pass
                    }
                    if self.apply_reduction_rule(x)? {
                        changed = true;
                    }
                }

                let remaining: Vec<NodeId> = self.get_nodes_of_level(level).to_vec();
                for x in remaining {
                    if self.try_get_node(x).is_none() {
                        continue;
                    }
                    if self.apply_elimination_rule(x)? {
                        changed = true;
                    }
                }
            }

            if !until_done || !changed {
                break;
            }
        }

        self.garbage_collect();
        self.validate_if_configured()?;
        Ok(())
    }
}
