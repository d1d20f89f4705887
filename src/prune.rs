use fxhash::FxHashMap;
use log::debug;

use crate::branch::Label;
use crate::diagram::Diagram;
use crate::error::BddError;
use crate::node_id::NodeId;

impl Diagram {
    /// Removes every leaf whose value equals `marker` and collapses its
    /// ancestors (spec.md §4.9). A node whose branch pointed at a removed
    /// leaf is itself replaced by whatever remains of its other branch in
    /// every parent that referenced it; if that makes an internal node's
    /// two branches converge on the same surviving node, the node is
    /// eliminated the same way `apply_elimination_rule` does. Both kinds of
    /// collapse can make a surviving node's parent point directly at a
    /// descendant more than one level down — allowed under this diagram's
    /// ordering invariant (levels strictly increase along any edge, they
    /// need not increase by exactly one).
    ///
    /// If only one of the root's two branches collapses away entirely
    /// (every leaf under it was the marker) while the other still has a
    /// well-defined surviving subtree, the root keeps that subtree's
    /// answers intact: both root branches are pointed at the surviving
    /// subtree, so every key that used to resolve to a real value through
    /// the untouched branch still does, and the collapsed branch — which
    /// only ever fed don't-care keys — now resolves into that same
    /// surviving subtree rather than losing the whole diagram. Only when
    /// *both* root branches collapse (including, but not limited to, the
    /// case where every leaf in the whole diagram was the marker) is there
    /// no surviving subtree left to fall back on; only then is the diagram
    /// marked empty, and subsequent `resolve` calls fail with
    /// `BddError::EmptyDiagram`.
    pub fn remove_irrelevant_leaf_nodes(&mut self, marker: &str) -> Result<(), BddError> {
        if self.is_empty() {
            return Ok(());
        }

        // `decision[id]` is `None` if `id` (and everything under it) was
        // entirely the marker and has been discarded, or `Some(target)` if
        // `id` survives — possibly as a stand-in for a different node that
        // passed through it (target != id).
        let mut decision: FxHashMap<NodeId, Option<NodeId>> = FxHashMap::default();

        for &id in self.get_nodes_of_level(self.num_vars) {
            let value = self
                .get_node(id)
                .value()
                .expect("leaf level only contains leaves")
                .to_string();
            decision.insert(id, if value == marker { None } else { Some(id) });
        }

        for level in (1..self.num_vars).rev() {
            let ids: Vec<NodeId> = self.get_nodes_of_level(level).to_vec();
            for id in ids {
                let (zero_child, one_child) = {
                    let branches = self
                        .get_node(id)
                        .branches()
                        .expect("internal node always has branches");
                    (branches.get(Label::Zero), branches.get(Label::One))
                };
                let zero_decision = decision.get(&zero_child).copied().flatten();
                let one_decision = decision.get(&one_child).copied().flatten();

                let result = self.resolve_prune_decision(
                    id,
                    zero_child,
                    one_child,
                    zero_decision,
                    one_decision,
                );
                decision.insert(id, result);
            }
        }

        let root = self.root_id();
        let (root_zero_child, root_one_child) = {
            let branches = self
                .get_node(root)
                .branches()
                .expect("root always has branches");
            (branches.get(Label::Zero), branches.get(Label::One))
        };
        let root_zero_decision = decision.get(&root_zero_child).copied().flatten();
        let root_one_decision = decision.get(&root_one_child).copied().flatten();

        match (root_zero_decision, root_one_decision) {
            (Some(z), Some(o)) => {
                if z != root_zero_child {
                    self.set_branch(root, Label::Zero, z);
                }
                if o != root_one_child {
                    self.set_branch(root, Label::One, o);
                }
            }
            // Only one branch survived: every key through the other one was
            // entirely the marker, so it carried no real answer to lose.
            // Route both branches at the surviving subtree instead of
            // discarding it along with the collapsed half.
            (Some(z), None) => {
                if z != root_zero_child {
                    self.set_branch(root, Label::Zero, z);
                }
                self.set_branch(root, Label::One, z);
            }
            (None, Some(o)) => {
                self.set_branch(root, Label::Zero, o);
                if o != root_one_child {
                    self.set_branch(root, Label::One, o);
                }
            }
            (None, None) => {
                debug!("pruning with marker `{marker}` collapsed the entire diagram");
                self.empty = true;
            }
        }

        self.garbage_collect();
        self.validate_if_configured()?;
        Ok(())
    }

    /// Shared by the internal-level loop: given a node's original two
    /// children and their already-resolved prune decisions, decides what
    /// this node becomes — discarded, a passthrough to whichever child
    /// survived, an elimination into the common surviving child, or itself
    /// (with branches rewired to the resolved targets).
    fn resolve_prune_decision(
        &mut self,
        id: NodeId,
        zero_child: NodeId,
        one_child: NodeId,
        zero_decision: Option<NodeId>,
        one_decision: Option<NodeId>,
    ) -> Option<NodeId> {
        match (zero_decision, one_decision) {
            (None, None) => None,
            (Some(z), None) => Some(z),
            (None, Some(o)) => Some(o),
            (Some(z), Some(o)) if z == o => Some(z),
            (Some(z), Some(o)) => {
                if z != zero_child {
                    self.set_branch(id, Label::Zero, z);
                }
                if o != one_child {
                    self.set_branch(id, Label::One, o);
                }
                Some(id)
            }
        }
    }
}
