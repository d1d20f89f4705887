use std::collections::BTreeMap;

use fxhash::{FxHashMap, FxHashSet};

use crate::branch::{Branches, Label};
use crate::config::BddConfig;
use crate::error::BddError;
use crate::node::Node;
use crate::node_id::{NodeId, NodeIdGen};
use crate::validate::ensure_correct_bdd;

/// The top-level owner of one binary decision diagram: the node arena, the
/// level index, and the root. `Diagram` is the only thing that may mutate a
/// `Branches` value or a `ParentSet` — both of those types are otherwise
/// inert data held inside a `Node`.
///
/// A node is "in" the diagram iff it is reachable from `root`; `levels` and
/// `nodes` are derived views kept in lock-step with that reachable set on
/// every mutation (spec.md §3, invariant 6). `fxhash` is used for the node
/// arena because this is the lookup hit on every `get_node` call during
/// reduction and resolution.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub(crate) root: NodeId,
    pub(crate) nodes: FxHashMap<NodeId, Node>,
    pub(crate) levels: BTreeMap<usize, Vec<NodeId>>,
    pub(crate) num_vars: usize,
    pub(crate) id_gen: NodeIdGen,
    pub(crate) config: BddConfig,
    /// Set once every leaf has been pruned away by
    /// `remove_irrelevant_leaf_nodes` and the diagram has no defined value
    /// left (spec.md §4.9's under-specified "every leaf is the marker"
    /// corner case). `resolve` fails with `BddError::EmptyDiagram` while
    /// this is set.
    pub(crate) empty: bool,
}

impl Diagram {
    pub(crate) fn new(num_vars: usize, config: BddConfig) -> Self {
        Diagram {
            root: NodeId::from_raw(0),
            nodes: FxHashMap::default(),
            levels: BTreeMap::new(),
            num_vars,
            id_gen: NodeIdGen::default(),
            config,
            empty: false,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn config(&self) -> BddConfig {
        self.config
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root's branch container, for navigating the diagram manually.
    pub fn branches(&self) -> &Branches {
        self.get_node(self.root)
            .branches()
            .expect("root always owns a Branches container")
    }

    pub fn get_node(&self, id: NodeId) -> &Node {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("dangling node id {id} in diagram"))
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("dangling node id {id} in diagram"))
    }

    pub fn try_get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Total reachable node count, leaves included.
    pub fn count_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes at level `level`, in insertion order. Empty slice if the level
    /// has no nodes (e.g. after minimize has collapsed it entirely).
    pub fn get_nodes_of_level(&self, level: usize) -> &[NodeId] {
        self.levels
            .get(&level)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_leaf_nodes(&self) -> &[NodeId] {
        self.get_nodes_of_level(self.num_vars)
    }

    pub fn levels(&self) -> impl Iterator<Item = (usize, &[NodeId])> {
        self.levels.iter().map(|(&l, v)| (l, v.as_slice()))
    }

    /// Inserts a freshly built node, assigning it a fresh `NodeId` and
    /// recording it in the level index. Does not wire up any parent edges
    /// — the caller is responsible for that via `set_branch`/direct
    /// `ParentSet` mutation during the initial build, where edges are
    /// created alongside the nodes they point at.
    pub(crate) fn insert_node(&mut self, level: usize, node: Node) -> NodeId {
        let id = self.id_gen.fresh();
        self.nodes.insert(id, node);
        self.levels.entry(level).or_default().push(id);
        id
    }

    /// Removes a node from both the arena and its level bucket. The caller
    /// must have already rewired every edge that pointed at it.
    pub(crate) fn remove_node(&mut self, level: usize, id: NodeId) {
        self.nodes.remove(&id);
        if let Some(bucket) = self.levels.get_mut(&level) {
            bucket.retain(|&n| n != id);
            if bucket.is_empty() {
                self.levels.remove(&level);
            }
        }
    }

    /// Atomically repoints `parent`'s `label` branch at `new_child`,
    /// updating `new_child`'s parent set (gains one edge) and the prior
    /// child's parent set (loses one edge) together. This is the single
    /// call site that keeps `Branches` and `ParentSet` bookkeeping exact,
    /// including when `new_child` already occupies the other branch of
    /// `parent` (multiplicity becomes 2).
    pub(crate) fn set_branch(&mut self, parent: NodeId, label: Label, new_child: NodeId) {
        let old_child = {
            let parent_node = self.get_node_mut(parent);
            let branches = parent_node
                .branches_mut()
                .expect("set_branch called on a leaf");
            let old = branches.get(label);
            branches.set(label, new_child);
            old
        };

        if let Some(parents) = self.get_node_mut(old_child).parents_mut() {
            parents.remove(parent, label);
        }
        if let Some(parents) = self.get_node_mut(new_child).parents_mut() {
            parents.add(parent, label);
        }
    }

    /// Runs the full-graph validator if `config.validate_after_mutation` is
    /// set, surfacing any invariant violation to the caller.
    pub(crate) fn validate_if_configured(&self) -> Result<(), BddError> {
        if self.config.validate_after_mutation {
            ensure_correct_bdd(self)?;
        }
        Ok(())
    }

    /// Every node id reachable from `root` by following branches. Empty if
    /// the diagram has been marked empty.
    pub(crate) fn reachable_ids(&self) -> FxHashSet<NodeId> {
        let mut seen = FxHashSet::default();
        if self.empty {
            return seen;
        }
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.try_get_node(id) {
                if let Some(branches) = node.branches() {
                    stack.push(branches.get(Label::Zero));
                    stack.push(branches.get(Label::One));
                }
            }
        }
        seen
    }

    /// Drops every node not reachable from `root` out of both the arena and
    /// the level index (spec.md §5: "unreachable nodes must be dropped...
    /// as part of the mutation that orphans them, not lazily"). Called
    /// after reduction, elimination, and pruning passes that may leave
    /// nodes stranded.
    ///
    /// Also scrubs every surviving node's `ParentSet` of entries whose
    /// parent no longer exists: a node being merged away only rewires the
    /// edges *pointing at it*, not the `(it, label)` entries its own
    /// branches left behind in its children's parent sets, so those
    /// up-references go stale the moment the node they name is removed.
    pub(crate) fn garbage_collect(&mut self) {
        if self.empty {
            self.nodes.clear();
            self.levels.clear();
            return;
        }
        let reachable = self.reachable_ids();
        self.nodes.retain(|id, _| reachable.contains(id));
        for bucket in self.levels.values_mut() {
            bucket.retain(|id| reachable.contains(id));
        }
        self.levels.retain(|_, bucket| !bucket.is_empty());

        let existing: FxHashSet<NodeId> = self.nodes.keys().copied().collect();
        for node in self.nodes.values_mut() {
            if let Some(parents) = node.parents_mut() {
                parents.retain(|p| existing.contains(&p));
            }
        }
    }
}
