use fxhash::FxHashMap;

use crate::branch::Label;
use crate::diagram::Diagram;
use crate::error::BddError;
use crate::node::Node;
use crate::node_id::NodeId;

/// A caller-supplied predicate bound to one variable of the diagram. Takes
/// the original full external state and answers the Boolean question that
/// variable's branch decides between. Returning `Err` surfaces as a
/// `BddError::ResolverFailure` carrying the variable index and node id —
/// `resolve` adds that context, the resolver's own message is passed
/// through unchanged (spec.md §7).
pub type ResolverFn = dyn Fn(&str) -> Result<bool, String>;

/// A mapping from variable index `i` in `[0, N-1]` to its resolver
/// (spec.md §4.8).
#[derive(Default)]
pub struct Resolvers {
    by_variable: FxHashMap<usize, Box<ResolverFn>>,
}

impl Resolvers {
    pub fn new() -> Self {
        Resolvers {
            by_variable: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, variable: usize, resolver: impl Fn(&str) -> Result<bool, String> + 'static) -> &mut Self {
        self.by_variable.insert(variable, Box::new(resolver));
        self
    }

    pub fn get(&self, variable: usize) -> Option<&ResolverFn> {
        self.by_variable.get(&variable).map(|b| b.as_ref())
    }
}

impl Diagram {
    /// Descends from the root, calling the resolver for each node's
    /// variable (the node's own level — root is variable 0, the internal
    /// node at level `L` is variable `L`) to pick a branch, until a leaf is
    /// reached, and returns that leaf's value.
    ///
    /// `resolve(resolvers, key) == table[key]` must hold for every key
    /// before and after `minimize` and `remove_irrelevant_leaf_nodes`,
    /// provided resolver `i` of `key` returns the `i`-th bit of `key`.
    pub fn resolve(&self, resolvers: &Resolvers, state: &str) -> Result<String, BddError> {
        if self.is_empty() {
            return Err(BddError::EmptyDiagram);
        }

        let mut current: NodeId = self.root_id();
        loop {
            let node = self.get_node(current);
            match node {
                Node::Leaf { value, .. } => return Ok(value.clone()),
                _ => {
                    let variable = node.level(self.num_vars());
                    let resolver = resolvers.get(variable).ok_or_else(|| {
                        BddError::ResolverFailure {
                            variable,
                            node: current,
                            detail: "no resolver registered for this variable".to_string(),
                        }
                    })?;
                    let bit = resolver(state).map_err(|detail| BddError::ResolverFailure {
                        variable,
                        node: current,
                        detail,
                    })?;
                    let branches = node
                        .branches()
                        .expect("non-leaf node always owns a Branches container");
                    current = branches.get(Label::from_bool(bit));
                }
            }
        }
    }
}
