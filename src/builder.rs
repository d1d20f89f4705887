use log::trace;

use crate::branch::{Branches, Label};
use crate::config::BddConfig;
use crate::diagram::Diagram;
use crate::error::BddError;
use crate::node::Node;
use crate::parent_set::ParentSet;
use crate::truth_table::TruthTable;

/// Constructs a canonical, **non-reduced**, complete BDD of depth `N` from
/// `table` (spec.md §4.4): a Root at level 0, internal nodes at every
/// level 1..N-1 for every one of the `2^L` paths reaching that level, and
/// one leaf per truth-table row at level `N`. Leaves are not shared across
/// rows at this stage (sharing is the reduction engine's job, not the
/// builder's).
///
/// Uses [`BddConfig::default`]; use [`create_bdd_from_truth_table_with_config`]
/// to control whether the result is validated before being returned.
pub fn create_bdd_from_truth_table(table: &TruthTable) -> Result<Diagram, BddError> {
    create_bdd_from_truth_table_with_config(table, BddConfig::default())
}

pub fn create_bdd_from_truth_table_with_config(
    table: &TruthTable,
    config: BddConfig,
) -> Result<Diagram, BddError> {
    let num_vars = table.num_vars();
    let mut diagram = Diagram::new(num_vars, config);
    let mut path = String::with_capacity(num_vars);

    // `build_recursive` is post-order: every leaf and internal node below
    // the root is inserted before the root itself, so the id it returns is
    // never `NodeId::from_raw(0)` (that id belongs to the deepest leftmost
    // leaf). `Diagram::new` has no real root yet, so it must be set here.
    let root = build_recursive(&mut diagram, table, 0, &mut path)?;
    diagram.root = root;

    diagram.validate_if_configured()?;
    Ok(diagram)
}

fn build_recursive(
    diagram: &mut Diagram,
    table: &TruthTable,
    depth: usize,
    path: &mut String,
) -> Result<crate::node_id::NodeId, BddError> {
    let num_vars = table.num_vars();

    if depth == num_vars {
        let value = table.get(path).ok_or_else(|| BddError::MissingTruthTableKey {
            key: path.clone(),
            num_vars,
        })?;
        let id = diagram.insert_node(
            num_vars,
            Node::Leaf {
                value: value.to_string(),
                parents: ParentSet::new(),
            },
        );
        trace!("built leaf {id} at path {path} with value {value}");
        return Ok(id);
    }

    path.push('0');
    let zero = build_recursive(diagram, table, depth + 1, path)?;
    path.pop();

    path.push('1');
    let one = build_recursive(diagram, table, depth + 1, path)?;
    path.pop();

    let branches = Branches::new(zero, one);
    let node = if depth == 0 {
        Node::Root { branches }
    } else {
        Node::Internal {
            level: depth,
            branches,
            parents: ParentSet::new(),
        }
    };
    let id = diagram.insert_node(depth, node);

    if let Some(parents) = diagram.get_node_mut(zero).parents_mut() {
        parents.add(id, Label::Zero);
    }
    if let Some(parents) = diagram.get_node_mut(one).parents_mut() {
        parents.add(id, Label::One);
    }

    trace!("built node {id} at level {depth} (path prefix {path})");
    Ok(id)
}
