use crate::branch::Label;
use crate::diagram::Diagram;
use crate::error::BddError;
use crate::node_id::NodeId;

/// A full-graph audit of every invariant in spec.md §3. Raises a
/// descriptive `BddError::InvariantViolation` naming the offending node and
/// the violated clause on the first problem found. Used directly by tests
/// and, when `BddConfig::validate_after_mutation` is set, after every
/// mutating `Diagram` method.
pub fn ensure_correct_bdd(diagram: &Diagram) -> Result<(), BddError> {
    if diagram.is_empty() {
        // An intentionally emptied diagram (every leaf pruned) has nothing
        // left to check; it simply refuses future `resolve` calls.
        return Ok(());
    }

    let root = diagram.root_id();
    let root_node = diagram.get_node(root);
    if !root_node.is_root() {
        return violation(root, "root id does not refer to a Root node");
    }
    if let Some(parents) = root_node.parents() {
        if !parents.is_empty() {
            return violation(root, "root must have an empty parent set");
        }
    }

    let reachable = diagram.reachable_ids();

    // Invariant 6: levels and nodes exactly match the reachable set.
    let mut indexed_count = 0usize;
    for (level, ids) in diagram.levels() {
        for &id in ids {
            indexed_count += 1;
            if !reachable.contains(&id) {
                return violation(id, "node is indexed at a level but not reachable from root");
            }
            let actual_level = diagram.get_node(id).level(diagram.num_vars());
            if actual_level != level {
                return violation(
                    id,
                    &format!("node is indexed at level {level} but reports level {actual_level}"),
                );
            }
        }
    }
    if indexed_count != diagram.count_nodes() {
        return violation(root, "nodesById and the level index disagree on size");
    }
    for &id in &reachable {
        if diagram.try_get_node(id).is_none() {
            return violation(id, "node is reachable but missing from nodesById");
        }
    }

    for &id in &reachable {
        let node = diagram.get_node(id);
        let level = node.level(diagram.num_vars());

        // Invariant 5: leaves occupy exactly level N, nothing else does.
        if node.is_leaf() && level != diagram.num_vars() {
            return violation(id, "leaf is not at the leaf level");
        }
        if !node.is_leaf() && level == diagram.num_vars() {
            return violation(id, "leaf level contains a non-leaf node");
        }

        // Invariant 4: every internal/root node has two non-null branches,
        // and invariant 2: every edge points strictly downward in level
        // order (standard ROBDD "ordered" requirement). A freshly built,
        // unreduced diagram has every edge go from level L to exactly
        // L+1; `apply_elimination_rule` and `remove_irrelevant_leaf_nodes`
        // legitimately skip levels by rewiring a node's parent directly to
        // its grandchild, which is why this check is "strictly increasing"
        // rather than "exactly one more".
        if let Some(branches) = node.branches() {
            for label in [Label::Zero, Label::One] {
                let child = branches.get(label);
                let child_node = diagram
                    .try_get_node(child)
                    .ok_or_else(|| invariant_error(id, "branch points at a missing node"))?;
                let child_level = child_node.level(diagram.num_vars());
                if child_level <= level {
                    return violation(
                        id,
                        &format!(
                            "edge on branch {label} goes from level {level} to level {child_level}, expected a strictly greater level",
                        ),
                    );
                }
                // Invariant 3 (forward direction): the edge is recorded on
                // the child's parent set.
                let child_parents = child_node
                    .parents()
                    .ok_or_else(|| invariant_error(child, "non-root child has no parent set"))?;
                if !child_parents.has(id) {
                    return violation(
                        child,
                        &format!("missing recorded parent edge from {id} on branch {label}"),
                    );
                }
            }
        }

        // Invariant 3 (reverse direction + non-root parent count): every
        // non-root node has at least one parent, and every recorded parent
        // edge reflects an actual edge.
        if !node.is_root() {
            let parents = node
                .parents()
                .ok_or_else(|| invariant_error(id, "non-root node has no parent set"))?;
            if parents.size() == 0 {
                return violation(id, "non-root node has an empty parent set");
            }
            for &(parent_id, label) in parents.edges() {
                let parent_node = diagram
                    .try_get_node(parent_id)
                    .ok_or_else(|| invariant_error(id, "recorded parent is missing from the diagram"))?;
                let actual_child = parent_node
                    .branches()
                    .ok_or_else(|| invariant_error(parent_id, "recorded parent has no branches"))?
                    .get(label);
                if actual_child != id {
                    return violation(
                        id,
                        &format!("recorded parent edge from {parent_id} on branch {label} does not point back here"),
                    );
                }
            }
        }
    }

    Ok(())
}

fn invariant_error(node: NodeId, detail: &str) -> BddError {
    BddError::InvariantViolation {
        node,
        detail: detail.to_string(),
    }
}

fn violation(node: NodeId, detail: &str) -> Result<(), BddError> {
    Err(invariant_error(node, detail))
}
