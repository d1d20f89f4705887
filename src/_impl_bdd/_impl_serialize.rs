use serde_json::{json, Value};

use crate::branch::Label;
use crate::diagram::Diagram;
use crate::node::Node;
use crate::node_id::NodeId;

impl Diagram {
    /// A stable plain representation of the diagram: the root expands into
    /// a nested object with `"0"`/`"1"` keys at internal nodes and a
    /// `"value"` key at leaves. When `include_ids` is true every node also
    /// carries its `"id"`.
    ///
    /// This is lossy with respect to sharing — a node referenced from two
    /// parents is re-expanded at both call sites — which is why it is used
    /// for equality comparisons and the "no marker string anywhere"
    /// assertion rather than as a general persistence format (spec.md
    /// §4.10/§6).
    pub fn to_json(&self, include_ids: bool) -> Value {
        if self.is_empty() {
            return Value::Null;
        }
        node_to_json(self, self.root_id(), include_ids)
    }
}

fn node_to_json(diagram: &Diagram, id: NodeId, include_ids: bool) -> Value {
    let node = diagram.get_node(id);
    match node {
        Node::Leaf { value, .. } => {
            if include_ids {
                json!({ "id": id.to_string(), "value": value })
            } else {
                json!({ "value": value })
            }
        }
        Node::Root { branches } | Node::Internal { branches, .. } => {
            let zero = node_to_json(diagram, branches.get(Label::Zero), include_ids);
            let one = node_to_json(diagram, branches.get(Label::One), include_ids);
            if include_ids {
                json!({ "id": id.to_string(), "0": zero, "1": one })
            } else {
                json!({ "0": zero, "1": one })
            }
        }
    }
}
