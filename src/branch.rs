use std::fmt;

use crate::error::BddError;
use crate::node_id::NodeId;

/// One of the two outgoing edges of a [`Root`](crate::node::Node) or
/// [`Internal`](crate::node::Node) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Zero,
    One,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Zero => "0",
            Label::One => "1",
        }
    }

    pub fn from_str(label: &str) -> Result<Self, BddError> {
        match label {
            "0" => Ok(Label::Zero),
            "1" => Ok(Label::One),
            _ => Err(BddError::UnknownBranchLabel {
                label: label.to_string(),
            }),
        }
    }

    /// The label corresponding to a resolver's boolean answer.
    pub fn from_bool(bit: bool) -> Self {
        if bit {
            Label::One
        } else {
            Label::Zero
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two-slot child holder owned by exactly one `Root` or `Internal` node.
///
/// `Branches` itself never touches a [`crate::parent_set::ParentSet`] — it
/// has no access to the arena that owns the other nodes. Keeping both
/// branch pointers and parent bookkeeping in sync atomically is the job of
/// `Diagram::set_branch`, the single call site that mutates a `Branches`
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branches {
    zero: NodeId,
    one: NodeId,
}

impl Branches {
    pub fn new(zero: NodeId, one: NodeId) -> Self {
        Branches { zero, one }
    }

    pub fn get(&self, label: Label) -> NodeId {
        match label {
            Label::Zero => self.zero,
            Label::One => self.one,
        }
    }

    pub(crate) fn set(&mut self, label: Label, child: NodeId) {
        match label {
            Label::Zero => self.zero = child,
            Label::One => self.one = child,
        }
    }

    /// True iff both branches point at the **same node by identity**.
    pub fn has_equal_branches(&self) -> bool {
        self.zero == self.one
    }
}
