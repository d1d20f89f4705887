use std::fmt;

/// Stable identifier of a node within one [`crate::Diagram`].
///
/// Equality of two `NodeId`s implies node identity (spec: "Equality of node
/// identifiers implies identity; structural equality is a separate
/// relation"). The wrapped counter is crate-internal; callers should treat
/// `NodeId` as opaque and only compare it, never parse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        NodeId(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Monotonic generator of fresh, never-reused `NodeId`s for one diagram.
#[derive(Debug, Default, Clone)]
pub(crate) struct NodeIdGen {
    next: u64,
}

impl NodeIdGen {
    pub(crate) fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}
