use thiserror::Error;

use crate::node_id::NodeId;

/// All failure modes of the engine, grouped by the three kinds described in
/// the design: precondition violations (bad input, caller's fault),
/// invariant violations (the diagram is structurally broken, an engine
/// bug), and resolver failures (a caller-supplied predicate misbehaved).
#[derive(Debug, Error)]
pub enum BddError {
    #[error("truth table is missing the key `{key}` (table must enumerate every {num_vars}-bit key)")]
    MissingTruthTableKey { key: String, num_vars: usize },

    #[error("truth table key `{key}` has length {actual}, expected {expected}")]
    InconsistentKeyLength {
        key: String,
        expected: usize,
        actual: usize,
    },

    #[error("truth table value for key `{key}` is empty")]
    EmptyValue { key: String },

    #[error("truth table must have at least one variable (N >= 1)")]
    ZeroVariables,

    #[error("unknown branch label `{label}` (expected \"0\" or \"1\")")]
    UnknownBranchLabel { label: String },

    #[error("cannot resolve: diagram has no defined value (all leaves were pruned)")]
    EmptyDiagram,

    #[error("invariant violated at node {node}: {detail}")]
    InvariantViolation { node: NodeId, detail: String },

    #[error("resolver for variable {variable} (node {node}) failed: {detail}")]
    ResolverFailure {
        variable: usize,
        node: NodeId,
        detail: String,
    },
}

pub type BddResult<T> = Result<T, BddError>;
