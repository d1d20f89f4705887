/// In-process knobs that control engine behavior outside the algorithm's
/// own semantics. There is no file or environment-variable configuration
/// layer: the engine has no CLI and no on-disk state (spec.md §6), so
/// `BddConfig` is constructed by the embedding application, not parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BddConfig {
    /// Run [`crate::validate::ensure_correct_bdd`] after every mutating
    /// operation (build, minimize, prune) and fail the operation if it
    /// finds a violation. Spec.md §4.6 describes this as "used in tests
    /// and after every mutation in debug mode" — the default here matches
    /// that: on under `debug_assertions`, off in release builds, where the
    /// extra full-graph walk would cost more than it is worth once the
    /// engine is trusted.
    pub validate_after_mutation: bool,
}

impl Default for BddConfig {
    fn default() -> Self {
        BddConfig {
            validate_after_mutation: cfg!(debug_assertions),
        }
    }
}

impl BddConfig {
    /// Always validate after every mutation, regardless of build profile.
    /// Used by the test suite to pin down exactly which step of a sequence
    /// broke an invariant.
    pub fn always_validate() -> Self {
        BddConfig {
            validate_after_mutation: true,
        }
    }

    /// Never validate automatically. Useful for benchmarking the core
    /// algorithms in isolation from the validator's cost.
    pub fn never_validate() -> Self {
        BddConfig {
            validate_after_mutation: false,
        }
    }
}
