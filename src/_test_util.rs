//! Shared fixtures for the integration-style suites under `_test_bdd/`,
//! mirroring the teacher crate's `_test_util` convention of keeping test
//! data builders out of the files that use them.

use std::collections::BTreeMap;

use crate::builder::create_bdd_from_truth_table;
use crate::diagram::Diagram;
use crate::resolve::Resolvers;
use crate::truth_table::TruthTable;

/// A 5-variable table equivalent to the Boolean formula `v3 & !v4`
/// (1-indexed in formula notation, 0-indexed as bits `v[2]` and `v[3]`):
/// `"yes"` when bit 2 is `1` and bit 3 is `0`, `"no"` otherwise. Named after
/// the teacher crate's `mk_small_test_bdd`, which encodes the same formula.
pub fn mk_5_variable_table() -> TruthTable {
    let mut rows = BTreeMap::new();
    for i in 0u32..32 {
        let key: String = (0..5).map(|b| if (i >> (4 - b)) & 1 == 1 { '1' } else { '0' }).collect();
        let bits: Vec<char> = key.chars().collect();
        let value = if bits[2] == '1' && bits[3] == '0' { "yes" } else { "no" };
        rows.insert(key, value.to_string());
    }
    TruthTable::new(rows).unwrap()
}

pub fn mk_small_test_bdd() -> Diagram {
    create_bdd_from_truth_table(&mk_5_variable_table()).unwrap()
}

/// Resolvers that read bit `i` of the state string literally, used whenever
/// a test doesn't care about resolver semantics beyond "decode the key back
/// out of the diagram".
pub fn bit_resolvers(num_vars: usize) -> Resolvers {
    let mut resolvers = Resolvers::new();
    for i in 0..num_vars {
        resolvers.insert(i, move |state: &str| {
            state
                .as_bytes()
                .get(i)
                .map(|&b| b == b'1')
                .ok_or_else(|| format!("state `{state}` has no bit at index {i}"))
        });
    }
    resolvers
}

pub fn table_from(pairs: &[(&str, &str)]) -> TruthTable {
    let rows: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TruthTable::new(rows).unwrap()
}
