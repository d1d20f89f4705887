use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::_test_util::bit_resolvers;
use crate::builder::create_bdd_from_truth_table;
use crate::config::BddConfig;
use crate::truth_table::TruthTable;
use crate::validate::ensure_correct_bdd;

const VALUES: [&str; 3] = ["a", "b", "MARKER"];

/// A random complete truth table of depth 1..=8, drawing each row's value
/// from a small fixed vocabulary (including the pruning marker, so pruning
/// properties get exercised too).
fn arb_truth_table() -> impl Strategy<Value = TruthTable> {
    (1usize..=8).prop_flat_map(|num_vars| {
        let row_count = 1usize << num_vars;
        prop::collection::vec(prop::sample::select(&VALUES[..]), row_count).prop_map(move |values| {
            let rows: BTreeMap<String, String> = values
                .into_iter()
                .enumerate()
                .map(|(bits, value)| (format!("{:0width$b}", bits, width = num_vars), value.to_string()))
                .collect();
            TruthTable::new(rows).unwrap()
        })
    })
}

proptest! {
    /// spec.md §8 property 1: `resolve` matches the source table for every
    /// key, both immediately after build and after `minimize`.
    #[test]
    fn resolve_matches_table_before_and_after_minimize(table in arb_truth_table()) {
        let _ = env_logger::builder().is_test(true).try_init();
        let resolvers = bit_resolvers(table.num_vars());

        let diagram = create_bdd_from_truth_table(&table).unwrap();
        for (key, value) in table.iter() {
            prop_assert_eq!(diagram.resolve(&resolvers, key).unwrap(), value);
        }

        let mut minimized = create_bdd_from_truth_table(&table).unwrap();
        minimized.minimize(true).unwrap();
        for (key, value) in table.iter() {
            prop_assert_eq!(minimized.resolve(&resolvers, key).unwrap(), value);
        }
    }

    /// spec.md §8 property 2: `minimize` never increases the node count.
    #[test]
    fn minimize_is_monotonically_non_increasing(table in arb_truth_table()) {
        let before = create_bdd_from_truth_table(&table).unwrap().count_nodes();
        let mut diagram = create_bdd_from_truth_table(&table).unwrap();
        diagram.minimize(true).unwrap();
        prop_assert!(diagram.count_nodes() <= before);
    }

    /// spec.md §8 property 3: after `minimize(true)`, no two distinct nodes
    /// at the same level are similar to each other.
    #[test]
    fn minimized_diagram_has_no_similar_siblings(table in arb_truth_table()) {
        let mut diagram = create_bdd_from_truth_table(&table).unwrap();
        diagram.minimize(true).unwrap();

        for (_level, ids) in diagram.levels() {
            for &id in ids {
                let rest: Vec<_> = ids.iter().copied().filter(|&other| other != id).collect();
                prop_assert_eq!(diagram.find_similar_node(id, &rest), None);
            }
        }
    }

    /// spec.md §8 property 4: after pruning a marker value, no surviving
    /// leaf carries it (or the diagram is empty, if every row was it).
    #[test]
    fn pruning_removes_every_trace_of_the_marker(table in arb_truth_table()) {
        let mut diagram = create_bdd_from_truth_table(&table).unwrap();
        diagram.remove_irrelevant_leaf_nodes("MARKER").unwrap();

        if !diagram.is_empty() {
            for &leaf in diagram.get_leaf_nodes() {
                prop_assert_ne!(diagram.get_node(leaf).value().unwrap(), "MARKER");
            }
        }
    }

    /// spec.md §8 property 5: the validator accepts the diagram after every
    /// stage of build, minimize, and prune, in sequence.
    #[test]
    fn validator_accepts_every_stage(table in arb_truth_table()) {
        let mut diagram = crate::builder::create_bdd_from_truth_table_with_config(
            &table,
            BddConfig::always_validate(),
        ).unwrap();
        ensure_correct_bdd(&diagram).unwrap();

        diagram.minimize(true).unwrap();
        ensure_correct_bdd(&diagram).unwrap();

        diagram.remove_irrelevant_leaf_nodes("MARKER").unwrap();
        ensure_correct_bdd(&diagram).unwrap();
    }
}
