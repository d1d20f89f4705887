use pretty_assertions::assert_eq;

use crate::_test_util::{bit_resolvers, mk_5_variable_table, table_from};
use crate::builder::create_bdd_from_truth_table_with_config;
use crate::config::BddConfig;
use crate::validate::ensure_correct_bdd;

/// Build, minimize, and prune the same diagram in sequence, checking after
/// every step that the validator is satisfied and that every key still
/// resolves to the value the original table assigned it (or, for pruned
/// keys, no longer resolves to the pruned marker).
#[test]
fn full_pipeline_preserves_resolution_and_invariants() {
    let table = table_from(&[
        ("000", "red"),
        ("001", "red"),
        ("010", "SKIP"),
        ("011", "red"),
        ("100", "blue"),
        ("101", "blue"),
        ("110", "blue"),
        ("111", "blue"),
    ]);
    let resolvers = bit_resolvers(3);

    let mut diagram = create_bdd_from_truth_table_with_config(&table, BddConfig::always_validate()).unwrap();
    ensure_correct_bdd(&diagram).unwrap();
    let built_count = diagram.count_nodes();

    diagram.minimize(true).unwrap();
    ensure_correct_bdd(&diagram).unwrap();
    assert!(diagram.count_nodes() <= built_count, "minimize must not grow the diagram");

    diagram.remove_irrelevant_leaf_nodes("SKIP").unwrap();
    ensure_correct_bdd(&diagram).unwrap();

    for (key, value) in table.iter() {
        if value == "SKIP" {
            continue;
        }
        assert_eq!(diagram.resolve(&resolvers, key).unwrap(), value);
    }
    for &leaf in diagram.get_leaf_nodes() {
        assert_ne!(diagram.get_node(leaf).value().unwrap(), "SKIP");
    }
}

#[test]
fn minimized_5_variable_diagram_still_answers_every_key() {
    let table = mk_5_variable_table();
    let resolvers = bit_resolvers(5);
    let mut diagram = create_bdd_from_truth_table_with_config(&table, BddConfig::always_validate()).unwrap();

    diagram.minimize(true).unwrap();
    ensure_correct_bdd(&diagram).unwrap();

    for (key, value) in table.iter() {
        assert_eq!(diagram.resolve(&resolvers, key).unwrap(), value);
    }
}
