use fxhash::FxHashMap;
use serde_json::json;

use crate::builder::create_bdd_from_truth_table;
use crate::resolve::Resolvers;
use crate::state_classifier::{classify_change_event, ChangeEvent, Operation, QueryParams, PREDICATE_NAMES};
use crate::truth_table::TruthTable;
use std::collections::BTreeMap;

/// Builds a diagram over the 8 classifying predicates that always answers
/// `"notify"` when `is_delete` (the last bit) is set or `was_in_result` (the
/// first bit) is set, and `"ignore"` otherwise — a minimal stand-in for the
/// kind of decision table a consumer would derive from the full state
/// table this classifier feeds.
fn notify_on_membership_or_delete_table() -> TruthTable {
    let mut rows = BTreeMap::new();
    for i in 0u32..(1 << 8) {
        let key: String = (0..8).map(|b| if (i >> (7 - b)) & 1 == 1 { '1' } else { '0' }).collect();
        let bits: Vec<char> = key.chars().collect();
        let was_in_result = bits[0] == '1';
        let is_delete = bits[7] == '1';
        rows.insert(key, if was_in_result || is_delete { "notify" } else { "ignore" }.to_string());
    }
    TruthTable::new(rows).unwrap()
}

fn resolvers_from_bits(bits: &[bool]) -> Resolvers {
    let mut resolvers = Resolvers::new();
    for (i, &bit) in bits.iter().enumerate() {
        resolvers.insert(i, move |_state: &str| Ok(bit));
    }
    resolvers
}

#[test]
fn classified_bits_feed_straight_into_a_diagram_resolve() {
    assert_eq!(PREDICATE_NAMES.len(), 8);
    let table = notify_on_membership_or_delete_table();
    let diagram = create_bdd_from_truth_table(&table).unwrap();

    let event = ChangeEvent {
        operation: Operation::Update,
        doc: json!({"age": 40}),
        previous: Some(json!({"age": 40})),
        id: "doc-1".to_string(),
    };
    let query = QueryParams::new(
        |_doc| true,
        |a, b| a["age"].as_i64().cmp(&b["age"].as_i64()),
        vec!["age".to_string()],
        None,
        vec!["doc-1".to_string()],
    );
    let bits = classify_change_event(&event, &query, &FxHashMap::default());

    let key: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
    let resolvers = resolvers_from_bits(&bits);
    assert_eq!(diagram.resolve(&resolvers, &key).unwrap(), table.get(&key).unwrap());
    assert_eq!(diagram.resolve(&resolvers, &key).unwrap(), "notify");
}

#[test]
fn delete_of_a_document_outside_the_result_window_is_ignored() {
    let table = notify_on_membership_or_delete_table();
    let diagram = create_bdd_from_truth_table(&table).unwrap();

    let event = ChangeEvent {
        operation: Operation::Delete,
        doc: json!({"age": 99}),
        previous: Some(json!({"age": 99})),
        id: "not-in-window".to_string(),
    };
    let query = QueryParams::new(
        |_doc| true,
        |a, b| a["age"].as_i64().cmp(&b["age"].as_i64()),
        vec!["age".to_string()],
        None,
        vec!["doc-1".to_string()],
    );
    let bits = classify_change_event(&event, &query, &FxHashMap::default());
    assert!(!bits[0], "not-in-window id should not count as was_in_result");
    assert!(bits[7], "operation was a delete");

    let key: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
    let resolvers = resolvers_from_bits(&bits);
    // is_delete alone routes to "notify" in this stand-in decision table,
    // even though the document was never in the result window.
    assert_eq!(diagram.resolve(&resolvers, &key).unwrap(), "notify");
}
