use std::cmp::Ordering;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of mutation a [`ChangeEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

/// One document mutation to classify against a standing query.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub operation: Operation,
    /// The document's state after the mutation. For a `Delete`, this is
    /// the document's last known state before removal (there is nothing
    /// else to report it as).
    pub doc: Value,
    /// The document's state before the mutation. `None` on `Insert`, since
    /// there is no prior state.
    pub previous: Option<Value>,
    pub id: String,
}

/// A compiled MongoDB-style selector/sort/limit/skip, plus the query's
/// current result window. Building the selector predicate and sort
/// comparator from an actual Mongo-style query language is out of scope
/// (spec.md §1's "MongoDB-style query shim" Non-goal) — `QueryParams` takes
/// them already compiled, exactly the way [`crate::resolve::Resolvers`]
/// takes its branch predicates already compiled.
pub struct QueryParams<'a> {
    matches_selector: Box<dyn Fn(&Value) -> bool + 'a>,
    compare: Box<dyn Fn(&Value, &Value) -> Ordering + 'a>,
    sort_fields: Vec<String>,
    limit: Option<usize>,
    /// Ids of the documents in the query's result window before this
    /// change, in sort order. Full documents for these ids are looked up
    /// in the `key_document_map` passed to [`classify_change_event`].
    previous_result_ids: Vec<String>,
}

impl<'a> QueryParams<'a> {
    pub fn new(
        matches_selector: impl Fn(&Value) -> bool + 'a,
        compare: impl Fn(&Value, &Value) -> Ordering + 'a,
        sort_fields: Vec<String>,
        limit: Option<usize>,
        previous_result_ids: Vec<String>,
    ) -> Self {
        QueryParams {
            matches_selector: Box::new(matches_selector),
            compare: Box::new(compare),
            sort_fields,
            limit,
            previous_result_ids,
        }
    }
}

/// The stable, ordered set of classifying predicates (spec.md §4.11). This
/// order is exactly the order of bits `classify_change_event` returns, and
/// must agree with whatever resolver indices a consumer binds to the BDD
/// built from this state table's truth table.
pub const PREDICATE_NAMES: [&str; 8] = [
    "was_in_result",
    "was_sorted_after_last",
    "was_sorted_before_first",
    "sort_params_changed",
    "matched_selector_before",
    "matched_selector_after",
    "limit_reached",
    "is_delete",
];

/// Computes the fixed-size bit vector of classifying predicates that feeds
/// the truth table the BDD engine was built from. `key_document_map` lets
/// the result-window predicates below look up the full document behind an
/// id in `query.previous_result_ids`; ids missing from the map are treated
/// as "unknown, predicate defaults to false" rather than a hard error,
/// since a stale id in the result window is a normal transient state, not
/// a precondition violation.
pub fn classify_change_event(
    event: &ChangeEvent,
    query: &QueryParams,
    key_document_map: &FxHashMap<String, Value>,
) -> Vec<bool> {
    let was_in_result = query.previous_result_ids.iter().any(|id| id == &event.id);

    let was_sorted_after_last = event
        .previous
        .as_ref()
        .zip(query.previous_result_ids.last())
        .and_then(|(prev, last_id)| key_document_map.get(last_id).map(|last| (prev, last)))
        .map(|(prev, last)| (query.compare)(prev, last) == Ordering::Greater)
        .unwrap_or(false);

    let was_sorted_before_first = event
        .previous
        .as_ref()
        .zip(query.previous_result_ids.first())
        .and_then(|(prev, first_id)| key_document_map.get(first_id).map(|first| (prev, first)))
        .map(|(prev, first)| (query.compare)(prev, first) == Ordering::Less)
        .unwrap_or(false);

    // Open Question resolution (spec.md §9): "true iff any sort field's
    // value differs between doc and previous"; an Insert has no previous
    // state to compare against, so it conservatively counts as changed.
    let sort_params_changed = match &event.previous {
        None => true,
        Some(previous) => query
            .sort_fields
            .iter()
            .any(|field| field_value(&event.doc, field) != field_value(previous, field)),
    };

    let matched_selector_before = match (event.operation, &event.previous) {
        (Operation::Insert, _) => false,
        (_, Some(previous)) => (query.matches_selector)(previous),
        (_, None) => false,
    };

    let matched_selector_after = match event.operation {
        Operation::Delete => false,
        _ => (query.matches_selector)(&event.doc),
    };

    let limit_reached = query
        .limit
        .map(|limit| query.previous_result_ids.len() >= limit)
        .unwrap_or(false);

    let is_delete = event.operation == Operation::Delete;

    vec![
        was_in_result,
        was_sorted_after_last,
        was_sorted_before_first,
        sort_params_changed,
        matched_selector_before,
        matched_selector_after,
        limit_reached,
        is_delete,
    ]
}

fn field_value<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    field.split('.').try_fold(doc, |acc, part| acc.get(part))
}
