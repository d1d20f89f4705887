//! A reduced, ordered binary decision diagram (ROBDD) engine over
//! string-valued truth tables, plus a change-event classifier that turns
//! document mutations into the Boolean variables such a diagram decides
//! between.
//!
//! The core diagram is a shared DAG, not a tree: nodes keep up-references to
//! every parent that points at them (`ParentSet`), which is what lets
//! reduction, elimination, and don't-care pruning collapse structurally
//! identical or irrelevant subtrees in place rather than rebuilding the
//! whole structure. [`builder::create_bdd_from_truth_table`] builds the
//! initial unreduced tree; [`diagram::Diagram::minimize`] then runs the
//! reduction and elimination rules to a fixed point.
//!
//! ```
//! use std::collections::BTreeMap;
//! use bdd_engine::builder::create_bdd_from_truth_table;
//! use bdd_engine::resolve::Resolvers;
//! use bdd_engine::truth_table::TruthTable;
//!
//! let mut rows = BTreeMap::new();
//! rows.insert("0".to_string(), "off".to_string());
//! rows.insert("1".to_string(), "on".to_string());
//! let table = TruthTable::new(rows).unwrap();
//!
//! let mut diagram = create_bdd_from_truth_table(&table).unwrap();
//! diagram.minimize(true).unwrap();
//!
//! let mut resolvers = Resolvers::new();
//! resolvers.insert(0, |state: &str| Ok(state == "1"));
//! assert_eq!(diagram.resolve(&resolvers, "1").unwrap(), "on");
//! ```

pub mod branch;
pub mod builder;
pub mod config;
pub mod diagram;
pub mod error;
pub mod node;
pub mod node_id;
pub mod parent_set;
pub mod prune;
pub mod resolve;
pub mod state_classifier;
pub mod truth_table;
pub mod validate;

mod _impl_bdd;

#[cfg(test)]
mod _test_util;
#[cfg(test)]
mod _test_bdd;

pub use branch::{Branches, Label};
pub use builder::{create_bdd_from_truth_table, create_bdd_from_truth_table_with_config};
pub use config::BddConfig;
pub use diagram::Diagram;
pub use error::{BddError, BddResult};
pub use node::Node;
pub use node_id::NodeId;
pub use resolve::{ResolverFn, Resolvers};
pub use state_classifier::{classify_change_event, ChangeEvent, Operation, QueryParams, PREDICATE_NAMES};
pub use truth_table::TruthTable;
pub use validate::ensure_correct_bdd;
