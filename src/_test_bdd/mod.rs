//! Integration-style suites that exercise more than one module together,
//! kept out of the unit `#[cfg(test)]` blocks in each source file the way
//! the teacher crate's `_test_bdd` directory separates cross-cutting
//! scenarios from single-file unit tests.

mod _test_lifecycle;
mod _test_properties;
mod _test_state_classifier;
