use std::collections::BTreeMap;

use crate::error::BddError;

/// A total mapping from every binary string of a fixed length `N` to a
/// non-empty opaque output value (spec.md §4.1). `N` is derived from the
/// key length and must be at least 1.
///
/// Construction validates completeness: every one of the `2^N` possible
/// keys must be present, and no value may be empty. Keys that are not
/// well-formed binary strings, or whose length disagrees with the table's
/// own `N`, are rejected.
#[derive(Debug, Clone)]
pub struct TruthTable {
    num_vars: usize,
    rows: BTreeMap<String, String>,
}

impl TruthTable {
    /// Validates `rows` and wraps it. `rows` need not be presented in any
    /// particular order, but must contain exactly the `2^N` keys implied by
    /// the length of its first key.
    pub fn new(rows: BTreeMap<String, String>) -> Result<Self, BddError> {
        let num_vars = match rows.keys().next() {
            Some(first) => first.len(),
            None => return Err(BddError::ZeroVariables),
        };
        if num_vars == 0 {
            return Err(BddError::ZeroVariables);
        }

        for (key, value) in &rows {
            if key.len() != num_vars {
                return Err(BddError::InconsistentKeyLength {
                    key: key.clone(),
                    expected: num_vars,
                    actual: key.len(),
                });
            }
            if !key.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(BddError::InconsistentKeyLength {
                    key: key.clone(),
                    expected: num_vars,
                    actual: key.len(),
                });
            }
            if value.is_empty() {
                return Err(BddError::EmptyValue { key: key.clone() });
            }
        }

        let expected_count = 1usize
            .checked_shl(num_vars as u32)
            .expect("num_vars too large for this platform's usize");
        for bits in 0..expected_count {
            let key = format_key(bits, num_vars);
            if !rows.contains_key(&key) {
                return Err(BddError::MissingTruthTableKey { key, num_vars });
            }
        }

        Ok(TruthTable { num_vars, rows })
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.rows.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn format_key(bits: usize, num_vars: usize) -> String {
    format!("{:0width$b}", bits, width = num_vars)
}
