//! Input data model: labeled samples and per-condition category counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed count per category label for one condition.
///
/// A `BTreeMap` keeps category iteration sorted, which keeps chi-square sums
/// reproducible across runs.
pub type ContingencyTable = BTreeMap<String, u64>;

/// One condition's measurements on a single variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledGroup {
    /// Condition name, e.g. "formal" or "informal".
    pub label: String,
    pub values: Vec<f64>,
}

impl LabeledGroup {
    pub fn new(label: &str, values: &[f64]) -> Self {
        Self {
            label: label.to_string(),
            values: values.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
