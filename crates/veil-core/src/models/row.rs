use serde::{Deserialize, Serialize};

/// One data row: ordered attribute values plus the row's stable position
/// among the data rows of its source (header and blank lines excluded).
///
/// Rows are never mutated in place; rewriting a row produces a new one
/// carrying the same index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub index: usize,
    pub values: Vec<String>,
}

impl Row {
    pub fn new(index: usize, values: Vec<String>) -> Self {
        Self { index, values }
    }
}
