use std::collections::HashMap;

use crate::errors::TableError;

/// Ordered attribute names with name → column-index lookup.
///
/// Duplicate names resolve to the last column carrying them, matching
/// header-derived dictionaries.
#[derive(Debug, Clone)]
pub struct Schema {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Schema {
    pub fn new(names: Vec<String>) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        Self { names, positions }
    }

    /// Attribute names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index of `name`, or `UnknownAttribute` when the schema does
    /// not declare it.
    pub fn column(&self, name: &str) -> Result<usize, TableError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| TableError::UnknownAttribute {
                name: name.to_string(),
            })
    }
}
