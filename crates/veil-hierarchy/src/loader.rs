//! CSV chain loader: one leaf-to-root chain per line.

use std::fs::File;
use std::path::Path;

use veil_core::errors::HierarchyError;

use crate::Hierarchy;

impl Hierarchy {
    /// Load a hierarchy for `attribute` from the chain file at `path`.
    ///
    /// Blank lines are skipped; a chain containing an empty value is a
    /// malformed file. The file handle is released before this returns.
    pub fn from_csv(
        path: impl AsRef<Path>,
        attribute: impl Into<String>,
    ) -> Result<Self, HierarchyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HierarchyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut hierarchy = Hierarchy::new(attribute);
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|source| HierarchyError::Malformed {
                path: path.to_path_buf(),
                line: line + 1,
                reason: source.to_string(),
            })?;
            let chain: Vec<&str> = record.iter().map(str::trim).collect();
            if chain.len() == 1 && chain[0].is_empty() {
                continue;
            }
            if chain.iter().any(|value| value.is_empty()) {
                return Err(HierarchyError::Malformed {
                    path: path.to_path_buf(),
                    line: line + 1,
                    reason: "empty value in generalization chain".to_string(),
                });
            }
            hierarchy.insert_chain(&chain)?;
        }
        Ok(hierarchy)
    }
}
