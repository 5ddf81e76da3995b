use std::path::PathBuf;

/// Hierarchy-layer errors: DGH file loading and generalization lookups.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("cannot access hierarchy file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed hierarchy file '{path}' at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(
        "hierarchy for '{attribute}' gives value '{value}' two different parents at level {level}"
    )]
    ConflictingParent {
        attribute: String,
        value: String,
        level: usize,
    },

    /// Distinct from exhaustion: the value is missing from the hierarchy
    /// altogether, not sitting at a root.
    #[error("value '{value}' of attribute '{attribute}' has no hierarchy entry at level {level}")]
    UnknownValue {
        attribute: String,
        value: String,
        level: usize,
    },
}
