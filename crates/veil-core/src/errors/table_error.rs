use std::path::PathBuf;

/// Table-layer errors: schema lookups and delimited file access.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("attribute '{name}' does not exist in the table schema")]
    UnknownAttribute { name: String },

    #[error("cannot access table file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data in '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("table file '{path}' has no header line")]
    MissingHeader { path: PathBuf },
}
