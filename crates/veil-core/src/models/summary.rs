use serde::{Deserialize, Serialize};

/// Facts about a completed anonymization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Data rows read from the source (header and blank lines excluded).
    pub input_rows: usize,
    /// Rows written to the sink.
    pub output_rows: usize,
    /// Rows dropped because their group stayed below k. At most k.
    pub suppressed_rows: usize,
    /// Generalization rounds performed.
    pub rounds: usize,
    /// Final generalization level per quasi-identifier, in caller order.
    pub final_levels: Vec<(String, usize)>,
}
