use serde::{Deserialize, Serialize};

/// Parameters of one anonymization run: the quasi-identifier attributes,
/// in caller order, and the anonymity level k.
///
/// The caller order matters: it is the deterministic tie-break when two
/// attribute domains have the same cardinality. Validation (k ≥ 1,
/// hierarchy wiring) happens at engine construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizationParams {
    pub quasi_identifiers: Vec<String>,
    pub k: usize,
}

impl AnonymizationParams {
    pub fn new(quasi_identifiers: Vec<String>, k: usize) -> Self {
        Self {
            quasi_identifiers,
            k,
        }
    }
}
