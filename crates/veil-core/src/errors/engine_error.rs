/// Generalization-engine errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A generalization round rewrote nothing: every value of the chosen
    /// attribute already sits at its hierarchy root while groups still
    /// violate k. Further rounds cannot make progress.
    #[error("hierarchy for attribute '{attribute}' is exhausted but groups still violate k")]
    HierarchyExhausted { attribute: String },

    #[error("k must be at least 1, got {k}")]
    InvalidK { k: usize },

    #[error("expected {expected} hierarchies for {expected} quasi-identifiers, got {actual}")]
    HierarchyCountMismatch { expected: usize, actual: usize },

    #[error("hierarchy for '{actual}' supplied where '{expected}' was expected")]
    HierarchyAttributeMismatch { expected: String, actual: String },
}
