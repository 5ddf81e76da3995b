//! # veil-core
//!
//! Foundation crate for the veil k-anonymization toolkit.
//! Defines the error taxonomy, the capability traits implemented by table
//! and hierarchy providers, and the shared data models.
//! Every other crate in the workspace depends on this.

pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use errors::{VeilError, VeilResult};
pub use models::{AnonymizationParams, Row, RunSummary, Schema};
pub use traits::{Generalized, IHierarchy, ITableSink, ITableSource};
