//! Error handling for veil.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod engine_error;
pub mod hierarchy_error;
pub mod table_error;

pub use engine_error::EngineError;
pub use hierarchy_error::HierarchyError;
pub use table_error::TableError;

/// Top-level error aggregating all subsystems via `From` conversions.
///
/// Every variant is fatal for the current run: the engine stops, releases
/// its resources, and reports. There is no retry and no partial silent
/// continuation.
#[derive(Debug, thiserror::Error)]
pub enum VeilError {
    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type VeilResult<T> = Result<T, VeilError>;
