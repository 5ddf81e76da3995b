//! # veil-table
//!
//! Table format implementations for the veil toolkit: a delimited-text
//! source/sink pair backed by the `csv` crate, and an in-memory pair for
//! embedding and tests.

pub mod delimited;
pub mod memory;

pub use delimited::{DelimitedTable, DelimitedWriter};
pub use memory::{MemorySink, MemoryTable};
