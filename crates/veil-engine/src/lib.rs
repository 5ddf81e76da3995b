//! # veil-engine
//!
//! The Datafly generalization engine. Builds a frequency table over the
//! quasi-identifier tuples, repeatedly coarsens the attribute with the
//! widest domain through its hierarchy until every group reaches size k
//! or the residual violation mass fits under k, suppresses what is left,
//! and rewrites surviving rows with their generalized values.
//!
//! The suppression bound is structural: generalization only stops once
//! the total size of all sub-k groups is at most k, and exactly those
//! rows are dropped, so a run never suppresses more than k rows.

pub mod engine;
pub mod frequency;

pub use engine::DataflyEngine;
pub use frequency::{FrequencyEntry, FrequencyTable};
