//! # veil-hierarchy
//!
//! Domain generalization hierarchies (DGHs): an in-memory forest per
//! attribute plus a CSV chain loader.
//!
//! A hierarchy file carries one leaf-to-root chain per line, e.g.
//! `94139,9413*,941**`. Every non-root value has exactly one parent at
//! the next level; chains that disagree are load errors.

pub mod forest;
pub mod loader;

pub use forest::Hierarchy;
