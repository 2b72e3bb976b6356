//! Upstream inputs for the two pipelines.
//!
//! # Submodules
//!
//! | Input | Module | Read with |
//! |-------|--------|-----------|
//! | Release history | [`releases`] | one GET against the releases API |
//! | Raw search entries | [`search_entries`] | one read of a pre-built JSON file |
//!
//! Both return fully loaded, in-memory sequences. Nothing downstream performs
//! I/O until the output artifact is written.

pub mod releases;
pub mod search_entries;
