//! Core data types for pomgraph.
//!
//! This crate defines package coordinates and the configuration a
//! dependency-graph run is driven by: the validated run parameters and the
//! optional global config file.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod coordinate;
