//! Shared utilities for the pomgraph workspace.
//!
//! Holds the cross-cutting error type every other crate reports
//! configuration and I/O failures through.

pub mod errors;
