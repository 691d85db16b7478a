//! Dependency graph engine: recursive depth-first exploration of package
//! manifests, revisit suppression, per-node failure isolation, and
//! deterministic tree rendering.

pub mod builder;
pub mod graph;
pub mod render;
