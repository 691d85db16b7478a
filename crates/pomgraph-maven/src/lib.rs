//! Maven repository protocol: POM parsing, version metadata, repository
//! layout, and the manifest fetcher/parser collaborators used by the graph
//! builder.

pub mod fetch;
pub mod manifest;
pub mod metadata;
pub mod pom;
pub mod repository;
