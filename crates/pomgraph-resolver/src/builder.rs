//! Depth-first, depth-bounded exploration of a package's transitive
//! dependencies.

use std::collections::HashSet;

use pomgraph_core::coordinate::PackageCoordinate;
use pomgraph_maven::fetch::{FetchError, ManifestFetcher};
use pomgraph_maven::manifest::{DeclaredDependency, ManifestParser, ParseError};
use pomgraph_maven::repository::Repository;
use thiserror::Error;

use crate::graph::{Child, DependencyGraph};

/// Why a single package could not be expanded.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result of fetching and parsing one package's manifest.
#[derive(Debug)]
pub enum NodeOutcome {
    Resolved(Vec<DeclaredDependency>),
    Failed(NodeError),
}

/// Builds a [`DependencyGraph`] by fetching and parsing manifests.
///
/// The builder only holds its collaborators; every [`build`](Self::build)
/// call starts from a fresh graph and revisit set, so repeated runs are
/// independent.
pub struct GraphBuilder<F, P> {
    fetcher: F,
    parser: P,
}

/// State of one exploration run.
struct Run<'a> {
    repository: &'a Repository,
    max_depth: u32,
    graph: DependencyGraph,
    /// Coordinates whose exploration was attempted. Version is not part of the key.
    visited: HashSet<String>,
}

impl<F: ManifestFetcher, P: ManifestParser> GraphBuilder<F, P> {
    pub fn new(fetcher: F, parser: P) -> Self {
        Self { fetcher, parser }
    }

    /// Explore `root` and everything it reaches within `max_depth` edges.
    ///
    /// Never fails: a package whose manifest cannot be fetched or parsed is
    /// recorded with a single [`Child::Failed`] entry and not expanded.
    pub fn build(
        &self,
        root: &PackageCoordinate,
        root_version: &str,
        repository: &Repository,
        max_depth: u32,
    ) -> DependencyGraph {
        let mut run = Run {
            repository,
            max_depth,
            graph: DependencyGraph::new(),
            visited: HashSet::new(),
        };
        self.explore(&mut run, &root.key(), root_version, 0);

        tracing::debug!(
            "Explored {} package(s) from {root} (max depth {max_depth})",
            run.graph.len()
        );
        run.graph
    }

    fn explore(&self, run: &mut Run<'_>, key: &str, version: &str, depth: u32) {
        if depth > run.max_depth {
            return;
        }
        if run.visited.contains(key) {
            return;
        }
        let Some(coordinate) = PackageCoordinate::parse(key) else {
            tracing::debug!("Skipping malformed coordinate '{key}'");
            return;
        };

        run.visited.insert(key.to_string());

        match self.outcome(run.repository, &coordinate, version) {
            NodeOutcome::Resolved(dependencies) => {
                run.graph.add_node(key);
                for dep in dependencies {
                    run.graph.add_edge(key, Child::package(dep.key.as_str()));
                    self.explore(run, &dep.key, &dep.version, depth + 1);
                }
            }
            NodeOutcome::Failed(err) => {
                tracing::warn!("Skipping {key}: {err}");
                run.graph.mark_failed(key);
            }
        }
    }

    /// Fetch and parse a single manifest.
    pub fn outcome(
        &self,
        repository: &Repository,
        coordinate: &PackageCoordinate,
        version: &str,
    ) -> NodeOutcome {
        let parsed = self
            .fetcher
            .fetch(repository, coordinate, version)
            .map_err(NodeError::from)
            .and_then(|bytes| self.parser.parse(&bytes).map_err(NodeError::from));

        match parsed {
            Ok(dependencies) => NodeOutcome::Resolved(dependencies),
            Err(err) => NodeOutcome::Failed(err),
        }
    }
}
