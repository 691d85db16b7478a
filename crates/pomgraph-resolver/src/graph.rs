//! Adjacency structure produced by a single exploration run.

use std::collections::HashMap;
use std::fmt;

use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};

/// Label the failure sentinel is rendered with.
pub const FAILURE_SENTINEL_LABEL: &str = "[failed to load]";

/// One entry in a node's child list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Child {
    /// A declared dependency, by `namespace:name` key (not necessarily well formed).
    Package(String),
    /// Placeholder recorded when the node's manifest could not be fetched or parsed.
    Failed,
}

impl Child {
    pub fn package(key: impl Into<String>) -> Self {
        Self::Package(key.into())
    }

    /// The referenced package key, or `None` for the failure sentinel.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Package(key) => Some(key),
            Self::Failed => None,
        }
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package(key) => f.write_str(key),
            Self::Failed => f.write_str(FAILURE_SENTINEL_LABEL),
        }
    }
}

/// Explored packages mapped to their ordered child lists.
///
/// A key is present exactly when exploration was attempted for it. Its list
/// is either the declared dependencies in manifest order (possibly empty) or
/// the single [`Child::Failed`] sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: HashMap<String, Vec<Child>>,
    /// Keys in exploration order.
    order: Vec<String>,
}

/// Summary figures reported after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Distinct explored packages.
    pub nodes: usize,
    /// Total child entries, sentinel edges included.
    pub edges: usize,
    pub has_cycles: bool,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as explored with an empty child list.
    ///
    /// A key already present keeps its existing list.
    pub fn add_node(&mut self, key: &str) {
        if !self.nodes.contains_key(key) {
            self.nodes.insert(key.to_string(), Vec::new());
            self.order.push(key.to_string());
        }
    }

    /// Append a child to an explored node's list.
    pub fn add_edge(&mut self, from: &str, child: Child) {
        self.add_node(from);
        if let Some(children) = self.nodes.get_mut(from) {
            children.push(child);
        }
    }

    /// Replace the node's list with the single failure sentinel.
    pub fn mark_failed(&mut self, key: &str) {
        self.add_node(key);
        if let Some(children) = self.nodes.get_mut(key) {
            children.clear();
            children.push(Child::Failed);
        }
    }

    /// Child list of an explored node; `None` if it was never explored.
    pub fn children(&self, key: &str) -> Option<&[Child]> {
        self.nodes.get(key).map(|c| c.as_slice())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn is_failed(&self, key: &str) -> bool {
        self.children(key) == Some(&[Child::Failed][..])
    }

    /// Explored keys in the order exploration reached them.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Number of explored packages.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of child entries across all nodes, sentinels included.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.len(),
            edges: self.edge_count(),
            has_cycles: self.has_cycles(),
        }
    }

    /// Whether any package transitively depends on itself.
    pub fn has_cycles(&self) -> bool {
        let (graph, _) = self.to_petgraph();
        algo::is_cyclic_directed(&graph)
    }

    /// Shortest chain of packages leading from `from` to `to`, both included.
    pub fn find_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let (graph, index) = self.to_petgraph();
        let start = *index.get(from)?;
        let goal = *index.get(to)?;
        let (_, path) = algo::astar(&graph, start, |n| n == goal, |_| 1, |_| 0)?;
        Some(path.into_iter().map(|idx| graph[idx].clone()).collect())
    }

    /// Project the package edges into a petgraph graph. Sentinels are left out;
    /// unexplored children become nodes without outgoing edges.
    fn to_petgraph(&self) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();

        let mut node_for = |graph: &mut DiGraph<String, ()>, key: &str| -> NodeIndex {
            *index
                .entry(key.to_string())
                .or_insert_with(|| graph.add_node(key.to_string()))
        };

        for key in &self.order {
            let from = node_for(&mut graph, key);
            for child in &self.nodes[key] {
                if let Some(child_key) = child.key() {
                    let to = node_for(&mut graph, child_key);
                    graph.add_edge(from, to, ());
                }
            }
        }

        (graph, index)
    }
}
