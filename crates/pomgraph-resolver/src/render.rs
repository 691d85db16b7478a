//! Deterministic text rendering of a [`DependencyGraph`].

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use crate::graph::{Child, DependencyGraph, GraphStats, FAILURE_SENTINEL_LABEL};

/// Prefix of the root line.
pub const ROOT_LABEL: &str = "Package: ";
/// Glyph placed before every non-root node.
pub const BRANCH: &str = "└── ";
/// Indentation added per depth level.
pub const INDENT: &str = "  ";
/// Suffix of a node that was already rendered higher up.
pub const TRUNCATED: &str = " [...]";

const HEADER: &str = "=== DEPENDENCY GRAPH ===";
const FOOTER: &str = "==========================";

/// Render the tree rooted at `root`, framed by header and footer lines.
pub fn render(graph: &DependencyGraph, root: &str) -> String {
    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');
    output.push_str(&render_tree(graph, root));
    output.push_str(FOOTER);
    output.push('\n');
    output
}

/// Render the bare tree rooted at `root`, one line per visited entry.
///
/// A package already printed is shown once more as a truncated leaf and not
/// expanded again. Packages without an entry in the graph are plain leaves.
pub fn render_tree(graph: &DependencyGraph, root: &str) -> String {
    let mut output = String::new();
    let mut visited = HashSet::new();
    render_package(graph, root, 0, &mut visited, &mut output);
    output
}

fn render_package<'g>(
    graph: &'g DependencyGraph,
    key: &'g str,
    depth: usize,
    visited: &mut HashSet<&'g str>,
    output: &mut String,
) {
    if !visited.insert(key) {
        output.push_str(&format!("{}{BRANCH}{key}{TRUNCATED}\n", INDENT.repeat(depth)));
        return;
    }

    if depth == 0 {
        output.push_str(&format!("{ROOT_LABEL}{key}\n"));
    } else {
        output.push_str(&format!("{}{BRANCH}{key}\n", INDENT.repeat(depth)));
    }

    let Some(children) = graph.children(key) else {
        return;
    };
    for child in children {
        match child {
            Child::Package(child_key) => {
                render_package(graph, child_key, depth + 1, visited, output);
            }
            Child::Failed => {
                output.push_str(&format!(
                    "{}{BRANCH}{FAILURE_SENTINEL_LABEL}\n",
                    INDENT.repeat(depth + 1)
                ));
            }
        }
    }
}

/// Render the summary figures.
pub fn render_stats(stats: &GraphStats) -> String {
    format!(
        "Statistics:\nPackages: {}\nDependencies: {}\nCycles: {}\n",
        stats.nodes,
        stats.edges,
        if stats.has_cycles { "yes" } else { "no" }
    )
}

/// Render the graph reachable from `root` as a Mermaid flowchart.
///
/// Each reachable package is expanded once, depth-first from the root;
/// every failure sentinel gets its own node.
pub fn render_mermaid(graph: &DependencyGraph, root: &str) -> String {
    let mut output = String::from("graph TD\n");
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut failures = 0usize;
    let mut expanded = HashSet::new();
    let mut stack = vec![root];

    let root_id = node_id(&mut ids, root);
    if graph.children(root).map_or(true, |c| c.is_empty()) {
        let _ = writeln!(output, "    n{root_id}[\"{root}\"]");
    }

    while let Some(key) = stack.pop() {
        if !expanded.insert(key) {
            continue;
        }
        let Some(children) = graph.children(key) else {
            continue;
        };
        let from = node_id(&mut ids, key);
        for child in children {
            match child {
                Child::Package(child_key) => {
                    let to = node_id(&mut ids, child_key);
                    let _ = writeln!(output, "    n{from}[\"{key}\"] --> n{to}[\"{child_key}\"]");
                }
                Child::Failed => {
                    let _ = writeln!(
                        output,
                        "    n{from}[\"{key}\"] --> f{failures}[\"{FAILURE_SENTINEL_LABEL}\"]"
                    );
                    failures += 1;
                }
            }
        }
        stack.extend(children.iter().rev().filter_map(Child::key));
    }

    output
}

fn node_id<'g>(ids: &mut HashMap<&'g str, usize>, key: &'g str) -> usize {
    let next = ids.len();
    *ids.entry(key).or_insert(next)
}
