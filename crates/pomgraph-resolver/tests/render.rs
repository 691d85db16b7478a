use pomgraph_resolver::graph::{Child, DependencyGraph, GraphStats};
use pomgraph_resolver::render::{render, render_mermaid, render_stats, render_tree};

fn graph(entries: &[(&str, &[&str])]) -> DependencyGraph {
    let mut g = DependencyGraph::new();
    for (key, children) in entries {
        g.add_node(key);
        for child in *children {
            if *child == "FAILED" {
                g.mark_failed(key);
            } else {
                g.add_edge(key, Child::package(*child));
            }
        }
    }
    g
}

#[test]
fn root_failure_renders_one_sentinel_leaf() {
    let g = graph(&[("g:a", &["FAILED"])]);
    assert_eq!(
        render_tree(&g, "g:a"),
        "Package: g:a\n  └── [failed to load]\n"
    );
}

#[test]
fn nested_children_are_indented_by_depth() {
    let g = graph(&[
        ("g:a", &["g:b", "g:c"]),
        ("g:b", &["g:d"]),
        ("g:c", &[]),
    ]);
    assert_eq!(
        render_tree(&g, "g:a"),
        "Package: g:a\n  └── g:b\n    └── g:d\n  └── g:c\n"
    );
}

#[test]
fn cycle_back_to_root_is_truncated() {
    let g = graph(&[("g:a", &["g:b"]), ("g:b", &["g:a"])]);
    assert_eq!(
        render_tree(&g, "g:a"),
        "Package: g:a\n  └── g:b\n    └── g:a [...]\n"
    );
}

#[test]
fn already_rendered_node_is_not_expanded_again() {
    let g = graph(&[
        ("g:a", &["g:b", "g:c"]),
        ("g:b", &["g:c"]),
        ("g:c", &["g:d"]),
    ]);
    assert_eq!(
        render_tree(&g, "g:a"),
        "Package: g:a\n  └── g:b\n    └── g:c\n      └── g:d\n  └── g:c [...]\n"
    );
}

#[test]
fn unexplored_and_empty_nodes_render_alike() {
    let explored = graph(&[("g:a", &["g:b"]), ("g:b", &[])]);
    let unexplored = graph(&[("g:a", &["g:b"])]);
    assert_eq!(render_tree(&explored, "g:a"), render_tree(&unexplored, "g:a"));
}

#[test]
fn malformed_child_renders_as_leaf() {
    let g = graph(&[("g:a", &["oops"])]);
    assert_eq!(render_tree(&g, "g:a"), "Package: g:a\n  └── oops\n");
}

#[test]
fn render_is_framed() {
    let g = graph(&[("g:a", &[])]);
    let out = render(&g, "g:a");
    assert!(out.starts_with("=== DEPENDENCY GRAPH ===\nPackage: g:a\n"));
    assert!(out.ends_with("==========================\n"));
}

#[test]
fn render_does_not_mutate_graph() {
    let g = graph(&[("g:a", &["g:b"]), ("g:b", &["g:a"])]);
    let before = g.clone();
    let _ = render(&g, "g:a");
    assert_eq!(g, before);
}

#[test]
fn self_loop_terminates() {
    let g = graph(&[("g:a", &["g:a", "g:a"])]);
    assert_eq!(
        render_tree(&g, "g:a"),
        "Package: g:a\n  └── g:a [...]\n  └── g:a [...]\n"
    );
}

#[test]
fn stats_text() {
    let stats = GraphStats {
        nodes: 3,
        edges: 2,
        has_cycles: false,
    };
    assert_eq!(
        render_stats(&stats),
        "Statistics:\nPackages: 3\nDependencies: 2\nCycles: no\n"
    );
}

#[test]
fn mermaid_edges_and_failures() {
    let g = graph(&[("g:a", &["g:b", "g:c"]), ("g:b", &["FAILED"])]);
    assert_eq!(
        render_mermaid(&g, "g:a"),
        "graph TD\n    \
         n0[\"g:a\"] --> n1[\"g:b\"]\n    \
         n0[\"g:a\"] --> n2[\"g:c\"]\n    \
         n1[\"g:b\"] --> f0[\"[failed to load]\"]\n"
    );
}

#[test]
fn mermaid_lone_root_is_declared() {
    let g = graph(&[("g:a", &[])]);
    assert_eq!(render_mermaid(&g, "g:a"), "graph TD\n    n0[\"g:a\"]\n");
}

#[test]
fn mermaid_cycle_terminates() {
    let g = graph(&[("g:a", &["g:b"]), ("g:b", &["g:a"])]);
    let out = render_mermaid(&g, "g:a");
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("n1[\"g:b\"] --> n0[\"g:a\"]"));
}
