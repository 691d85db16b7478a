//! Operation: resolve and display the dependency graph of one package.

use std::str::FromStr;
use std::time::Duration;

use pomgraph_core::config::RunConfig;
use pomgraph_core::coordinate::PackageCoordinate;
use pomgraph_maven::fetch::RepositoryFetcher;
use pomgraph_maven::manifest::PomParser;
use pomgraph_maven::repository::Repository;
use pomgraph_resolver::builder::GraphBuilder;
use pomgraph_resolver::graph::DependencyGraph;
use pomgraph_resolver::render;
use pomgraph_util::errors::{PomgraphError, PomgraphResult};

/// How the graph is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented text tree.
    #[default]
    Tree,
    /// Mermaid flowchart.
    Mermaid,
}

impl FromStr for OutputFormat {
    type Err = PomgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Self::Tree),
            "mermaid" => Ok(Self::Mermaid),
            other => Err(PomgraphError::config(format!(
                "unknown output format '{other}': expected 'tree' or 'mermaid'"
            ))),
        }
    }
}

/// Options for `pomgraph` beyond the run configuration.
#[derive(Debug, Default)]
pub struct TreeOptions {
    pub format: OutputFormat,
    /// Show the chain of packages leading to this one instead of the tree.
    pub why: Option<String>,
}

/// Resolve the graph described by `config` and print the report to stdout.
pub fn tree(config: &RunConfig, opts: &TreeOptions) -> PomgraphResult<()> {
    print!("{}", report(config, opts)?);
    Ok(())
}

/// Resolve the graph described by `config` and return the full report text.
///
/// Only configuration problems are errors; unreachable or malformed
/// manifests show up inside the report.
pub fn report(config: &RunConfig, opts: &TreeOptions) -> PomgraphResult<String> {
    let root = config.validate()?;

    let repository = Repository::from_source(&config.source, config.test_mode);
    let fetcher =
        RepositoryFetcher::new(Duration::from_secs(config.timeout_secs), config.insecure)?;
    let builder = GraphBuilder::new(fetcher, PomParser);

    let mut output = config_block(config);
    tracing::info!(
        "Analysing {root} {} from {repository} (max depth {})",
        config.version,
        config.max_depth
    );
    let graph = builder.build(&root, &config.version, &repository, config.max_depth);

    output.push('\n');
    output.push_str(&present(&graph, &root, opts));
    Ok(output)
}

/// Render an already built graph according to `opts`.
pub fn present(graph: &DependencyGraph, root: &PackageCoordinate, opts: &TreeOptions) -> String {
    let root_key = root.key();

    if let Some(ref target) = opts.why {
        return match graph.find_path(&root_key, target) {
            Some(path) => {
                let mut output = format!("Path to {target}:\n");
                for (i, key) in path.iter().enumerate() {
                    output.push_str(&format!("{}{key}\n", "  ".repeat(i)));
                }
                output
            }
            None => format!("Package '{target}' not found in the graph.\n"),
        };
    }

    let mut output = match opts.format {
        OutputFormat::Tree => render::render(graph, &root_key),
        OutputFormat::Mermaid => render::render_mermaid(graph, &root_key),
    };
    output.push('\n');
    output.push_str(&render::render_stats(&graph.stats()));
    output
}

fn config_block(config: &RunConfig) -> String {
    let mut output = String::from("=== Configuration ===\n");
    for (key, value) in config.entries() {
        output.push_str(&format!("{key}: {value}\n"));
    }
    output.push_str("=====================\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomgraph_resolver::graph::Child;

    fn sample_graph() -> DependencyGraph {
        let mut g = DependencyGraph::new();
        g.add_edge("g:a", Child::package("g:b"));
        g.add_edge("g:b", Child::package("g:c"));
        g.add_node("g:c");
        g
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!("tree".parse::<OutputFormat>().unwrap(), OutputFormat::Tree);
        assert_eq!(
            "mermaid".parse::<OutputFormat>().unwrap(),
            OutputFormat::Mermaid
        );
        assert!("dot".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn present_tree_with_stats() {
        let out = present(
            &sample_graph(),
            &PackageCoordinate::new("g", "a"),
            &TreeOptions::default(),
        );
        assert!(out.contains("Package: g:a\n  └── g:b\n    └── g:c\n"));
        assert!(out.ends_with("Packages: 3\nDependencies: 2\nCycles: no\n"));
    }

    #[test]
    fn present_why_path() {
        let opts = TreeOptions {
            why: Some("g:c".to_string()),
            ..Default::default()
        };
        let out = present(&sample_graph(), &PackageCoordinate::new("g", "a"), &opts);
        assert_eq!(out, "Path to g:c:\ng:a\n  g:b\n    g:c\n");
    }

    #[test]
    fn present_why_missing() {
        let opts = TreeOptions {
            why: Some("g:zzz".to_string()),
            ..Default::default()
        };
        let out = present(&sample_graph(), &PackageCoordinate::new("g", "a"), &opts);
        assert_eq!(out, "Package 'g:zzz' not found in the graph.\n");
    }

    #[test]
    fn present_mermaid() {
        let opts = TreeOptions {
            format: OutputFormat::Mermaid,
            ..Default::default()
        };
        let out = present(&sample_graph(), &PackageCoordinate::new("g", "a"), &opts);
        assert!(out.starts_with("graph TD\n"));
        assert!(out.contains("Packages: 3"));
    }
}
