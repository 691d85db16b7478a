//! CLI argument definitions for pomgraph.
//!
//! Flags take precedence over environment variables, which take precedence
//! over `~/.pomgraph/config.toml`.

use std::path::PathBuf;

use clap::Parser;
use pomgraph_core::config::{GlobalConfig, RunConfig, TestMode};
use pomgraph_core::coordinate::LATEST_VERSION;
use pomgraph_ops::ops_tree::{OutputFormat, TreeOptions};
use pomgraph_util::errors::PomgraphError;

#[derive(Parser, Debug)]
#[command(
    name = "pomgraph",
    about = "Visualize the transitive dependency graph of a Maven package",
    long_about = "pomgraph fetches a package's POM, follows its declared dependencies \
                  recursively up to a maximum depth, and prints the resulting graph \
                  as an indented tree or a Mermaid diagram."
)]
pub struct Cli {
    /// Package to analyse (groupId:artifactId)
    #[arg(long, env = "POMGRAPH_PACKAGE")]
    pub package: String,

    /// Repository URL, or a repository directory with --test-mode local
    #[arg(long, env = "POMGRAPH_SOURCE")]
    pub source: Option<String>,

    /// Package version, or `latest` to resolve it from repository metadata
    #[arg(long = "version", default_value = LATEST_VERSION)]
    pub package_version: String,

    /// Maximum dependency depth to explore (0-10)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Where the repository lives: local, remote
    #[arg(long, default_value = "remote", value_parser = ["local", "remote"])]
    pub test_mode: String,

    /// Output format: tree, mermaid
    #[arg(long, default_value = "tree", value_parser = ["tree", "mermaid"])]
    pub format: String,

    /// Show how the root reaches this package (groupId:artifactId)
    #[arg(long)]
    pub why: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Path to the global config file
    #[arg(long, env = "POMGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merge flags with the global config into the run parameters.
    pub fn into_run(self, global: &GlobalConfig) -> Result<(RunConfig, TreeOptions), PomgraphError> {
        let test_mode: TestMode = self.test_mode.parse()?;
        let format: OutputFormat = self.format.parse()?;

        let config = RunConfig {
            package: self.package,
            source: self
                .source
                .unwrap_or_else(|| global.repository_url().to_string()),
            version: self.package_version,
            max_depth: self.max_depth.unwrap_or(global.tree.max_depth),
            test_mode,
            timeout_secs: self.timeout.unwrap_or(global.repository.timeout_secs),
            insecure: self.insecure || global.repository.insecure,
        };
        let opts = TreeOptions {
            format,
            why: self.why,
        };
        Ok((config, opts))
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
