//! pomgraph CLI binary.
//!
//! This is the entry point for the `pomgraph` command-line tool. It parses
//! arguments with `clap`, initializes logging via `tracing`, merges the
//! global config file, and runs the tree operation.

mod cli;

use miette::Result;
use pomgraph_core::config::GlobalConfig;
use pomgraph_ops::ops_tree;

fn main() -> Result<()> {
    let args = cli::parse();
    init_logging(args.verbose);

    let global = match args.config {
        Some(ref path) => GlobalConfig::load_from(path)?,
        None => GlobalConfig::load()?,
    };
    let (config, opts) = args.into_run(&global)?;
    tracing::debug!("Run configuration: {config:?}");
    ops_tree::tree(&config, &opts)
}

/// Diagnostics go to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,pomgraph_core=debug,pomgraph_maven=debug,pomgraph_resolver=debug,pomgraph_ops=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
