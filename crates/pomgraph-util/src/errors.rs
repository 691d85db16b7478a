use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for run-level pomgraph failures.
///
/// Per-package fetch and parse failures never surface here; they are
/// recorded in the dependency graph instead.
#[derive(Debug, Error, Diagnostic)]
pub enum PomgraphError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid run configuration (bad coordinate, depth out of range, empty field).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check the command-line flags and ~/.pomgraph/config.toml"))]
    Config { message: String },

    /// HTTP client setup or transport failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The global config file is not valid TOML or has wrongly typed keys.
    #[error("Parse error: {message}")]
    #[diagnostic(help("Fix or remove ~/.pomgraph/config.toml, or pass --config"))]
    Parse { message: String },
}

impl PomgraphError {
    /// Shorthand for a [`PomgraphError::Config`] with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type PomgraphResult<T> = miette::Result<T>;
