use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pomgraph_util::errors::{PomgraphError, PomgraphResult};

use crate::coordinate::PackageCoordinate;

/// Maven Central base URL, used when neither flags nor config name a repository.
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo.maven.apache.org/maven2";

/// Hard cap on the exploration depth.
pub const MAX_DEPTH_LIMIT: u32 = 10;

/// Exploration depth used when neither flags nor config set one.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Per-request timeout ceiling for manifest downloads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where manifests are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    /// A Maven-layout directory on disk.
    Local,
    /// A Maven repository over HTTP(S).
    #[default]
    Remote,
}

impl FromStr for TestMode {
    type Err = PomgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(PomgraphError::config(format!(
                "unknown test mode '{other}': expected 'local' or 'remote'"
            ))),
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// Global user configuration loaded from `~/.pomgraph/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub tree: TreeConfig,
}

/// Repository settings from `[repository]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs", rename = "timeout-secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub insecure: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout_secs(),
            insecure: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Tree settings from `[tree]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_max_depth", rename = "max-depth")]
    pub max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

impl GlobalConfig {
    /// Load the global configuration from `~/.pomgraph/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> PomgraphResult<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load the configuration from an explicit path, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> PomgraphResult<Self> {
        if !path.is_file() {
            tracing::debug!("No global config at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(PomgraphError::from)?;
        toml::from_str(&content).map_err(|e| {
            PomgraphError::Parse {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Parse configuration from TOML text.
    pub fn parse_toml(content: &str) -> Result<Self, PomgraphError> {
        toml::from_str(content).map_err(|e| PomgraphError::Parse {
            message: format!("Failed to parse global config: {e}"),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Repository to use when none is given on the command line.
    pub fn repository_url(&self) -> &str {
        self.repository
            .url
            .as_deref()
            .unwrap_or(DEFAULT_REPOSITORY_URL)
    }
}

/// Returns the path to the pomgraph data directory (`~/.pomgraph/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".pomgraph")
}

/// Fully merged parameters of a single dependency-graph run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root package as `group:artifact`.
    pub package: String,
    /// Repository URL, or a directory path in local mode.
    pub source: String,
    pub version: String,
    pub max_depth: u32,
    pub test_mode: TestMode,
    pub timeout_secs: u64,
    pub insecure: bool,
}

impl RunConfig {
    /// Check every parameter before any repository access.
    ///
    /// Returns the parsed root coordinate on success.
    pub fn validate(&self) -> Result<PackageCoordinate, PomgraphError> {
        if self.package.trim().is_empty() {
            return Err(PomgraphError::config("package name must not be empty"));
        }
        let root: PackageCoordinate = self.package.parse()?;

        if self.source.trim().is_empty() {
            return Err(PomgraphError::config("source must not be empty"));
        }
        if self.version.trim().is_empty() {
            return Err(PomgraphError::config("version must not be empty"));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(PomgraphError::config(format!(
                "max depth {} exceeds the limit of {MAX_DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        if self.timeout_secs == 0 {
            return Err(PomgraphError::config("timeout must be at least one second"));
        }
        if self.test_mode == TestMode::Local && !Path::new(&self.source).is_dir() {
            return Err(PomgraphError::config(format!(
                "local repository '{}' is not a directory",
                self.source
            )));
        }

        Ok(root)
    }

    /// Parameters as `(name, value)` pairs, in the order they are echoed.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("package", self.package.clone()),
            ("source", self.source.clone()),
            ("version", self.version.clone()),
            ("max_depth", self.max_depth.to_string()),
            ("test_mode", self.test_mode.to_string()),
            ("timeout_secs", self.timeout_secs.to_string()),
            ("insecure", self.insecure.to_string()),
        ]
    }
}
