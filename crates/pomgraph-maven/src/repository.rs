//! Repository abstraction: Maven directory layout over HTTP or on disk.

use std::fmt;
use std::path::PathBuf;

use pomgraph_core::config::{TestMode, DEFAULT_REPOSITORY_URL};
use pomgraph_core::coordinate::PackageCoordinate;

/// A Maven-layout repository manifests are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    /// Base URL of an HTTP(S) repository, without trailing slash.
    Remote { url: String },
    /// Root directory of a repository on disk.
    Local { root: PathBuf },
}

/// Concrete place a single repository file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Repository {
    pub fn remote(url: &str) -> Self {
        Self::Remote {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local { root: root.into() }
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::remote(DEFAULT_REPOSITORY_URL)
    }

    /// Interpret a `--source` value according to the test mode.
    pub fn from_source(source: &str, mode: TestMode) -> Self {
        match mode {
            TestMode::Local => Self::local(source),
            TestMode::Remote => Self::remote(source),
        }
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `com.google.guava:guava:31.0-jre` becomes
    /// `com/google/guava/guava/31.0-jre`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Location of the POM file for a given coordinate and version.
    pub fn pom_location(&self, coordinate: &PackageCoordinate, version: &str) -> Location {
        let relative = format!(
            "{}/{}-{}.pom",
            Self::coordinate_path(&coordinate.namespace, &coordinate.name, version),
            coordinate.name,
            version
        );
        self.resolve(&relative)
    }

    /// Location of the artifact-level `maven-metadata.xml` (version listing).
    pub fn metadata_location(&self, coordinate: &PackageCoordinate) -> Location {
        let relative = format!(
            "{}/{}/maven-metadata.xml",
            coordinate.namespace.replace('.', "/"),
            coordinate.name
        );
        self.resolve(&relative)
    }

    fn resolve(&self, relative: &str) -> Location {
        match self {
            Self::Remote { url } => Location::Url(format!("{url}/{relative}")),
            Self::Local { root } => Location::File(root.join(relative)),
        }
    }
}

/// Whether `segment` can be joined into a repository path without leaving
/// the repository. Group dots become separators, so they are allowed there.
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['/', '\\'])
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url } => f.write_str(url),
            Self::Local { root } => write!(f, "{}", root.display()),
        }
    }
}
