//! Package coordinates: the version-independent `namespace:name` identity.

use std::fmt;
use std::str::FromStr;

use pomgraph_util::errors::PomgraphError;

/// Separator between the namespace (group) and name (artifact) parts.
pub const SEPARATOR: char = ':';

/// Version recorded for a declared dependency that carries no `<version>`.
pub const UNSPECIFIED_VERSION: &str = "N/A";

/// Version keyword resolved through repository metadata.
pub const LATEST_VERSION: &str = "latest";

/// A package identity made of a namespace part and a name part
/// (Maven `groupId` and `artifactId`).
///
/// The version is deliberately not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageCoordinate {
    pub namespace: String,
    pub name: String,
}

impl PackageCoordinate {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse `"namespace:name"`.
    ///
    /// Requires exactly one separator with non-empty text on both sides.
    /// No trimming or case folding is applied.
    pub fn parse(s: &str) -> Option<Self> {
        let (namespace, name) = s.split_once(SEPARATOR)?;
        if namespace.is_empty() || name.is_empty() || name.contains(SEPARATOR) {
            return None;
        }
        Some(Self::new(namespace, name))
    }

    /// Whether `s` is a well-formed coordinate string.
    pub fn is_well_formed(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    /// `namespace:name` key used for graph lookups.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.namespace, self.name)
    }
}

impl FromStr for PackageCoordinate {
    type Err = PomgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            PomgraphError::config(format!(
                "invalid package coordinate '{s}': expected 'group{SEPARATOR}artifact'"
            ))
        })
    }
}

/// Whether a version string is a keyword that must be resolved through
/// repository metadata before a manifest can be located.
pub fn is_version_keyword(version: &str) -> bool {
    version.eq_ignore_ascii_case(LATEST_VERSION) || version.eq_ignore_ascii_case("release")
}
