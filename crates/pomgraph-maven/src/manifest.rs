//! The manifest-parsing collaborator: raw manifest bytes in, ordered list of
//! declared dependencies out.

use pomgraph_core::coordinate::{SEPARATOR, UNSPECIFIED_VERSION};
use thiserror::Error;

use crate::pom::parse_pom;

/// A dependency as declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    /// `namespace:name` key. Not guaranteed to be well formed.
    pub key: String,
    /// Declared version, or [`UNSPECIFIED_VERSION`].
    pub version: String,
}

impl DeclaredDependency {
    pub fn new(key: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version: version.into(),
        }
    }
}

/// Why a manifest could not be turned into a dependency list.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("manifest is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML {message}")]
    Xml { message: String },
}

/// Turns raw manifest bytes into declared dependencies, in declaration order.
pub trait ManifestParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<DeclaredDependency>, ParseError>;
}

/// [`ManifestParser`] for Maven POM documents.
///
/// Every `<dependency>` element in the document is returned in document
/// order, whatever section it sits in and whatever its scope. Entries
/// without a `groupId` or `artifactId` are dropped; a missing version
/// becomes [`UNSPECIFIED_VERSION`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PomParser;

impl ManifestParser for PomParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<DeclaredDependency>, ParseError> {
        let xml = std::str::from_utf8(bytes)?;
        let mut pom = parse_pom(xml)?;
        pom.resolve_properties();

        Ok(pom
            .dependencies
            .into_iter()
            .filter(|dep| !dep.group_id.is_empty() && !dep.artifact_id.is_empty())
            .map(|dep| DeclaredDependency {
                key: format!("{}{SEPARATOR}{}", dep.group_id, dep.artifact_id),
                version: dep
                    .version
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| UNSPECIFIED_VERSION.to_string()),
            })
            .collect())
    }
}
