//! The manifest-fetching collaborator: blocking POM retrieval over HTTP or
//! from a repository directory on disk.

use std::path::PathBuf;
use std::time::Duration;

use pomgraph_core::coordinate::{is_version_keyword, PackageCoordinate, UNSPECIFIED_VERSION};
use pomgraph_util::errors::{PomgraphError, PomgraphResult};
use reqwest::blocking::Client;
use thiserror::Error;

use crate::manifest::ParseError;
use crate::metadata::parse_metadata;
use crate::repository::{is_safe_segment, Location, Repository};

const USER_AGENT: &str = concat!("pomgraph/", env!("CARGO_PKG_VERSION"));

/// Why a manifest could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unreadable version metadata for {coordinate}: {source}")]
    Metadata {
        coordinate: String,
        source: ParseError,
    },

    #[error("no version of {coordinate} is listed in the repository metadata")]
    NoVersion { coordinate: String },

    #[error("{coordinate} is declared without a version")]
    Unversioned { coordinate: String },

    #[error("'{segment}' cannot be used in a repository path")]
    UnsafePath { segment: String },
}

/// Retrieves the raw manifest for a package version from a repository.
pub trait ManifestFetcher {
    fn fetch(
        &self,
        repository: &Repository,
        coordinate: &PackageCoordinate,
        version: &str,
    ) -> Result<Vec<u8>, FetchError>;
}

/// [`ManifestFetcher`] for Maven-layout repositories, remote or local.
///
/// Requests are blocking and bounded by the client timeout. The `latest`
/// and `release` keywords are resolved through `maven-metadata.xml` first.
pub struct RepositoryFetcher {
    client: Client,
}

impl RepositoryFetcher {
    pub fn new(timeout: Duration, insecure: bool) -> PomgraphResult<Self> {
        Ok(Self {
            client: build_client(timeout, insecure)?,
        })
    }

    /// Turn a version keyword into a concrete version; other versions pass through.
    pub fn resolve_version(
        &self,
        repository: &Repository,
        coordinate: &PackageCoordinate,
        version: &str,
    ) -> Result<String, FetchError> {
        check_segments(&[coordinate.namespace.as_str(), coordinate.name.as_str()])?;
        if !is_version_keyword(version) {
            return Ok(version.to_string());
        }

        let bytes = self.read(&repository.metadata_location(coordinate))?;
        let xml = std::str::from_utf8(&bytes).map_err(|e| FetchError::Metadata {
            coordinate: coordinate.key(),
            source: ParseError::Encoding(e),
        })?;
        let meta = parse_metadata(xml).map_err(|source| FetchError::Metadata {
            coordinate: coordinate.key(),
            source,
        })?;
        let resolved = meta.newest().ok_or_else(|| FetchError::NoVersion {
            coordinate: coordinate.key(),
        })?;

        tracing::info!("Resolved {coordinate} {version} to {resolved}");
        Ok(resolved.to_string())
    }

    fn read(&self, location: &Location) -> Result<Vec<u8>, FetchError> {
        tracing::info!("Fetching {location}");
        match location {
            Location::Url(url) => self.download(url),
            Location::File(path) => read_file(path),
        }
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.client.get(url).send().map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().map_err(|e| classify(url, e))?;
        Ok(bytes.to_vec())
    }
}

impl ManifestFetcher for RepositoryFetcher {
    fn fetch(
        &self,
        repository: &Repository,
        coordinate: &PackageCoordinate,
        version: &str,
    ) -> Result<Vec<u8>, FetchError> {
        if version == UNSPECIFIED_VERSION {
            return Err(FetchError::Unversioned {
                coordinate: coordinate.key(),
            });
        }
        let version = self.resolve_version(repository, coordinate, version)?;
        check_segments(&[version.as_str()])?;
        self.read(&repository.pom_location(coordinate, &version))
    }
}

/// Build the blocking HTTP client used for manifest downloads.
pub fn build_client(timeout: Duration, insecure: bool) -> PomgraphResult<Client> {
    if insecure {
        tracing::warn!("TLS certificate verification is disabled");
    }
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(insecure)
        .build()
        .map_err(|e| {
            PomgraphError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

fn check_segments(segments: &[&str]) -> Result<(), FetchError> {
    match segments.iter().find(|s| !is_safe_segment(s)) {
        Some(segment) => Err(FetchError::UnsafePath {
            segment: segment.to_string(),
        }),
        None => Ok(()),
    }
}

fn read_file(path: &std::path::Path) -> Result<Vec<u8>, FetchError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FetchError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FetchError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
