//! Document sources for index and per-entry JSON files.
//!
//! # Responsibility
//! - Fetch raw document text by relative path.
//! - Keep transport details (filesystem, HTTP) out of the loader.
//!
//! # Invariants
//! - A fetch is a single attempt; sources never retry.
//! - Paths are relative; sources refuse to escape their root.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Component, Path, PathBuf};

/// Transport-level failure for one document.
#[derive(Debug)]
pub enum FetchError {
    InvalidPath(String),
    Io {
        path: String,
        source: std::io::Error,
    },
    Http {
        path: String,
        source: reqwest::Error,
    },
    Status {
        path: String,
        status: u16,
    },
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "invalid document path `{path}`"),
            Self::Io { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Http { path, source } => write!(f, "request for `{path}` failed: {source}"),
            Self::Status { path, status } => write!(f, "request for `{path}` returned {status}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Http { source, .. } => Some(source),
            Self::InvalidPath(_) | Self::Status { .. } => None,
        }
    }
}

/// Anything that can hand out document text by relative path.
#[async_trait]
pub trait EntrySource: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Reads documents from a local directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|part| !matches!(part, Component::Normal(_) | Component::CurDir));
        if path.trim().is_empty() || escapes {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl EntrySource for DirectorySource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path)?;
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_string(),
                source,
            })
    }
}

/// Fetches documents with plain HTTP GET relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl EntrySource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let http_error = |source| FetchError::Http {
            path: path.to_string(),
            source,
        };
        let response = self
            .client
            .get(self.url_for(path))
            .send()
            .await
            .map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(http_error)
    }
}
