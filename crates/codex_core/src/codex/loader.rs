//! Index-driven concurrent entry loading.
//!
//! # Responsibility
//! - Fetch and parse the index document, then fan out one fetch per file.
//! - Separate fatal index failures from partial per-entry failures.
//!
//! # Invariants
//! - Each unique file is fetched at most once per load.
//! - Every fetch settles before the load returns; one failure never aborts
//!   the others.
//! - Only index fetch/parse failures are returned as `Err`.
//! - The returned collection is built completely before it is handed out.

use super::index::IndexShape;
use super::normalize::{normalize_collection, NormalizeOptions};
use super::source::{EntrySource, FetchError};
use crate::model::entry::CodexEntry;
use futures::future::join_all;
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Number of missing file names shown in a user notice.
pub const FAILURE_PREVIEW_LEN: usize = 3;

/// Fatal load failure: the index itself is unusable.
#[derive(Debug)]
pub enum LoadError {
    IndexFetch {
        path: String,
        source: FetchError,
    },
    IndexParse {
        path: String,
        source: serde_json::Error,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexFetch { path, source } => {
                write!(f, "codex index `{path}` could not be fetched: {source}")
            }
            Self::IndexParse { path, source } => {
                write!(f, "codex index `{path}` is not valid JSON: {source}")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndexFetch { source, .. } => Some(source),
            Self::IndexParse { source, .. } => Some(source),
        }
    }
}

/// Where to find one codex collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub index_path: String,
    /// Directory prefix for per-entry files.
    pub entry_dir: String,
    /// Plural key recognized in keyed index documents.
    pub collection: String,
}

impl LoadRequest {
    pub fn new(
        index_path: impl Into<String>,
        entry_dir: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            index_path: index_path.into(),
            entry_dir: entry_dir.into(),
            collection: collection.into(),
        }
    }

    /// `<dir>/<file>` with exactly one separating slash.
    pub fn entry_path(&self, file: &str) -> String {
        let dir = self.entry_dir.trim_end_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{dir}/{file}")
        }
    }
}

/// One entry file that failed to fetch or parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub file: String,
    pub reason: String,
}

/// Raw documents of a load, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLoad {
    pub documents: Vec<Value>,
    pub failures: Vec<LoadFailure>,
}

/// Outcome of a non-fatal load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Successfully loaded entries, in index order.
    pub entries: Vec<CodexEntry>,
    /// Every failed file, in index order.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed_files(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.file.as_str()).collect()
    }

    /// Short user-facing notice naming at most `limit` missing files.
    ///
    /// Returns `None` when nothing failed.
    pub fn failure_preview(&self, limit: usize) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let shown = self
            .failures
            .iter()
            .take(limit)
            .map(|f| f.file.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let hidden = self.failures.len().saturating_sub(limit);
        Some(if hidden > 0 {
            format!("Missing entries: {shown} (+{hidden} more)")
        } else {
            format!("Missing entries: {shown}")
        })
    }
}

/// Fetches the index and every listed document concurrently.
pub async fn fetch_documents<S: EntrySource + ?Sized>(
    source: &S,
    request: &LoadRequest,
) -> Result<RawLoad, LoadError> {
    let started_at = Instant::now();
    info!("event=codex_load module=codex status=start");

    let index_text = match source.fetch_text(&request.index_path).await {
        Ok(text) => text,
        Err(err) => {
            error!(
                "event=codex_load module=codex status=error error_code=index_fetch_failed duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Err(LoadError::IndexFetch {
                path: request.index_path.clone(),
                source: err,
            });
        }
    };
    let payload: Value = serde_json::from_str(&index_text).map_err(|err| {
        error!(
            "event=codex_load module=codex status=error error_code=index_parse_failed duration_ms={}",
            started_at.elapsed().as_millis()
        );
        LoadError::IndexParse {
            path: request.index_path.clone(),
            source: err,
        }
    })?;

    let files = IndexShape::classify(&payload, &request.collection).file_names();
    let fetches = files.iter().map(|file| async move {
        let outcome = match source.fetch_text(&request.entry_path(file)).await {
            Ok(text) => serde_json::from_str::<Value>(&text).map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        (file, outcome)
    });

    let mut documents = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for (file, outcome) in join_all(fetches).await {
        match outcome {
            Ok(document) => documents.push(document),
            Err(reason) => failures.push(LoadFailure {
                file: file.clone(),
                reason,
            }),
        }
    }

    if failures.is_empty() {
        info!(
            "event=codex_load module=codex status=ok files={} loaded={} duration_ms={}",
            files.len(),
            documents.len(),
            started_at.elapsed().as_millis()
        );
    } else {
        warn!(
            "event=codex_load module=codex status=partial files={} loaded={} failed={} duration_ms={}",
            files.len(),
            documents.len(),
            failures.len(),
            started_at.elapsed().as_millis()
        );
    }

    Ok(RawLoad {
        documents,
        failures,
    })
}

/// Loads and normalizes one codex collection.
pub async fn load_entries<S: EntrySource + ?Sized>(
    source: &S,
    request: &LoadRequest,
    options: NormalizeOptions,
) -> Result<LoadReport, LoadError> {
    let raw = fetch_documents(source, request).await?;
    Ok(LoadReport {
        entries: normalize_collection(raw.documents, options),
        failures: raw.failures,
    })
}
