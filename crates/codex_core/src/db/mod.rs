//! SQLite file backing the world store.
//!
//! # Responsibility
//! - Open the codex store file and bring its schema up to date.
//! - Report which step of opening failed, so callers can tell a locked or
//!   missing file from a store written by a newer build.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection is handed out only after every schema step has applied.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type OpenResult<T> = Result<T, StoreOpenError>;

/// Why the codex store could not be opened.
#[derive(Debug)]
pub enum StoreOpenError {
    /// SQLite refused the file or the in-memory handle.
    Connect {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// Connection settings or the schema version could not be read or set.
    Setup(rusqlite::Error),
    /// The file was written by a build with a newer store layout.
    SchemaTooNew { found: u32, supported: u32 },
    /// One schema step failed; earlier steps stay applied.
    Step {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for StoreOpenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect { mode, source } => {
                write!(f, "cannot open {mode} codex store: {source}")
            }
            Self::Setup(err) => write!(f, "cannot prepare codex store: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "codex store uses layout v{found}, this build reads up to v{supported}"
            ),
            Self::Step {
                version,
                name,
                source,
            } => write!(f, "store step v{version} ({name}) failed: {source}"),
        }
    }
}

impl Error for StoreOpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect { source, .. } | Self::Step { source, .. } => Some(source),
            Self::Setup(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}
