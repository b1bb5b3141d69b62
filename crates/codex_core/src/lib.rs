//! Core domain logic for Purple Codex.
//! This crate is the single source of truth for world bible invariants.

pub mod codex;
pub mod config;
pub mod db;
pub mod display;
pub mod logging;
pub mod markup;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use codex::browser::{BrowserState, BrowserView};
pub use codex::loader::{load_entries, LoadError, LoadReport, LoadRequest};
pub use codex::normalize::{normalize_collection, normalize_entry, NormalizeOptions};
pub use codex::source::{DirectorySource, EntrySource, FetchError, HttpSource};
pub use config::{CodexConfig, ConfigError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use markup::{render_markup, render_markup_html, LinkOutcome, LinkResolver, LinkTarget};
pub use model::entry::CodexEntry;
pub use model::world::{Character, LorePage, Race, RecordKind, WorldState};
pub use repo::kv_repo::{KvError, KvStore, MemoryKvStore, SqliteKvStore};
pub use search::{search_world, SearchHit, SearchQuery};
pub use service::{ImportError, ServiceError, WorldService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
