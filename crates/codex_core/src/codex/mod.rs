//! Folder-based codex browser pipeline.
//!
//! # Responsibility
//! - Load per-entry documents listed by an index (loader, index, source).
//! - Normalize heterogeneous documents into [`CodexEntry`] records.
//! - Filter, group and project entries into browser view models.
//!
//! # Invariants
//! - Flow is Loader -> Normalizer -> Filter/Group -> view model.
//! - Only an unusable index is fatal; missing entries are reported.
//!
//! [`CodexEntry`]: crate::model::entry::CodexEntry

pub mod browser;
pub mod filter;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod source;
