//! Domain model for the world bible and the codex browser.
//!
//! # Responsibility
//! - Define canonical records shared by services, search and rendering.
//! - Keep persisted JSON naming compatible with exported documents.
//!
//! # Invariants
//! - Every record is identified by a stable string id.
//! - Deletion removes the record; there are no tombstones.

pub mod entry;
pub mod world;
