//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract consumed by the world service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs distinguish "absent" (`Ok(None)`) from failures.

pub mod kv_repo;
