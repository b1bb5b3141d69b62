//! Global search over the world bible.
//!
//! # Responsibility
//! - Match a free-text query across lore, races and characters.
//! - Shape typed hits with short context snippets.

pub mod text;

pub use text::{search_world, snippet_from, SearchHit, SearchQuery};
