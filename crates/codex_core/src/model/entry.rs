//! Normalized codex entry loaded from a folder-based index.
//!
//! # Invariants
//! - `id` is non-empty and unique within one loaded collection.
//! - `tags` is deduplicated in first-seen order and never exceeds the
//!   configured tag limit.
//! - `search_text` is already lower-cased.

use serde_json::{Map, Value};

/// Display label used when a raw entry carries no usable name.
pub const FALLBACK_ENTRY_NAME: &str = "Unnamed";

/// Generic codex record (race, class or any other folder-loaded document).
#[derive(Debug, Clone, PartialEq)]
pub struct CodexEntry {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    /// Lower-cased concatenation of descriptive fields.
    pub search_text: String,
    /// Source attributes, passed through untouched apart from derived fields.
    pub raw: Map<String, Value>,
}

impl CodexEntry {
    /// Returns whether any tag equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|value| value.to_lowercase() == wanted)
    }

    /// Raw string attribute, if present and textual.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    /// Re-serializes the entry with its identity fields written back.
    ///
    /// Only `id` and `name` are written; tags and search text re-derive to
    /// the same values from the untouched source fields.
    pub fn to_value(&self) -> Value {
        let mut object = self.raw.clone();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        object.insert("name".to_string(), Value::String(self.name.clone()));
        Value::Object(object)
    }
}
