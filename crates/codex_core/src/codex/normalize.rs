//! Raw codex document normalization.
//!
//! # Responsibility
//! - Derive `id`, display `name`, `tags` and search text from heterogeneous
//!   optional fields.
//! - Coerce every "string or list of strings" field through one accessor.
//!
//! # Invariants
//! - Explicit ids and names are never overwritten.
//! - Re-normalizing [`CodexEntry::to_value`] output yields identical derived
//!   fields.
//! - Ids are unique within one [`normalize_collection`] call.

use crate::config::DEFAULT_TAG_LIMIT;
use crate::model::entry::{CodexEntry, FALLBACK_ENTRY_NAME};
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

const ID_FIELDS: &[&str] = &["id", "key", "slug", "name", "title"];
const NAME_FIELDS: &[&str] = &[
    "name",
    "title",
    "raceName",
    "className",
    "race",
    "class",
    "id",
];
const TAG_FIELDS: &[&str] = &["tags", "traits", "affinities", "type", "category"];
const SEARCH_FIELDS: &[&str] = &[
    "description",
    "notes",
    "traits",
    "tags",
    "title",
    "lore",
    "summary",
    "flavor",
    "history",
];

/// Normalization knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub tag_limit: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            tag_limit: DEFAULT_TAG_LIMIT,
        }
    }
}

/// Coerces an optional scalar-or-list field into trimmed, non-empty strings.
///
/// Numbers and booleans are stringified; nested containers are skipped.
pub fn coerce_list(value: Option<&Value>) -> Vec<String> {
    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    let values = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar).collect(),
        Some(other) => scalar(other).into_iter().collect(),
    };
    values.into_iter().filter(|text| !text.is_empty()).collect()
}

fn first_text(object: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match object.get(*field) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Derives the ordered, capped tag list.
pub fn derive_tags(object: &Map<String, Value>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_FIELDS
        .iter()
        .flat_map(|field| coerce_list(object.get(*field)))
        .filter(|tag| seen.insert(tag.clone()))
        .take(limit)
        .collect()
}

/// Builds the lower-cased searchable text blob.
pub fn derive_search_text(object: &Map<String, Value>) -> String {
    SEARCH_FIELDS
        .iter()
        .flat_map(|field| coerce_list(object.get(*field)))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalizes one raw document. Non-object payloads become an empty record.
pub fn normalize_entry(raw: Value, options: NormalizeOptions) -> CodexEntry {
    let object = match raw {
        Value::Object(object) => object,
        _ => Map::new(),
    };

    let id = first_text(&object, ID_FIELDS).unwrap_or_else(|| Uuid::new_v4().to_string());
    let name =
        first_text(&object, NAME_FIELDS).unwrap_or_else(|| FALLBACK_ENTRY_NAME.to_string());
    let tags = derive_tags(&object, options.tag_limit);
    let search_text = derive_search_text(&object);

    CodexEntry {
        id,
        name,
        tags,
        search_text,
        raw: object,
    }
}

/// Normalizes a loaded batch and makes ids unique within it.
///
/// Later duplicates of an id get a `-2`, `-3`, … suffix in input order.
pub fn normalize_collection(raws: Vec<Value>, options: NormalizeOptions) -> Vec<CodexEntry> {
    let mut taken = HashSet::new();
    raws.into_iter()
        .map(|raw| {
            let mut entry = normalize_entry(raw, options);
            if !taken.insert(entry.id.clone()) {
                let base = entry.id.clone();
                let mut counter = 2;
                while !taken.insert(format!("{base}-{counter}")) {
                    counter += 1;
                }
                entry.id = format!("{base}-{counter}");
            }
            entry
        })
        .collect()
}
