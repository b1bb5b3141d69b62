//! Index document shapes for folder-based codex collections.
//!
//! # Invariants
//! - Unrecognized shapes produce an empty file list, never an error.
//! - [`IndexShape::file_names`] is trimmed, non-empty and duplicate-free in
//!   first-seen order.

use serde_json::Value;
use std::collections::HashSet;

/// Object keys that may carry the file list, checked in order before the
/// collection's own plural key.
const LIST_KEYS: &[&str] = &["files", "entries"];
/// Object fields that may carry one file name.
const FILE_FIELDS: &[&str] = &["file", "filename", "path", "src"];

/// Parsed index payload.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexShape {
    /// Top-level JSON array.
    List(Vec<Value>),
    /// Object carrying the array under a recognized key.
    Keyed { key: String, items: Vec<Value> },
    Unrecognized,
}

impl IndexShape {
    /// Classifies an index payload. `collection` is the plural key such as
    /// `races` or `classes`.
    pub fn classify(payload: &Value, collection: &str) -> Self {
        match payload {
            Value::Array(items) => Self::List(items.clone()),
            Value::Object(object) => {
                let keyed = |key: &str| match object.get(key) {
                    Some(Value::Array(items)) => Some(Self::Keyed {
                        key: key.to_string(),
                        items: items.clone(),
                    }),
                    _ => None,
                };
                LIST_KEYS
                    .iter()
                    .find_map(|key| keyed(*key))
                    .or_else(|| {
                        if collection.is_empty() {
                            None
                        } else {
                            keyed(collection)
                        }
                    })
                    .unwrap_or(Self::Unrecognized)
            }
            _ => Self::Unrecognized,
        }
    }

    fn items(&self) -> &[Value] {
        match self {
            Self::List(items) => items.as_slice(),
            Self::Keyed { items, .. } => items.as_slice(),
            Self::Unrecognized => &[],
        }
    }

    /// Unique file names to fetch, in index order.
    pub fn file_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items()
            .iter()
            .filter_map(item_file_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

fn item_file_name(item: &Value) -> Option<&str> {
    match item {
        Value::String(name) => Some(name.as_str()),
        Value::Object(object) => FILE_FIELDS
            .iter()
            .find_map(|field| object.get(*field).and_then(Value::as_str)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::IndexShape;
    use serde_json::json;

    #[test]
    fn plain_list_mixes_strings_and_objects() {
        let shape = IndexShape::classify(
            &json!(["elf.json", {"file": "dwarf.json"}, {"path": " orc.json "}, 7]),
            "races",
        );
        assert!(matches!(shape, IndexShape::List(_)));
        assert_eq!(shape.file_names(), vec!["elf.json", "dwarf.json", "orc.json"]);
    }

    #[test]
    fn keyed_object_uses_recognized_keys() {
        let files = IndexShape::classify(&json!({"files": ["a.json"]}), "races");
        assert_eq!(files.file_names(), vec!["a.json"]);

        let plural = IndexShape::classify(&json!({"classes": ["mage.json"]}), "classes");
        assert_eq!(
            plural,
            IndexShape::Keyed {
                key: "classes".to_string(),
                items: vec![json!("mage.json")],
            }
        );
    }

    #[test]
    fn duplicates_and_blanks_are_collapsed() {
        let shape = IndexShape::classify(&json!(["a.json", " a.json", "", "  ", "b.json"]), "x");
        assert_eq!(shape.file_names(), vec!["a.json", "b.json"]);
    }

    #[test]
    fn unknown_shapes_yield_no_files() {
        assert_eq!(IndexShape::classify(&json!({"other": []}), "races"), IndexShape::Unrecognized);
        assert!(IndexShape::classify(&json!("text"), "races").file_names().is_empty());
    }
}
