//! World bible records: lore pages, races and characters.
//!
//! # Responsibility
//! - Define the persisted/exported shape of the world bible.
//! - Provide tolerant deserialization so partial documents still load.
//!
//! # Invariants
//! - Every record carries a non-empty `id` after [`WorldState::normalize`].
//! - `updated_at == 0` means "never stamped" and sorts as epoch.
//! - Missing or `null` top-level collections deserialize to empty vectors.
//! - Attributes this crate does not model are kept in `extra` and written back.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const DEFAULT_WORLD_TITLE: &str = "Your World";
pub const DEFAULT_WORLD_TAGLINE: &str = "World Bible • Lore • Races • Characters";

/// Separator used by the one-relationship-per-line editor format.
pub const RELATIONSHIP_SEPARATOR: char = '—';

/// Unix epoch milliseconds.
pub type EpochMs = i64;

/// Kind of world record, used by recent-edit and search projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Lore,
    Race,
    Character,
}

impl RecordKind {
    /// Prefix used when minting ids for this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Lore => "lore",
            Self::Race => "race",
            Self::Character => "char",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Lore => "Lore",
            Self::Race => "Race",
            Self::Character => "Character",
        }
    }
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Mints a fresh record id such as `lore-3f2a…`.
pub fn new_record_id(kind: RecordKind) -> String {
    format!("{}-{}", kind.id_prefix(), Uuid::new_v4().simple())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldMeta {
    pub title: String,
    pub tagline: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for WorldMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_WORLD_TITLE.to_string(),
            tagline: DEFAULT_WORLD_TAGLINE.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LorePage {
    pub id: String,
    pub title: String,
    pub section: String,
    pub body: String,
    pub updated_at: EpochMs,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Race {
    pub id: String,
    pub name: String,
    pub category: String,
    pub vibe: String,
    #[serde(deserialize_with = "null_as_default")]
    pub traits: Vec<String>,
    pub body: String,
    pub updated_at: EpochMs,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Weak, name-based link from one character to another.
///
/// The target is never checked; it may name a character that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub race: String,
    pub role: String,
    pub age: String,
    pub origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    pub bio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub relationships: Vec<Relationship>,
    pub updated_at: EpochMs,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whole world bible, the unit of persistence, export and import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldState {
    #[serde(deserialize_with = "null_as_default")]
    pub world: WorldMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub lore: Vec<LorePage>,
    #[serde(deserialize_with = "null_as_default")]
    pub races: Vec<Race>,
    #[serde(deserialize_with = "null_as_default")]
    pub characters: Vec<Character>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorldState {
    /// Assigns ids to records that arrived without one.
    ///
    /// Existing ids are kept as-is.
    pub fn normalize(&mut self) {
        for page in &mut self.lore {
            ensure_id(&mut page.id, RecordKind::Lore);
        }
        for race in &mut self.races {
            ensure_id(&mut race.id, RecordKind::Race);
        }
        for character in &mut self.characters {
            ensure_id(&mut character.id, RecordKind::Character);
        }
    }

    /// Stamps `now` on every record whose `updated_at` is unset.
    pub fn stamp_missing(&mut self, now: EpochMs) {
        let stamp = |value: &mut EpochMs| {
            if *value == 0 {
                *value = now;
            }
        };
        self.lore.iter_mut().for_each(|x| stamp(&mut x.updated_at));
        self.races.iter_mut().for_each(|x| stamp(&mut x.updated_at));
        self.characters
            .iter_mut()
            .for_each(|x| stamp(&mut x.updated_at));
    }

    pub fn lore_page(&self, id: &str) -> Option<&LorePage> {
        self.lore.iter().find(|page| page.id == id)
    }

    pub fn race(&self, id: &str) -> Option<&Race> {
        self.races.iter().find(|race| race.id == id)
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }
}

fn ensure_id(id: &mut String, kind: RecordKind) {
    if id.trim().is_empty() {
        *id = new_record_id(kind);
    }
}

/// Splits a comma-separated editor field into trimmed, non-empty values.
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the one-relationship-per-line editor format `name — type — note`.
///
/// Everything after the second separator is re-joined into the note. A name
/// containing the separator itself is split at it; there is no escaping.
pub fn parse_relationships(text: &str) -> Vec<Relationship> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let parts = line
                .split(RELATIONSHIP_SEPARATOR)
                .map(str::trim)
                .collect::<Vec<_>>();
            Relationship {
                name: parts.first().copied().unwrap_or_default().to_string(),
                kind: parts.get(1).copied().unwrap_or_default().to_string(),
                note: parts.get(2..).map(|rest| rest.join(" — ")).unwrap_or_default(),
            }
        })
        .collect()
}

/// Inverse of [`parse_relationships`] for pre-filling the editor.
pub fn format_relationships(relationships: &[Relationship]) -> String {
    relationships
        .iter()
        .map(|rel| format!("{} — {} — {}", rel.name, rel.kind, rel.note).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{parse_relationships, split_comma_list, RecordKind, WorldState};

    #[test]
    fn missing_collections_deserialize_to_empty() {
        let state: WorldState =
            serde_json::from_str(r#"{"lore":[{"title":"Magic"}]}"#).expect("should parse");
        assert_eq!(state.lore.len(), 1);
        assert!(state.races.is_empty());
        assert!(state.characters.is_empty());
        assert_eq!(state.world.title, "Your World");
    }

    #[test]
    fn null_collections_deserialize_to_defaults() {
        let state: WorldState = serde_json::from_str(
            r#"{"world":null,"lore":null,"races":null,"characters":[{"name":"Ilsa","keywords":null}]}"#,
        )
        .expect("nulls should parse");
        assert!(state.lore.is_empty());
        assert!(state.races.is_empty());
        assert_eq!(state.world.title, "Your World");
        assert!(state.characters[0].keywords.is_empty());
    }

    #[test]
    fn unknown_attributes_are_written_back() {
        let input = r#"{"version":2,"races":[{"id":"r1","name":"Selkin","stats":{"str":3}}],"characters":[{"id":"c1","portrait":"ilsa.png"}]}"#;
        let state: WorldState = serde_json::from_str(input).expect("should parse");
        assert_eq!(state.races[0].name, "Selkin");
        assert_eq!(state.races[0].extra["stats"]["str"], 3);
        assert!(!state.races[0].extra.contains_key("name"));

        let output = serde_json::to_value(&state).expect("encode");
        assert_eq!(output["version"], 2);
        assert_eq!(output["races"][0]["stats"]["str"], 3);
        assert_eq!(output["characters"][0]["portrait"], "ilsa.png");
    }

    #[test]
    fn normalize_assigns_ids_once() {
        let mut state: WorldState =
            serde_json::from_str(r#"{"lore":[{"title":"A"},{"id":"keep","title":"B"}]}"#)
                .expect("should parse");
        state.normalize();
        let generated = state.lore[0].id.clone();
        assert!(generated.starts_with("lore-"));
        assert_eq!(state.lore[1].id, "keep");

        state.normalize();
        assert_eq!(state.lore[0].id, generated);
    }

    #[test]
    fn updated_at_uses_camel_case_field() {
        let state: WorldState =
            serde_json::from_str(r#"{"races":[{"id":"r1","updatedAt":42}]}"#).expect("parse");
        assert_eq!(state.races[0].updated_at, 42);
    }

    #[test]
    fn relationships_keep_extra_separators_in_note() {
        let rels = parse_relationships("Mira — sister — older — estranged\n\n  Tov — rival  ");
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].name, "Mira");
        assert_eq!(rels[0].kind, "sister");
        assert_eq!(rels[0].note, "older — estranged");
        assert_eq!(rels[1].name, "Tov");
        assert_eq!(rels[1].kind, "rival");
        assert_eq!(rels[1].note, "");
    }

    #[test]
    fn comma_lists_drop_blank_items() {
        assert_eq!(split_comma_list(" a, ,b ,"), vec!["a", "b"]);
        assert_eq!(RecordKind::Character.id_prefix(), "char");
    }
}
