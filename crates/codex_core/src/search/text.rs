//! Case-insensitive substring search across world records.
//!
//! # Invariants
//! - Hits are ordered lore, then races, then characters; each group keeps
//!   collection order.
//! - Never more than `limit` hits are returned.
//! - A blank query returns no hits.

use crate::model::world::{Character, LorePage, Race, RecordKind, WorldState};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Characters kept before the first hit.
const SNIPPET_LEAD: usize = 50;
/// Characters kept from the hit onward.
const SNIPPET_TAIL: usize = 90;
/// Prefix length used when the snippet field has no hit.
const SNIPPET_FALLBACK: usize = 140;
const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: RecordKind,
    pub id: String,
    pub title: String,
    pub snippet: String,
}

/// Runs one global search pass over `state`.
pub fn search_world(state: &WorldState, query: &SearchQuery) -> Vec<SearchHit> {
    let needle = query.text.trim().to_lowercase();
    if needle.is_empty() || query.limit == 0 {
        return Vec::new();
    }

    let lore = state
        .lore
        .iter()
        .filter(|page| lore_haystack(page).contains(&needle))
        .map(|page| SearchHit {
            kind: RecordKind::Lore,
            id: page.id.clone(),
            title: title_or(&page.title, "Untitled"),
            snippet: snippet_from(&page.body, &needle),
        });
    let races = state
        .races
        .iter()
        .filter(|race| race_haystack(race).contains(&needle))
        .map(|race| {
            let field = if race.body.is_empty() {
                race.vibe.as_str()
            } else {
                race.body.as_str()
            };
            SearchHit {
                kind: RecordKind::Race,
                id: race.id.clone(),
                title: title_or(&race.name, "Unnamed"),
                snippet: snippet_from(field, &needle),
            }
        });
    let characters = state
        .characters
        .iter()
        .filter(|character| character_haystack(character).contains(&needle))
        .map(|character| SearchHit {
            kind: RecordKind::Character,
            id: character.id.clone(),
            title: title_or(&character.name, "Unnamed"),
            snippet: snippet_from(&character.bio, &needle),
        });

    lore.chain(races).chain(characters).take(query.limit).collect()
}

fn title_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn lore_haystack(page: &LorePage) -> String {
    format!("{} {} {}", page.title, page.section, page.body).to_lowercase()
}

pub(crate) fn race_haystack(race: &Race) -> String {
    format!(
        "{} {} {} {} {}",
        race.name,
        race.category,
        race.vibe,
        race.traits.join(","),
        race.body
    )
    .to_lowercase()
}

pub(crate) fn character_haystack(character: &Character) -> String {
    format!(
        "{} {} {} {} {} {}",
        character.name,
        character.race,
        character.role,
        character.origin,
        character.keywords.join(","),
        character.bio
    )
    .to_lowercase()
}

/// Context window around the first case-insensitive hit of `needle`.
///
/// `needle` must already be lower-cased. Without a hit, the first 140
/// characters are returned as-is.
pub fn snippet_from(text: &str, needle: &str) -> String {
    let chars = text.chars().collect::<Vec<_>>();
    let Some(hit) = find_char_index(&chars, needle) else {
        let head = chars.iter().take(SNIPPET_FALLBACK).collect::<String>();
        return if chars.len() > SNIPPET_FALLBACK {
            format!("{head}{ELLIPSIS}")
        } else {
            head
        };
    };

    let start = hit.saturating_sub(SNIPPET_LEAD);
    let end = (hit + SNIPPET_TAIL).min(chars.len());
    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    WHITESPACE_RE.replace_all(&snippet, " ").into_owned()
}

/// Char index of the first hit, comparing char-by-char lower-cased.
fn find_char_index(chars: &[char], needle: &str) -> Option<usize> {
    let folded = chars
        .iter()
        .map(|ch| ch.to_lowercase().next().unwrap_or(*ch))
        .collect::<Vec<_>>();
    let wanted = needle.chars().collect::<Vec<_>>();
    if wanted.is_empty() {
        return Some(0);
    }
    folded
        .windows(wanted.len())
        .position(|window| window == wanted.as_slice())
}

#[cfg(test)]
mod tests {
    use super::{search_world, snippet_from, SearchQuery};
    use crate::model::world::{Character, LorePage, Race, RecordKind, WorldState};

    fn world() -> WorldState {
        WorldState {
            lore: vec![LorePage {
                id: "l1".to_string(),
                title: "Moon Court".to_string(),
                section: "Factions".to_string(),
                body: "The court meets under the silver moon.".to_string(),
                updated_at: 1,
                ..LorePage::default()
            }],
            races: vec![Race {
                id: "r1".to_string(),
                name: "Selkin".to_string(),
                vibe: "tidal, moon-bound".to_string(),
                ..Race::default()
            }],
            characters: vec![Character {
                id: "c1".to_string(),
                name: "Ilsa".to_string(),
                keywords: vec!["Moonlit".to_string()],
                bio: "Quiet archivist.".to_string(),
                ..Character::default()
            }],
            ..WorldState::default()
        }
    }

    #[test]
    fn hits_are_grouped_by_kind_and_capped() {
        let state = world();
        let hits = search_world(&state, &SearchQuery::new(" MOON ", 100));
        let kinds = hits.iter().map(|hit| hit.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![RecordKind::Lore, RecordKind::Race, RecordKind::Character]
        );
        assert_eq!(hits[1].snippet, "tidal, moon-bound");
        assert_eq!(search_world(&state, &SearchQuery::new("moon", 2)).len(), 2);
        assert!(search_world(&state, &SearchQuery::new("   ", 100)).is_empty());
    }

    #[test]
    fn snippet_windows_around_hit_and_collapses_whitespace() {
        let text = format!("{}needle\n\n{}", "a".repeat(60), "b".repeat(100));
        let snippet = snippet_from(&text, "needle");
        assert!(snippet.starts_with('…'));
        assert!(snippet.ends_with('…'));
        assert!(snippet.contains("needle bb"));
        assert_eq!(snippet.chars().count(), 141);
    }

    #[test]
    fn snippet_without_hit_uses_prefix() {
        assert_eq!(snippet_from("short bio", "zzz"), "short bio");
        let long = "x".repeat(200);
        assert_eq!(snippet_from(&long, "zzz").chars().count(), 141);
    }
}
