//! Filter and group engine for normalized codex entries.
//!
//! # Responsibility
//! - Apply group, tag and text selectors in a fixed order.
//! - Derive selector option lists from the loaded collection.
//!
//! # Invariants
//! - Output order is decided by the group stage only; later stages filter.
//! - Tag matching is case-insensitive and exact.
//! - Entries without an A–Z first letter never appear in a bucket.

use crate::model::entry::CodexEntry;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Fixed alphabetic range over the first letter of the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub label: &'static str,
    pub first: char,
    pub last: char,
}

impl Bucket {
    pub fn contains(&self, name: &str) -> bool {
        first_letter(name).is_some_and(|letter| (self.first..=self.last).contains(&letter))
    }
}

/// Contiguous A–Z coverage used for coarse browsing.
pub const BUCKETS: [Bucket; 5] = [
    Bucket { label: "A–E", first: 'A', last: 'E' },
    Bucket { label: "F–J", first: 'F', last: 'J' },
    Bucket { label: "K–O", first: 'K', last: 'O' },
    Bucket { label: "P–T", first: 'P', last: 'T' },
    Bucket { label: "U–Z", first: 'U', last: 'Z' },
];

pub const GROUP_ALL: &str = "All";
pub const GROUP_ALPHA: &str = "A–Z";

/// Group-stage selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupSelector {
    #[default]
    All,
    /// Whole collection sorted by name.
    Alphabetical,
    Bucket(Bucket),
    Tag(String),
}

impl GroupSelector {
    /// Parses a selector label. Hyphens are accepted in place of en dashes.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(GROUP_ALL) {
            return Self::All;
        }
        let canonical = trimmed.replace('-', "–").to_uppercase();
        if canonical == GROUP_ALPHA {
            return Self::Alphabetical;
        }
        BUCKETS
            .iter()
            .find(|bucket| bucket.label == canonical)
            .map(|bucket| Self::Bucket(*bucket))
            .unwrap_or_else(|| Self::Tag(trimmed.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => GROUP_ALL,
            Self::Alphabetical => GROUP_ALPHA,
            Self::Bucket(bucket) => bucket.label,
            Self::Tag(tag) => tag.as_str(),
        }
    }
}

/// Full selector state for one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub text: String,
    pub tag: Option<String>,
    pub group: GroupSelector,
}

/// Uppercase ASCII first letter of a display name, if any.
pub fn first_letter(name: &str) -> Option<char> {
    name.trim()
        .chars()
        .next()
        .map(|ch| ch.to_ascii_uppercase())
        .filter(char::is_ascii_uppercase)
}

/// Case-folded comparison with a case-sensitive tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_by_name(entries: &mut [&CodexEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Runs group, tag and text stages over `entries`.
pub fn apply_filters<'a>(entries: &'a [CodexEntry], query: &FilterQuery) -> Vec<&'a CodexEntry> {
    let mut visible = match &query.group {
        GroupSelector::All => entries.iter().collect::<Vec<_>>(),
        GroupSelector::Alphabetical => {
            let mut all = entries.iter().collect::<Vec<_>>();
            sort_by_name(&mut all);
            all
        }
        GroupSelector::Bucket(bucket) => {
            let mut members = entries
                .iter()
                .filter(|entry| bucket.contains(&entry.name))
                .collect::<Vec<_>>();
            sort_by_name(&mut members);
            members
        }
        GroupSelector::Tag(tag) => {
            let mut members = entries
                .iter()
                .filter(|entry| entry.has_tag(tag))
                .collect::<Vec<_>>();
            sort_by_name(&mut members);
            members
        }
    };

    if let Some(tag) = query.tag.as_deref().filter(|tag| !tag.trim().is_empty()) {
        visible.retain(|entry| entry.has_tag(tag));
    }

    let needle = query.text.trim().to_lowercase();
    if !needle.is_empty() {
        visible.retain(|entry| {
            entry.name.to_lowercase().contains(&needle) || entry.search_text.contains(&needle)
        });
    }

    visible
}

/// Keeps `active` when still visible, otherwise falls back to the first entry.
pub fn reconcile_active(visible: &[&CodexEntry], active: Option<&str>) -> Option<String> {
    match active {
        Some(id) if visible.iter().any(|entry| entry.id == id) => Some(id.to_string()),
        _ => visible.first().map(|entry| entry.id.clone()),
    }
}

/// Distinct tags across the collection, sorted case-insensitively.
///
/// The first spelling seen wins for tags differing only by case.
pub fn tag_options(entries: &[CodexEntry]) -> Vec<String> {
    let mut by_folded = BTreeMap::new();
    for tag in entries.iter().flat_map(|entry| entry.tags.iter()) {
        by_folded
            .entry(tag.to_lowercase())
            .or_insert_with(|| tag.clone());
    }
    by_folded.into_values().collect()
}

/// Group selector labels: fixed groups, buckets, then tags.
pub fn group_options(entries: &[CodexEntry]) -> Vec<String> {
    [GROUP_ALL, GROUP_ALPHA]
        .into_iter()
        .chain(BUCKETS.iter().map(|bucket| bucket.label))
        .map(str::to_string)
        .chain(tag_options(entries))
        .collect()
}
