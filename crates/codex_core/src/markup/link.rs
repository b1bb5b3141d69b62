//! Wikilink resolution against the live entry collection.
//!
//! # Invariants
//! - Matching is case-insensitive and exact after trimming both sides.
//! - Nothing is cached; every call reads the collection it is given.

use crate::model::entry::CodexEntry;
use crate::model::world::LorePage;

/// Looks up an entry id by display title.
pub trait LinkResolver {
    /// Returns the id of the entry titled `title`, if one exists.
    fn resolve(&self, title: &str) -> Option<&str>;
}

/// Resolver that never matches, for contexts without linkable entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn resolve(&self, _title: &str) -> Option<&str> {
        None
    }
}

impl LinkResolver for [LorePage] {
    fn resolve(&self, title: &str) -> Option<&str> {
        let wanted = fold_title(title);
        self.iter()
            .find(|page| fold_title(&page.title) == wanted)
            .map(|page| page.id.as_str())
    }
}

impl LinkResolver for Vec<LorePage> {
    fn resolve(&self, title: &str) -> Option<&str> {
        self.as_slice().resolve(title)
    }
}

impl LinkResolver for [CodexEntry] {
    fn resolve(&self, title: &str) -> Option<&str> {
        let wanted = fold_title(title);
        self.iter()
            .find(|entry| fold_title(&entry.name) == wanted)
            .map(|entry| entry.id.as_str())
    }
}

impl LinkResolver for Vec<CodexEntry> {
    fn resolve(&self, title: &str) -> Option<&str> {
        self.as_slice().resolve(title)
    }
}

fn fold_title(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Target carried by a rendered wikilink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Resolved(String),
    Missing(String),
}

/// What activating a rendered wikilink should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Navigate(String),
    /// Unknown title plus the notice to show the user.
    Missing { title: String, notice: String },
}

/// Maps an activated link to a navigation outcome.
///
/// A resolved id that has since disappeared from the collection is treated
/// as missing.
pub fn follow_link<R: LinkResolver + ?Sized>(
    target: &LinkTarget,
    resolver: &R,
    exists: impl Fn(&str) -> bool,
) -> LinkOutcome {
    match target {
        LinkTarget::Resolved(id) if exists(id) => LinkOutcome::Navigate(id.clone()),
        LinkTarget::Resolved(id) => missing(id),
        LinkTarget::Missing(title) => match resolver.resolve(title) {
            Some(id) => LinkOutcome::Navigate(id.to_string()),
            None => missing(title),
        },
    }
}

fn missing(title: &str) -> LinkOutcome {
    LinkOutcome::Missing {
        title: title.to_string(),
        notice: format!("No page found titled \"{title}\". Create it with New Page."),
    }
}
