//! Codex browser state and render-ready view model.
//!
//! # Responsibility
//! - Own the loaded collection, selectors, active selection and lens.
//! - Expose explicit state transitions that each leave a consistent state.
//!
//! # Invariants
//! - The collection is only ever swapped whole.
//! - After every transition, `active` names a visible entry or is `None`
//!   when nothing is visible.
//! - The lens changes the detail subtitle only, never the visible set.

use super::filter::{
    apply_filters, group_options, reconcile_active, tag_options, FilterQuery, GroupSelector,
};
use super::loader::{LoadError, LoadReport, FAILURE_PREVIEW_LEN};
use crate::markup::render_markup_html;
use crate::model::entry::CodexEntry;
use log::{info, warn};

/// Raw fields rendered in the detail pane, first present wins.
const DETAIL_BODY_FIELDS: &[&str] = &["description", "notes", "lore", "summary"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub tags: Vec<String>,
    /// Rendered markup of the first descriptive field.
    pub body_html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    pub cards: Vec<CardView>,
    pub detail: Option<DetailView>,
    pub group_options: Vec<String>,
    pub tag_options: Vec<String>,
    pub total: usize,
    /// Non-blocking notice from the last load.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    entries: Vec<CodexEntry>,
    query: FilterQuery,
    active: Option<String>,
    lens: Option<String>,
    notice: Option<String>,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CodexEntry] {
        &self.entries
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Applies the outcome of a load cycle.
    ///
    /// A fatal error leaves an empty collection plus a notice; a partial load
    /// keeps what succeeded and names the first missing files.
    pub fn apply_load(&mut self, outcome: Result<LoadReport, LoadError>) {
        match outcome {
            Ok(report) => {
                self.notice = report.failure_preview(FAILURE_PREVIEW_LEN);
                info!(
                    "event=browser_load module=codex status=ok entries={} failed={}",
                    report.entries.len(),
                    report.failures.len()
                );
                self.replace_entries(report.entries);
            }
            Err(err) => {
                warn!("event=browser_load module=codex status=error error={err}");
                self.notice = Some(format!("Could not load the codex index: {err}"));
                self.replace_entries(Vec::new());
            }
        }
    }

    /// Swaps in a new collection and re-validates the active selection.
    pub fn replace_entries(&mut self, entries: Vec<CodexEntry>) {
        self.entries = entries;
        self.reconcile();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.reconcile();
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.query.tag = tag.filter(|value| !value.trim().is_empty());
        self.reconcile();
    }

    pub fn set_group(&mut self, label: &str) {
        self.query.group = GroupSelector::parse(label);
        self.reconcile();
    }

    /// Sets the display-only lens label.
    pub fn set_lens(&mut self, lens: Option<String>) {
        self.lens = lens.filter(|value| !value.trim().is_empty());
    }

    /// Selects a visible entry. Returns `false` when `id` is not visible.
    pub fn select(&mut self, id: &str) -> bool {
        let visible = apply_filters(&self.entries, &self.query);
        if visible.iter().any(|entry| entry.id == id) {
            self.active = Some(id.to_string());
            true
        } else {
            false
        }
    }

    fn reconcile(&mut self) {
        let visible = apply_filters(&self.entries, &self.query);
        self.active = reconcile_active(&visible, self.active.as_deref());
    }

    /// Builds the render-ready view for the current state.
    pub fn view(&self) -> BrowserView {
        let visible = apply_filters(&self.entries, &self.query);
        let active = self.active.as_deref();
        let cards = visible
            .iter()
            .map(|entry| CardView {
                id: entry.id.clone(),
                name: entry.name.clone(),
                tags: entry.tags.clone(),
                active: Some(entry.id.as_str()) == active,
            })
            .collect();
        let detail = visible
            .iter()
            .find(|entry| Some(entry.id.as_str()) == active)
            .map(|entry| self.detail(entry));

        BrowserView {
            cards,
            detail,
            group_options: group_options(&self.entries),
            tag_options: tag_options(&self.entries),
            total: self.entries.len(),
            notice: self.notice.clone(),
        }
    }

    fn detail(&self, entry: &CodexEntry) -> DetailView {
        let base = if entry.tags.is_empty() {
            "Codex entry".to_string()
        } else {
            entry.tags.join(" • ")
        };
        let subtitle = match &self.lens {
            Some(lens) => format!("{lens} lens · {base}"),
            None => base,
        };
        let body = DETAIL_BODY_FIELDS
            .iter()
            .find_map(|field| entry.attr_str(field))
            .unwrap_or_default();

        DetailView {
            id: entry.id.clone(),
            name: entry.name.clone(),
            subtitle,
            tags: entry.tags.clone(),
            body_html: render_markup_html(body, &self.entries),
        }
    }
}
