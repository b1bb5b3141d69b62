//! Recent-edits list.
//!
//! # Invariants
//! - Most recent first.
//! - At most one entry per `(kind, id)` pair.
//! - Never longer than the configured limit.

use crate::model::world::{EpochMs, RecordKind};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub id: String,
    pub title: String,
    /// Time of the edit.
    pub t: EpochMs,
}

/// Moves `entry` to the front, dropping older duplicates and overflow.
pub fn push_recent(list: &mut Vec<RecentEntry>, entry: RecentEntry, limit: usize) {
    list.retain(|item| !(item.kind == entry.kind && item.id == entry.id));
    list.insert(0, entry);
    list.truncate(limit);
}

/// Parses a persisted list; unreadable payloads yield an empty list.
pub fn parse_recent(text: Option<&str>) -> Vec<RecentEntry> {
    let Some(text) = text else {
        return Vec::new();
    };
    match serde_json::from_str(text) {
        Ok(list) => list,
        Err(err) => {
            warn!("event=recent_load module=service status=error error={err}");
            Vec::new()
        }
    }
}
