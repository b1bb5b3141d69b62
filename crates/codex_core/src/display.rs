//! Small display projections shared by list and detail views.

use crate::model::world::{Character, EpochMs, LorePage, Race};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> EpochMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as EpochMs)
        .unwrap_or(0)
}

/// Relative age label such as `5m ago`; `—` for unstamped records.
pub fn time_ago(ts: EpochMs, now: EpochMs) -> String {
    if ts == 0 {
        return "—".to_string();
    }
    let seconds = now.saturating_sub(ts).div_euclid(1000);
    if seconds < 10 {
        return "just now".to_string();
    }
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 48 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// Value or an em-dash placeholder for blank fields.
pub fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}

/// Uppercase first character of a name, or a star for blank names.
pub fn avatar_initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "✶".to_string())
}

/// `Lore / <section> / <title>`, or `Lore` with nothing selected.
pub fn lore_breadcrumb(page: Option<&LorePage>) -> String {
    match page {
        Some(page) => format!(
            "Lore / {} / {}",
            or_dash(&page.section),
            if page.title.is_empty() { "Untitled" } else { page.title.as_str() }
        ),
        None => "Lore".to_string(),
    }
}

pub fn race_breadcrumb(race: Option<&Race>) -> String {
    match race {
        Some(race) => format!("Races / {}", name_or_unnamed(&race.name)),
        None => "Races".to_string(),
    }
}

pub fn character_breadcrumb(character: Option<&Character>) -> String {
    match character {
        Some(character) => format!("Characters / {}", name_or_unnamed(&character.name)),
        None => "Characters".to_string(),
    }
}

fn name_or_unnamed(name: &str) -> &str {
    if name.is_empty() {
        "Unnamed"
    } else {
        name
    }
}
