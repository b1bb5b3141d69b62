use codex_core::codex::filter::{apply_filters, FilterQuery, GroupSelector};
use codex_core::{normalize_collection, BrowserState, NormalizeOptions};
use serde_json::json;

fn entries() -> Vec<codex_core::CodexEntry> {
    normalize_collection(
        vec![
            json!({"name": "Zeph", "description": "A drifting wind spirit"}),
            json!({"name": "Borin", "lore": "Forged under the Ironpeaks"}),
            json!({"name": "Astra", "summary": "Star-touched wanderers"}),
        ],
        NormalizeOptions::default(),
    )
}

fn names_for(group: &str) -> Vec<String> {
    let entries = entries();
    let query = FilterQuery {
        group: GroupSelector::parse(group),
        ..FilterQuery::default()
    };
    apply_filters(&entries, &query)
        .into_iter()
        .map(|entry| entry.name.clone())
        .collect()
}

#[test]
fn buckets_select_by_first_letter_sorted() {
    assert_eq!(names_for("A–E"), vec!["Astra", "Borin"]);
    assert_eq!(names_for("U–Z"), vec!["Zeph"]);
    assert!(names_for("K–O").is_empty());
}

#[test]
fn text_query_is_case_insensitive_over_name_and_blob() {
    let entries = entries();
    let by_blob = FilterQuery {
        text: "IRONPEAKS".to_string(),
        ..FilterQuery::default()
    };
    let hits = apply_filters(&entries, &by_blob);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Borin");

    let by_name = FilterQuery {
        text: "ZEP".to_string(),
        ..FilterQuery::default()
    };
    assert_eq!(apply_filters(&entries, &by_name)[0].name, "Zeph");
}

#[test]
fn browser_keeps_active_entry_visible() {
    let mut browser = BrowserState::new();
    browser.replace_entries(entries());
    assert_eq!(browser.active_id(), Some("Zeph"));

    browser.set_group("A-E");
    assert_eq!(browser.active_id(), Some("Astra"));

    browser.set_text("nothing matches this");
    assert_eq!(browser.active_id(), None);
    assert!(browser.view().detail.is_none());
}
