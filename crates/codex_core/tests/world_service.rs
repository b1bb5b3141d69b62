use async_trait::async_trait;
use codex_core::config::CodexConfig;
use codex_core::markup::{LinkOutcome, LinkTarget};
use codex_core::service::{
    CharacterEdit, CharacterFilter, InitialSource, LoreEdit, LoreFilter, STARTER_TOPICS,
};
use codex_core::repo::kv_repo::KvResult;
use codex_core::{
    EntrySource, FetchError, ImportError, KvError, KvStore, LorePage, MemoryKvStore, RecordKind,
    ServiceError, WorldService,
};
use std::cell::Cell;
use std::collections::HashMap;

const NOW: i64 = 1_700_000_000_000;

fn fixed_clock() -> i64 {
    NOW
}

#[derive(Default)]
struct MapSource {
    documents: HashMap<String, String>,
}

impl MapSource {
    fn with(mut self, path: &str, text: &str) -> Self {
        self.documents.insert(path.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl EntrySource for MapSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                path: path.to_string(),
                status: 404,
            })
    }
}

/// Memory store whose writes can be switched off to simulate a full disk.
#[derive(Default)]
struct ReadOnlyAfter {
    inner: MemoryKvStore,
    read_only: Cell<bool>,
}

impl KvStore for ReadOnlyAfter {
    fn load(&self, key: &str) -> KvResult<Option<String>> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> KvResult<()> {
        if self.read_only.get() {
            return Err(KvError::from(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
                None,
            )));
        }
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.inner.remove(key)
    }
}

const DEFAULT_WORLD: &str = r#"{
    "world": {"title": "Ashen Reach", "tagline": "Embers and salt"},
    "lore": [
        {"id": "l-old", "title": "Old Wars", "section": "History", "body": "See [[Magic]].", "updatedAt": 10},
        {"id": "l-magic", "title": "Magic", "section": "Systems", "body": "Runes.", "updatedAt": 20}
    ],
    "races": [{"id": "r-elf", "name": "Elf", "traits": ["Long-lived"]}],
    "characters": [
        {"id": "c-ilsa", "name": "Ilsa", "race": "Selkin", "bio": "Archivist."}
    ]
}"#;

fn defaults() -> MapSource {
    MapSource::default().with("data/world.json", DEFAULT_WORLD)
}

fn service(store: &MemoryKvStore) -> WorldService<&MemoryKvStore> {
    WorldService::new(store, CodexConfig::default()).with_clock(fixed_clock)
}

async fn loaded(store: &MemoryKvStore) -> WorldService<&MemoryKvStore> {
    let mut service = service(store);
    service.load_initial(&defaults()).await.unwrap();
    service
}

#[tokio::test]
async fn first_load_uses_defaults_and_persists_them() {
    let store = MemoryKvStore::new();
    let mut service = service(&store);

    let source = service.load_initial(&defaults()).await.unwrap();

    assert_eq!(source, InitialSource::Defaults);
    assert_eq!(service.state().world.title, "Ashen Reach");
    assert_eq!(service.state().races[0].updated_at, NOW);
    assert_eq!(service.state().lore[0].updated_at, 10);
    assert_eq!(service.selection().lore.as_deref(), Some("l-old"));
    assert!(store.load("purple_codex_world_v1").unwrap().is_some());
}

#[tokio::test]
async fn persisted_world_wins_over_defaults() {
    let store = MemoryKvStore::new();
    store
        .save(
            "purple_codex_world_v1",
            r#"{"world": {"title": "Saved"}, "lore": [{"title": "Kept"}]}"#,
        )
        .unwrap();

    let mut service = service(&store);
    let source = service.load_initial(&defaults()).await.unwrap();

    assert_eq!(source, InitialSource::Persisted);
    assert_eq!(service.state().world.title, "Saved");
    assert_eq!(service.state().lore[0].title, "Kept");
    assert!(service.state().lore[0].id.starts_with("lore-"));
    assert!(service.state().races.is_empty());
}

#[tokio::test]
async fn corrupt_persisted_world_falls_back_to_defaults() {
    let store = MemoryKvStore::new();
    store.save("purple_codex_world_v1", "{broken").unwrap();

    let mut service = service(&store);
    let source = service.load_initial(&defaults()).await.unwrap();

    assert_eq!(source, InitialSource::Defaults);
    assert_eq!(service.state().lore.len(), 2);
    assert_eq!(service.notice(), None);
    assert!(store
        .load("purple_codex_world_v1")
        .unwrap()
        .unwrap_or_default()
        .contains("Ashen Reach"));
}

#[tokio::test]
async fn missing_defaults_leave_an_empty_world_with_notice() {
    let store = MemoryKvStore::new();
    let mut service = service(&store);

    let source = service.load_initial(&MapSource::default()).await.unwrap();

    assert_eq!(source, InitialSource::Empty);
    assert!(service.state().lore.is_empty());
    assert!(service
        .notice()
        .unwrap_or_default()
        .starts_with("Could not load default data"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn import_without_races_yields_empty_races() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;

    service
        .import_json(r#"{"world": {"title": "Imported"}, "lore": [{"id": "x", "title": "Only"}]}"#)
        .unwrap();

    assert!(service.state().races.is_empty());
    assert!(service.state().characters.is_empty());
    assert_eq!(service.state().lore[0].updated_at, NOW);
    assert_eq!(service.selection().lore.as_deref(), Some("x"));
    assert_eq!(service.selection().race, None);
}

#[tokio::test]
async fn import_with_null_collections_yields_empty() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;

    service
        .import_json(r#"{"world": null, "lore": [{"id": "x", "title": "Only"}], "races": null, "characters": null}"#)
        .unwrap();

    assert_eq!(service.state().world.title, "Your World");
    assert_eq!(service.state().lore.len(), 1);
    assert!(service.state().races.is_empty());
    assert!(service.state().characters.is_empty());
    assert_eq!(service.selection().character, None);
}

#[tokio::test]
async fn unknown_record_attributes_survive_import_edit_and_export() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;
    service
        .import_json(
            r#"{
                "schema": "codex/2",
                "races": [{"id": "r1", "name": "Selkin", "stats": {"grace": 4}}],
                "characters": [{"id": "c1", "name": "Ilsa", "portrait": "ilsa.png"}]
            }"#,
        )
        .unwrap();

    service
        .save_character(
            "c1",
            &CharacterEdit {
                name: "Ilsa Varn".to_string(),
                ..CharacterEdit::default()
            },
        )
        .unwrap();

    let exported: serde_json::Value =
        serde_json::from_str(&service.export_json().unwrap()).unwrap();
    assert_eq!(exported["schema"], "codex/2");
    assert_eq!(exported["races"][0]["stats"]["grace"], 4);
    assert_eq!(exported["characters"][0]["name"], "Ilsa Varn");
    assert_eq!(exported["characters"][0]["portrait"], "ilsa.png");

    let persisted = store.load("purple_codex_world_v1").unwrap().unwrap();
    assert!(persisted.contains("\"portrait\":\"ilsa.png\""));
}

#[tokio::test]
async fn failed_save_leaves_memory_matching_storage() {
    let store = ReadOnlyAfter::default();
    let mut service = WorldService::new(&store, CodexConfig::default()).with_clock(fixed_clock);
    service.load_initial(&defaults()).await.unwrap();
    let before = service.state().clone();
    let selection = service.selection().clone();
    let stored = store.load("purple_codex_world_v1").unwrap();
    store.read_only.set(true);

    let edit = LoreEdit {
        title: "Renamed".to_string(),
        ..LoreEdit::default()
    };
    assert!(matches!(
        service.save_lore("l-old", &edit),
        Err(ServiceError::Store(_))
    ));
    assert!(service.new_lore_page(LorePage::default()).is_err());
    assert!(service.new_character(Default::default()).is_err());
    assert!(service.delete_race("r-elf").is_err());
    assert!(service.save_world_settings("Other", "").is_err());
    assert!(service.create_starter_page("Magic").is_err());

    assert_eq!(service.state(), &before);
    assert_eq!(service.selection(), &selection);
    assert!(service.recent().is_empty());
    assert_eq!(store.load("purple_codex_world_v1").unwrap(), stored);

    store.read_only.set(false);
    service.save_lore("l-old", &edit).unwrap();
    assert_eq!(service.state().lore[0].title, "Renamed");
}

#[tokio::test]
async fn failed_import_leaves_state_and_storage_untouched() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;
    let before = service.state().clone();
    let stored = store.load("purple_codex_world_v1").unwrap();

    for payload in ["{not json", r#"{"lore": "not a list"}"#, "[1, 2]"] {
        let err = service.import_json(payload).unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
    }

    assert_eq!(service.state(), &before);
    assert_eq!(store.load("purple_codex_world_v1").unwrap(), stored);
}

#[tokio::test]
async fn lore_edits_trim_default_and_track_recent() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;

    let page = service.new_lore_page(LorePage::default()).unwrap();
    assert_eq!(page.title, "New Lore Page");
    assert_eq!(page.section, "Unsorted");
    assert_eq!(service.state().lore[0].id, page.id);

    let saved = service
        .save_lore(
            &page.id,
            &LoreEdit {
                title: "   ".to_string(),
                section: "  Myths ".to_string(),
                body: "  keep spacing ".to_string(),
            },
        )
        .unwrap();
    assert_eq!(saved.title, "Untitled");
    assert_eq!(saved.section, "Myths");
    assert_eq!(saved.body, "  keep spacing ");

    assert_eq!(service.recent().len(), 1);
    assert_eq!(service.recent()[0].kind, RecordKind::Lore);
    assert_eq!(service.recent()[0].title, "Untitled");
    assert!(store.load("purple_codex_recent_v1").unwrap().is_some());

    service.delete_lore(&page.id).unwrap();
    assert_eq!(service.selection().lore.as_deref(), Some("l-old"));
    assert!(service.delete_lore(&page.id).is_err());
}

#[tokio::test]
async fn starter_chip_creates_seeded_page() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;

    let page = service.create_starter_page(STARTER_TOPICS[1]).unwrap();

    assert_eq!(page.title, "Magic");
    assert_eq!(page.section, "Starter");
    assert_eq!(page.body, "## Magic\nWrite here.\n");
}

#[tokio::test]
async fn character_save_parses_lists_and_relationships() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;

    let saved = service
        .save_character(
            "c-ilsa",
            &CharacterEdit {
                name: "Ilsa Varn".to_string(),
                race: " Selkin ".to_string(),
                keywords: "quiet, , archivist".to_string(),
                relationships: "Tov — rival — since — the flood\n".to_string(),
                ..CharacterEdit::default()
            },
        )
        .unwrap();

    assert_eq!(saved.race, "Selkin");
    assert_eq!(saved.keywords, vec!["quiet", "archivist"]);
    assert_eq!(saved.relationships[0].kind, "rival");
    assert_eq!(saved.relationships[0].note, "since — the flood");

    let filtered = service.character_listing(&CharacterFilter {
        text: String::new(),
        race: Some("SELKIN".to_string()),
    });
    assert_eq!(filtered.len(), 1);
    assert_eq!(service.race_options(), vec!["Elf", "Selkin"]);
}

#[tokio::test]
async fn listings_sort_newest_first_and_filter() {
    let store = MemoryKvStore::new();
    let service = loaded(&store).await;

    let all = service.lore_listing(&LoreFilter::default());
    assert_eq!(all[0].id, "l-magic");
    assert_eq!(all[1].id, "l-old");

    let history = service.lore_listing(&LoreFilter {
        text: String::new(),
        section: Some("history".to_string()),
    });
    assert_eq!(history.len(), 1);
    assert_eq!(service.section_options(), vec!["History", "Systems"]);
    assert_eq!(service.race_listing("long-LIVED").len(), 1);
}

#[tokio::test]
async fn links_search_and_export() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;

    let html = service.render_markup("See [[magic]] and [[Nowhere]]").to_html();
    assert!(html.contains("data-link=\"l-magic\""));
    assert!(html.contains("data-link-missing=\"Nowhere\""));

    let outcome = service.follow_link(&LinkTarget::Missing("Nowhere".to_string()));
    match outcome {
        LinkOutcome::Missing { notice, .. } => assert_eq!(
            notice,
            "No page found titled \"Nowhere\". Create it with New Page."
        ),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let outcome = service.follow_link(&LinkTarget::Resolved("l-magic".to_string()));
    assert_eq!(outcome, LinkOutcome::Navigate("l-magic".to_string()));
    assert_eq!(service.selection().lore.as_deref(), Some("l-magic"));

    let hits = service.search("runes");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "l-magic");

    assert_eq!(service.export_file_name(), "ashen_reach_codex.json");
    let exported = service.export_json().unwrap();
    assert!(exported.contains("\n  \"world\""));
    assert!(exported.contains("\"updatedAt\""));
}

#[tokio::test]
async fn wipe_removes_persisted_keys() {
    let store = MemoryKvStore::new();
    let mut service = loaded(&store).await;
    service.create_starter_page("History").unwrap();
    assert_eq!(store.len(), 2);

    service.wipe().unwrap();

    assert!(store.is_empty());
    assert!(service.state().lore.is_empty());
    assert!(service.recent().is_empty());
}
