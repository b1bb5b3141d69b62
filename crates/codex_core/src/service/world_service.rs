//! World bible use-case service.
//!
//! # Responsibility
//! - Own the in-memory world state, selections and recent-edit list.
//! - Apply editor input with trimming and default rules, then persist.
//! - Decide the initial state from persisted data, defaults or nothing.
//!
//! # Invariants
//! - Every mutation is persisted before memory changes; a failed save leaves
//!   state and selections as they were.
//! - A failed import leaves state, selections and storage untouched.
//! - After a deletion the selection moves to the first remaining record.

use crate::codex::source::EntrySource;
use crate::config::CodexConfig;
use crate::display::now_epoch_ms;
use crate::markup::{follow_link, render_markup, LinkOutcome, LinkTarget, RenderedMarkup};
use crate::model::world::{
    format_relationships, new_record_id, parse_relationships, split_comma_list, Character,
    EpochMs, LorePage, Race, RecordKind, WorldState, DEFAULT_WORLD_TITLE,
};
use crate::repo::kv_repo::{KvError, KvStore};
use crate::search::text::{character_haystack, lore_haystack, race_haystack};
use crate::search::{search_world, SearchHit, SearchQuery};
use crate::service::recent::{parse_recent, push_recent, RecentEntry};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Topics offered as one-click seeded lore pages.
pub const STARTER_TOPICS: [&str; 9] = [
    "History",
    "Magic",
    "Factions",
    "Locations",
    "Cosmology",
    "Artifacts",
    "Creatures",
    "Timeline",
    "Rules of the World",
];

const STARTER_SECTION: &str = "Starter";
const UNTITLED: &str = "Untitled";
const UNSORTED: &str = "Unsorted";
const UNNAMED: &str = "Unnamed";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Store(KvError),
    NotFound { kind: RecordKind, id: String },
    Encode(serde_json::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.label()),
            Self::Encode(err) => write!(f, "failed to encode world state: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<KvError> for ServiceError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug)]
pub enum ImportError {
    /// Payload is not a JSON world document.
    InvalidJson(serde_json::Error),
    Service(ServiceError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "Import failed: invalid JSON ({err})"),
            Self::Service(err) => write!(f, "Import failed: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<ServiceError> for ImportError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<KvError> for ImportError {
    fn from(value: KvError) -> Self {
        Self::Service(ServiceError::Store(value))
    }
}

/// What was found under the world storage key.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistedState {
    Parsed(WorldState),
    Absent,
    /// Stored text that could not be decoded, with the decode error.
    Corrupt(String),
}

impl PersistedState {
    pub fn from_stored(text: Option<&str>) -> Self {
        match text {
            None => Self::Absent,
            Some(text) => match serde_json::from_str::<WorldState>(text) {
                Ok(state) => Self::Parsed(state),
                Err(err) => Self::Corrupt(err.to_string()),
            },
        }
    }
}

/// Where the initial world came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSource {
    Persisted,
    Defaults,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitialWorld {
    pub state: WorldState,
    pub source: InitialSource,
    pub notice: Option<String>,
}

/// Picks the initial world: persisted, else defaults, else empty.
///
/// `defaults` is only consulted when nothing usable was persisted. An
/// unreadable persisted world is replaced by the defaults without a notice.
pub fn choose_initial(
    persisted: PersistedState,
    defaults: Option<Result<WorldState, String>>,
) -> InitialWorld {
    if let PersistedState::Parsed(state) = persisted {
        return InitialWorld {
            state,
            source: InitialSource::Persisted,
            notice: None,
        };
    }

    match defaults {
        Some(Ok(state)) => InitialWorld {
            state,
            source: InitialSource::Defaults,
            notice: None,
        },
        Some(Err(reason)) => InitialWorld {
            state: WorldState::default(),
            source: InitialSource::Empty,
            notice: Some(format!("Could not load default data: {reason}")),
        },
        None => InitialWorld {
            state: WorldState::default(),
            source: InitialSource::Empty,
            notice: Some("No default data available.".to_string()),
        },
    }
}

/// Selected record per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub lore: Option<String>,
    pub race: Option<String>,
    pub character: Option<String>,
}

impl Selection {
    fn first_of(state: &WorldState) -> Self {
        Self {
            lore: state.lore.first().map(|page| page.id.clone()),
            race: state.races.first().map(|race| race.id.clone()),
            character: state.characters.first().map(|c| c.id.clone()),
        }
    }
}

/// Lore editor fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoreEdit {
    pub title: String,
    pub section: String,
    pub body: String,
}

impl From<&LorePage> for LoreEdit {
    fn from(page: &LorePage) -> Self {
        Self {
            title: page.title.clone(),
            section: page.section.clone(),
            body: page.body.clone(),
        }
    }
}

/// Race editor fields. `traits` is comma-separated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceEdit {
    pub name: String,
    pub category: String,
    pub vibe: String,
    pub traits: String,
    pub body: String,
}

impl From<&Race> for RaceEdit {
    fn from(race: &Race) -> Self {
        Self {
            name: race.name.clone(),
            category: race.category.clone(),
            vibe: race.vibe.clone(),
            traits: race.traits.join(", "),
            body: race.body.clone(),
        }
    }
}

/// Character editor fields.
///
/// `keywords` is comma-separated; `relationships` is one
/// `name — type — note` line per relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterEdit {
    pub name: String,
    pub race: String,
    pub role: String,
    pub age: String,
    pub origin: String,
    pub keywords: String,
    pub bio: String,
    pub relationships: String,
}

impl From<&Character> for CharacterEdit {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            race: character.race.clone(),
            role: character.role.clone(),
            age: character.age.clone(),
            origin: character.origin.clone(),
            keywords: character.keywords.join(", "),
            bio: character.bio.clone(),
            relationships: format_relationships(&character.relationships),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoreFilter {
    pub text: String,
    /// Exact section, compared case-insensitively.
    pub section: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilter {
    pub text: String,
    /// Exact race name, compared case-insensitively.
    pub race: Option<String>,
}

/// World bible facade over a key-value store.
pub struct WorldService<S: KvStore> {
    store: S,
    config: CodexConfig,
    state: WorldState,
    selection: Selection,
    recent: Vec<RecentEntry>,
    notice: Option<String>,
    clock: fn() -> EpochMs,
}

impl<S: KvStore> WorldService<S> {
    /// Creates a service with an empty world; call [`Self::load_initial`] next.
    pub fn new(store: S, config: CodexConfig) -> Self {
        Self {
            store,
            config,
            state: WorldState::default(),
            selection: Selection::default(),
            recent: Vec::new(),
            notice: None,
            clock: now_epoch_ms,
        }
    }

    /// Replaces the wall clock, for deterministic timestamps.
    pub fn with_clock(mut self, clock: fn() -> EpochMs) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn recent(&self) -> &[RecentEntry] {
        &self.recent
    }

    /// Notice from the last load, reset or import.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn config(&self) -> &CodexConfig {
        &self.config
    }

    /// Loads persisted state, falling back to the default dataset.
    pub async fn load_initial<E: EntrySource + ?Sized>(
        &mut self,
        source: &E,
    ) -> ServiceResult<InitialSource> {
        let stored = self.store.load(&self.config.storage_key)?;
        let persisted = PersistedState::from_stored(stored.as_deref());
        if let PersistedState::Corrupt(reason) = &persisted {
            warn!("event=world_load module=service status=corrupt error={reason}");
        }
        let defaults = match persisted {
            PersistedState::Parsed(_) => None,
            _ => Some(self.fetch_defaults(source).await),
        };

        let initial = choose_initial(persisted, defaults);
        self.recent = parse_recent(self.store.load(&self.config.recent_key)?.as_deref());
        self.install(initial.state, initial.source)?;
        self.notice = initial.notice;
        info!(
            "event=world_load module=service status=ok source={:?} lore={} races={} characters={}",
            initial.source,
            self.state.lore.len(),
            self.state.races.len(),
            self.state.characters.len()
        );
        Ok(initial.source)
    }

    /// Discards the current world and reloads the default dataset.
    pub async fn reset<E: EntrySource + ?Sized>(
        &mut self,
        source: &E,
    ) -> ServiceResult<InitialSource> {
        let defaults = self.fetch_defaults(source).await;
        let initial = choose_initial(PersistedState::Absent, Some(defaults));
        self.install(initial.state, initial.source)?;
        self.notice = initial.notice;
        Ok(initial.source)
    }

    /// Removes every persisted key and clears the in-memory world.
    pub fn wipe(&mut self) -> ServiceResult<()> {
        self.store.remove(&self.config.storage_key)?;
        self.store.remove(&self.config.recent_key)?;
        self.state = WorldState::default();
        self.selection = Selection::default();
        self.recent.clear();
        self.notice = None;
        info!("event=world_wipe module=service status=ok");
        Ok(())
    }

    async fn fetch_defaults<E: EntrySource + ?Sized>(
        &self,
        source: &E,
    ) -> Result<WorldState, String> {
        let path = &self.config.default_data_path;
        let text = source.fetch_text(path).await.map_err(|err| {
            error!("event=world_defaults module=service status=error error={err}");
            err.to_string()
        })?;
        serde_json::from_str(&text).map_err(|err| {
            error!("event=world_defaults module=service status=error path={path} error={err}");
            format!("`{path}` is not a valid world document: {err}")
        })
    }

    /// Normalizes and adopts `state`; defaults get stamped and saved.
    fn install(&mut self, mut state: WorldState, source: InitialSource) -> ServiceResult<()> {
        state.normalize();
        if source == InitialSource::Defaults {
            state.stamp_missing((self.clock)());
            self.persist_state(&state)?;
        }
        self.selection = Selection::first_of(&state);
        self.state = state;
        Ok(())
    }

    fn persist_state(&self, state: &WorldState) -> ServiceResult<()> {
        let text = serde_json::to_string(state).map_err(ServiceError::Encode)?;
        self.store.save(&self.config.storage_key, &text)?;
        Ok(())
    }

    /// Persists `next`, then adopts it. Memory is untouched on error.
    fn commit(&mut self, next: WorldState) -> ServiceResult<()> {
        self.persist_state(&next)?;
        self.state = next;
        Ok(())
    }

    fn touch_recent(&mut self, kind: RecordKind, id: &str, title: &str) -> ServiceResult<()> {
        let entry = RecentEntry {
            kind,
            id: id.to_string(),
            title: title.to_string(),
            t: (self.clock)(),
        };
        let mut recent = self.recent.clone();
        push_recent(&mut recent, entry, self.config.recent_limit);
        let text = serde_json::to_string(&recent).map_err(ServiceError::Encode)?;
        self.store.save(&self.config.recent_key, &text)?;
        self.recent = recent;
        Ok(())
    }

    pub fn clear_recent(&mut self) -> ServiceResult<()> {
        self.store.remove(&self.config.recent_key)?;
        self.recent.clear();
        Ok(())
    }

    pub fn save_world_settings(&mut self, title: &str, tagline: &str) -> ServiceResult<()> {
        let mut next = self.state.clone();
        next.world.title = trimmed_or(title, DEFAULT_WORLD_TITLE);
        next.world.tagline = tagline.trim().to_string();
        self.commit(next)
    }

    // Lore

    /// Creates a lore page at the top of the list and selects it.
    ///
    /// Blank seed fields get the new-page defaults; `id` and `updated_at`
    /// are always replaced.
    pub fn new_lore_page(&mut self, seed: LorePage) -> ServiceResult<LorePage> {
        let page = LorePage {
            id: new_record_id(RecordKind::Lore),
            title: non_empty_or(seed.title, "New Lore Page"),
            section: non_empty_or(seed.section, UNSORTED),
            body: non_empty_or(seed.body, "Write here…\n"),
            updated_at: (self.clock)(),
            extra: seed.extra,
        };
        let mut next = self.state.clone();
        next.lore.insert(0, page.clone());
        self.commit(next)?;
        self.selection.lore = Some(page.id.clone());
        self.touch_recent(RecordKind::Lore, &page.id, &page.title)?;
        Ok(page)
    }

    /// Creates the seeded page for one starter topic.
    pub fn create_starter_page(&mut self, topic: &str) -> ServiceResult<LorePage> {
        self.new_lore_page(LorePage {
            title: topic.to_string(),
            section: STARTER_SECTION.to_string(),
            body: format!("## {topic}\nWrite here.\n"),
            ..LorePage::default()
        })
    }

    pub fn save_lore(&mut self, id: &str, edit: &LoreEdit) -> ServiceResult<LorePage> {
        let now = (self.clock)();
        let mut next = self.state.clone();
        let page = next
            .lore
            .iter_mut()
            .find(|page| page.id == id)
            .ok_or_else(|| not_found(RecordKind::Lore, id))?;
        page.title = trimmed_or(&edit.title, UNTITLED);
        page.section = trimmed_or(&edit.section, UNSORTED);
        page.body = edit.body.clone();
        page.updated_at = now;
        let saved = page.clone();

        self.commit(next)?;
        self.touch_recent(RecordKind::Lore, &saved.id, &saved.title)?;
        Ok(saved)
    }

    pub fn delete_lore(&mut self, id: &str) -> ServiceResult<()> {
        let mut next = self.state.clone();
        next.lore.retain(|page| page.id != id);
        if next.lore.len() == self.state.lore.len() {
            return Err(not_found(RecordKind::Lore, id));
        }
        self.commit(next)?;
        self.selection.lore = self.state.lore.first().map(|page| page.id.clone());
        Ok(())
    }

    pub fn select_lore(&mut self, id: &str) -> bool {
        let found = self.state.lore_page(id).is_some();
        if found {
            self.selection.lore = Some(id.to_string());
        }
        found
    }

    /// Lore pages, most recently updated first, narrowed by `filter`.
    pub fn lore_listing(&self, filter: &LoreFilter) -> Vec<&LorePage> {
        let needle = filter.text.to_lowercase();
        let section = filter.section.as_deref().filter(|s| !s.is_empty());
        let mut items = self
            .state
            .lore
            .iter()
            .filter(|page| lore_haystack(page).contains(&needle))
            .filter(|page| section.map_or(true, |s| page.section.to_lowercase() == s.to_lowercase()))
            .collect::<Vec<_>>();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items
    }

    /// Distinct non-empty sections, sorted.
    pub fn section_options(&self) -> Vec<String> {
        self.state
            .lore
            .iter()
            .map(|page| page.section.as_str())
            .filter(|section| !section.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // Races

    pub fn new_race(&mut self, seed: Race) -> ServiceResult<Race> {
        let race = Race {
            id: new_record_id(RecordKind::Race),
            name: non_empty_or(seed.name, "New Race"),
            category: non_empty_or(seed.category, UNSORTED),
            vibe: seed.vibe,
            traits: seed.traits,
            body: non_empty_or(seed.body, "Describe this race here…\n"),
            updated_at: (self.clock)(),
            extra: seed.extra,
        };
        let mut next = self.state.clone();
        next.races.insert(0, race.clone());
        self.commit(next)?;
        self.selection.race = Some(race.id.clone());
        self.touch_recent(RecordKind::Race, &race.id, &race.name)?;
        Ok(race)
    }

    pub fn save_race(&mut self, id: &str, edit: &RaceEdit) -> ServiceResult<Race> {
        let now = (self.clock)();
        let mut next = self.state.clone();
        let race = next
            .races
            .iter_mut()
            .find(|race| race.id == id)
            .ok_or_else(|| not_found(RecordKind::Race, id))?;
        race.name = trimmed_or(&edit.name, UNNAMED);
        race.category = trimmed_or(&edit.category, UNSORTED);
        race.vibe = edit.vibe.trim().to_string();
        race.traits = split_comma_list(&edit.traits);
        race.body = edit.body.clone();
        race.updated_at = now;
        let saved = race.clone();

        self.commit(next)?;
        self.touch_recent(RecordKind::Race, &saved.id, &saved.name)?;
        Ok(saved)
    }

    pub fn delete_race(&mut self, id: &str) -> ServiceResult<()> {
        let mut next = self.state.clone();
        next.races.retain(|race| race.id != id);
        if next.races.len() == self.state.races.len() {
            return Err(not_found(RecordKind::Race, id));
        }
        self.commit(next)?;
        self.selection.race = self.state.races.first().map(|race| race.id.clone());
        Ok(())
    }

    pub fn select_race(&mut self, id: &str) -> bool {
        let found = self.state.race(id).is_some();
        if found {
            self.selection.race = Some(id.to_string());
        }
        found
    }

    pub fn race_listing(&self, text: &str) -> Vec<&Race> {
        let needle = text.to_lowercase();
        let mut items = self
            .state
            .races
            .iter()
            .filter(|race| race_haystack(race).contains(&needle))
            .collect::<Vec<_>>();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items
    }

    /// Known race names plus races named by characters, sorted and distinct.
    pub fn race_options(&self) -> Vec<String> {
        self.state
            .races
            .iter()
            .map(|race| race.name.as_str())
            .chain(self.state.characters.iter().map(|c| c.race.as_str()))
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // Characters

    pub fn new_character(&mut self, seed: Character) -> ServiceResult<Character> {
        let character = Character {
            id: new_record_id(RecordKind::Character),
            name: non_empty_or(seed.name, "New Character"),
            bio: non_empty_or(seed.bio, "Write their bio here…\n"),
            updated_at: (self.clock)(),
            ..seed
        };
        let mut next = self.state.clone();
        next.characters.insert(0, character.clone());
        self.commit(next)?;
        self.selection.character = Some(character.id.clone());
        self.touch_recent(RecordKind::Character, &character.id, &character.name)?;
        Ok(character)
    }

    pub fn save_character(&mut self, id: &str, edit: &CharacterEdit) -> ServiceResult<Character> {
        let now = (self.clock)();
        let mut next = self.state.clone();
        let character = next
            .characters
            .iter_mut()
            .find(|character| character.id == id)
            .ok_or_else(|| not_found(RecordKind::Character, id))?;
        character.name = trimmed_or(&edit.name, UNNAMED);
        character.race = edit.race.trim().to_string();
        character.role = edit.role.trim().to_string();
        character.age = edit.age.trim().to_string();
        character.origin = edit.origin.trim().to_string();
        character.keywords = split_comma_list(&edit.keywords);
        character.bio = edit.bio.clone();
        character.relationships = parse_relationships(&edit.relationships);
        character.updated_at = now;
        let saved = character.clone();

        self.commit(next)?;
        self.touch_recent(RecordKind::Character, &saved.id, &saved.name)?;
        Ok(saved)
    }

    pub fn delete_character(&mut self, id: &str) -> ServiceResult<()> {
        let mut next = self.state.clone();
        next.characters.retain(|character| character.id != id);
        if next.characters.len() == self.state.characters.len() {
            return Err(not_found(RecordKind::Character, id));
        }
        self.commit(next)?;
        self.selection.character = self.state.characters.first().map(|c| c.id.clone());
        Ok(())
    }

    pub fn select_character(&mut self, id: &str) -> bool {
        let found = self.state.character(id).is_some();
        if found {
            self.selection.character = Some(id.to_string());
        }
        found
    }

    pub fn character_listing(&self, filter: &CharacterFilter) -> Vec<&Character> {
        let needle = filter.text.to_lowercase();
        let race = filter.race.as_deref().filter(|r| !r.is_empty());
        let mut items = self
            .state
            .characters
            .iter()
            .filter(|c| character_haystack(c).contains(&needle))
            .filter(|c| race.map_or(true, |r| c.race.to_lowercase() == r.to_lowercase()))
            .collect::<Vec<_>>();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items
    }

    // Markup, links and search

    /// Renders record text with wikilinks resolved against lore titles.
    pub fn render_markup(&self, text: &str) -> RenderedMarkup {
        render_markup(text, &self.state.lore)
    }

    /// Follows an activated wikilink; navigation also selects the page.
    pub fn follow_link(&mut self, target: &LinkTarget) -> LinkOutcome {
        let outcome = follow_link(target, &self.state.lore, |id| {
            self.state.lore_page(id).is_some()
        });
        if let LinkOutcome::Navigate(id) = &outcome {
            self.selection.lore = Some(id.clone());
        }
        outcome
    }

    pub fn search(&self, text: &str) -> Vec<SearchHit> {
        search_world(
            &self.state,
            &SearchQuery::new(text, self.config.search_result_limit),
        )
    }

    // Import and export

    /// Pretty-printed JSON of the whole world.
    pub fn export_json(&self) -> ServiceResult<String> {
        serde_json::to_string_pretty(&self.state).map_err(ServiceError::Encode)
    }

    /// Suggested export file name, e.g. `your_world_codex.json`.
    pub fn export_file_name(&self) -> String {
        let title = if self.state.world.title.is_empty() {
            "world"
        } else {
            self.state.world.title.as_str()
        };
        format!(
            "{}_codex.json",
            WHITESPACE_RE.replace_all(title, "_").to_lowercase()
        )
    }

    /// Replaces the world with an imported document.
    ///
    /// The payload is decoded and persisted before anything in memory
    /// changes. Selections reset to the first record of each collection.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let mut imported = serde_json::from_str::<WorldState>(text).map_err(|err| {
            warn!("event=world_import module=service status=error error={err}");
            ImportError::InvalidJson(err)
        })?;
        imported.normalize();
        imported.stamp_missing((self.clock)());
        self.persist_state(&imported)?;

        self.selection = Selection::first_of(&imported);
        self.state = imported;
        self.notice = Some("Imported.".to_string());
        info!(
            "event=world_import module=service status=ok lore={} races={} characters={}",
            self.state.lore.len(),
            self.state.races.len(),
            self.state.characters.len()
        );
        Ok(())
    }
}

fn not_found(kind: RecordKind, id: &str) -> ServiceError {
    ServiceError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn trimmed_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
