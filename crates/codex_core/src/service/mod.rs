//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage, markup and search into world bible use-cases.
//! - Keep front-ends decoupled from persistence details.

pub mod recent;
pub mod world_service;

pub use recent::RecentEntry;
pub use world_service::{
    choose_initial, CharacterEdit, CharacterFilter, ImportError, InitialSource, InitialWorld,
    LoreEdit, LoreFilter, PersistedState, RaceEdit, Selection, ServiceError, ServiceResult,
    WorldService, STARTER_TOPICS,
};
