//! Data-driven combat content and loaders.
//!
//! This crate provides the upstream collaborators the engine consumes:
//! - Action catalog (data-driven via RON)
//! - Rank feature table (data-driven via TOML)
//! - Combat configuration (data-driven via TOML)
//! - Encounters: the player and enemy rosters of one combat (RON)
//!
//! Content is consumed through the `combat-core` oracle traits and never
//! appears in combat state except as cloned action definitions.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ActionCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, BehaviorSpec, CombatantSpec, ConfigLoader, ContentFactory, Encounter,
    EncounterLoader, EncounterSpec, PhaseSpec, RankLoader, RankTable,
};
