//! Content loaders for reading combat data from files.
//!
//! RON carries the structured catalog and encounter data; TOML carries the
//! flat rank table and engine configuration.

pub mod actions;
pub mod config;
pub mod encounter;
pub mod factory;
pub mod ranks;

pub use actions::ActionLoader;
pub use config::ConfigLoader;
pub use encounter::{BehaviorSpec, CombatantSpec, Encounter, EncounterLoader, EncounterSpec, PhaseSpec};
pub use factory::ContentFactory;
pub use ranks::{RankLoader, RankTable};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
