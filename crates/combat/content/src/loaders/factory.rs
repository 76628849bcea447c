//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;

use crate::catalog::ActionCatalog;
use crate::loaders::{
    ActionLoader, ConfigLoader, EncounterLoader, EncounterSpec, LoadResult, RankLoader, RankTable,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── ranks.toml
/// ├── actions.ron
/// └── encounters/
///     ├── goblin_warren.ron
///     └── shaman_ritual.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the rank feature table from `ranks.toml`.
    pub fn load_ranks(&self) -> LoadResult<RankTable> {
        RankLoader::load(&self.data_dir.join("ranks.toml"))
    }

    /// Load the action catalog from `actions.ron`.
    pub fn load_actions(&self) -> LoadResult<ActionCatalog> {
        ActionLoader::load(&self.data_dir.join("actions.ron"))
    }

    /// Load an encounter from `encounters/{name}.ron`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{}.ron", name));
        EncounterLoader::load(&path)
    }

    /// Lists encounter names available under `encounters/`.
    pub fn encounter_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("encounters");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
