//! Action catalog loader.
//!
//! Loads action definitions from RON data files into an [`ActionCatalog`].

use std::path::Path;

use combat_core::CombatAction;

use crate::catalog::ActionCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for action catalogs from RON files.
///
/// RON format: `Vec<CombatAction>`. Files usually enable `unwrap_newtypes`
/// and `implicit_some` so ids and optional fields stay terse.
pub struct ActionLoader;

impl ActionLoader {
    /// Loads the sample catalog compiled into the crate.
    pub fn embedded() -> LoadResult<ActionCatalog> {
        Self::parse(include_str!("../../data/actions.ron"))
    }

    /// Load an action catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ActionCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load actions from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ActionCatalog> {
        let actions: Vec<CombatAction> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        for action in &actions {
            if action.name.is_empty() {
                anyhow::bail!("{} has no name", action.id);
            }
            if action.threat.is_some() && action.is_instant() {
                tracing::warn!(
                    "{} '{}' declares a threat but resolves instantly",
                    action.id,
                    action.name
                );
            }
        }

        let catalog = ActionCatalog::from_actions(actions).map_err(anyhow::Error::msg)?;
        tracing::debug!(actions = catalog.len(), "action catalog loaded");
        Ok(catalog)
    }
}
