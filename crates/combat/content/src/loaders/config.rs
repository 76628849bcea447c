//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
///
/// Every field is optional; missing ones keep the engine defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tick_duration_ms == 0 {
            anyhow::bail!("tick_duration_ms must be positive");
        }
        if !(0.0..=1.0).contains(&config.block_reduction) {
            anyhow::bail!(
                "block_reduction must be within [0, 1], got {}",
                config.block_reduction
            );
        }
        if config.dodge_chance > 100 {
            anyhow::bail!("dodge_chance is a percentage, got {}", config.dodge_chance);
        }
        Ok(config)
    }
}
