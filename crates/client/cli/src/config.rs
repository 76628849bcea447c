//! Skirmish configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ENCOUNTER: &str = "goblin_warren";

#[derive(Clone, Debug)]
pub struct SkirmishConfig {
    /// Encounter file stem under `<content>/encounters`.
    pub encounter: String,
    /// Fixed combat seed. Random when unset.
    pub seed: Option<u64>,
    /// Overrides the tick duration from `config.toml`.
    pub tick_ms: Option<u64>,
    pub max_ticks: Option<u64>,
    /// Content directory. The bundled pack when unset.
    pub content_dir: Option<PathBuf>,
    /// Also write diagnostics to `<dir>/skirmish.log`.
    pub log_dir: Option<PathBuf>,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            encounter: DEFAULT_ENCOUNTER.to_string(),
            seed: None,
            tick_ms: None,
            max_ticks: Some(600),
            content_dir: None,
            log_dir: None,
        }
    }
}

impl SkirmishConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_ENCOUNTER` - Encounter name (default: goblin_warren)
    /// - `SKIRMISH_SEED` - Combat seed (default: random)
    /// - `SKIRMISH_TICK_MS` - Tick duration in milliseconds (default: from content)
    /// - `SKIRMISH_MAX_TICKS` - Tick limit, `0` disables it (default: 600)
    /// - `SKIRMISH_CONTENT_DIR` - Content directory (default: bundled pack)
    /// - `SKIRMISH_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(encounter) = env::var("SKIRMISH_ENCOUNTER")
            && !encounter.trim().is_empty()
        {
            config.encounter = encounter.trim().to_string();
        }

        config.seed = read_env::<u64>("SKIRMISH_SEED");
        config.tick_ms = read_env::<u64>("SKIRMISH_TICK_MS").map(|ms| ms.max(1));

        if let Some(limit) = read_env::<u64>("SKIRMISH_MAX_TICKS") {
            config.max_ticks = (limit > 0).then_some(limit);
        }

        config.content_dir = env::var("SKIRMISH_CONTENT_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("SKIRMISH_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
