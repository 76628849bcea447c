/// Combat configuration constants and tunable parameters.
///
/// Every field has a default so partial TOML files only need to override what
/// they change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Wall-clock length of one tick, used by the runtime scheduler.
    pub tick_duration_ms: u64,

    /// Maximum number of entries retained in the combat log (oldest dropped).
    pub log_capacity: usize,

    /// Character level at which the post-awakening phase begins.
    pub awakening_level: u32,

    /// Fraction of strike/pierce damage removed by an in-flight block.
    pub block_reduction: f32,

    /// Percent chance that an in-flight dodge voids a non-area attack.
    pub dodge_chance: u32,

    /// Seed for every random roll in one combat.
    pub seed: u64,

    pub level_curve: LevelCurveConfig,
    pub rewards: RewardRates,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_DURATION_MS: u64 = 1_000;
    pub const DEFAULT_LOG_CAPACITY: usize = 200;
    pub const DEFAULT_AWAKENING_LEVEL: u32 = 40;
    pub const DEFAULT_BLOCK_REDUCTION: f32 = 0.6;
    pub const DEFAULT_DODGE_CHANCE: u32 = 50;

    pub fn new() -> Self {
        Self {
            tick_duration_ms: Self::DEFAULT_TICK_DURATION_MS,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            awakening_level: Self::DEFAULT_AWAKENING_LEVEL,
            block_reduction: Self::DEFAULT_BLOCK_REDUCTION,
            dodge_chance: Self::DEFAULT_DODGE_CHANCE,
            seed: 0,
            level_curve: LevelCurveConfig::default(),
            rewards: RewardRates::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tick_duration_ms(mut self, tick_duration_ms: u64) -> Self {
        self.tick_duration_ms = tick_duration_ms.max(1);
        self
    }

    pub fn with_log_capacity(mut self, log_capacity: usize) -> Self {
        self.log_capacity = log_capacity.max(1);
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of the linear level-interaction curve.
///
/// The effect modifier is `1 + per_level × gap`, clamped to
/// `[1 - max_swing, 1 + max_swing]`; the status chance is
/// `base_status_chance + status_per_level × gap`, clamped to
/// `[min_status_chance, max_status_chance]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelCurveConfig {
    pub per_level: f32,
    pub max_swing: f32,
    pub base_status_chance: f32,
    pub status_per_level: f32,
    pub min_status_chance: f32,
    pub max_status_chance: f32,
}

impl Default for LevelCurveConfig {
    fn default() -> Self {
        Self {
            per_level: 0.05,
            max_swing: 0.5,
            base_status_chance: 0.75,
            status_per_level: 0.05,
            min_status_chance: 0.05,
            max_status_chance: 0.95,
        }
    }
}

/// Linear reward rates applied per defeated enemy level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardRates {
    pub experience_per_level: u64,
    pub gold_per_level: u64,
}

impl Default for RewardRates {
    fn default() -> Self {
        Self {
            experience_per_level: 25,
            gold_per_level: 10,
        }
    }
}
