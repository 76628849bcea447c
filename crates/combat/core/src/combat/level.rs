//! Level interaction policy.
//!
//! The gap is `actor.level - target.level`. Any implementation must be
//! monotone non-decreasing in the gap and its deviation from neutral must be
//! symmetric in sign: `f(g) - f(0) == f(0) - f(-g)` until clamped.

use crate::config::LevelCurveConfig;

pub trait LevelInteraction: Send + Sync {
    /// Multiplier applied to damage and healing.
    fn effect_modifier(&self, gap: i32) -> f32;

    /// Probability in `[0, 1]` that a status application lands.
    fn status_chance(&self, gap: i32) -> f32;
}

/// Linear curve with symmetric clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearLevelCurve {
    config: LevelCurveConfig,
}

impl LinearLevelCurve {
    pub fn new(config: LevelCurveConfig) -> Self {
        Self { config }
    }
}

impl LevelInteraction for LinearLevelCurve {
    fn effect_modifier(&self, gap: i32) -> f32 {
        let swing = self.config.max_swing.abs();
        let raw = self.config.per_level * gap as f32;
        1.0 + raw.clamp(-swing, swing)
    }

    fn status_chance(&self, gap: i32) -> f32 {
        let LevelCurveConfig {
            base_status_chance,
            status_per_level,
            min_status_chance,
            max_status_chance,
            ..
        } = self.config;
        let floor = min_status_chance.clamp(0.0, 1.0);
        let ceiling = max_status_chance.clamp(floor, 1.0);
        (base_status_chance + status_per_level * gap as f32).clamp(floor, ceiling)
    }
}
