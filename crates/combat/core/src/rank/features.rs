//! Per-rank feature table.

use super::HunterRank;
use crate::env::RankOracle;

/// Inclusive `[min, max]` range of a rank-dependent quantity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierRange {
    pub min: u32,
    pub max: u32,
}

impl TierRange {
    pub const ZERO: Self = Self { min: 0, max: 0 };

    /// Builds a range, swapping the bounds if given in reverse.
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max.max(self.min))
    }
}

/// What a rank unlocks and how it scales foreign skills.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankFeatures {
    /// Number of skill modules visible (1 to 3).
    pub module_count: u8,
    /// Foreign-role skills that may be equipped at once, before bonuses.
    pub affinity_cap: u8,
    pub specialization_unlocked: bool,
    /// Range the resource cost of an exclusive skill is clamped into.
    pub exclusive_cost: TierRange,
    /// Range the shared exclusive cooldown is clamped into, in ticks.
    pub exclusive_cooldown: TierRange,
    /// Foreign-skill penalty in `[0, 1)`. Zero at full mastery.
    pub foreign_malus: f32,
}

impl RankFeatures {
    pub fn foreign_effect(&self) -> f32 {
        1.0 - self.foreign_malus
    }

    pub fn foreign_cost(&self) -> f32 {
        1.0 + self.foreign_malus
    }

    pub fn foreign_cooldown(&self) -> f32 {
        1.0 + self.foreign_malus
    }
}

/// Built-in rank table.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRanks;

impl StandardRanks {
    pub const fn table(rank: HunterRank) -> RankFeatures {
        match rank {
            HunterRank::E => RankFeatures {
                module_count: 1,
                affinity_cap: 1,
                specialization_unlocked: false,
                exclusive_cost: TierRange::ZERO,
                exclusive_cooldown: TierRange::ZERO,
                foreign_malus: 0.5,
            },
            HunterRank::D => RankFeatures {
                module_count: 1,
                affinity_cap: 1,
                specialization_unlocked: false,
                exclusive_cost: TierRange::ZERO,
                exclusive_cooldown: TierRange::ZERO,
                foreign_malus: 0.4,
            },
            HunterRank::C => RankFeatures {
                module_count: 2,
                affinity_cap: 2,
                specialization_unlocked: true,
                exclusive_cost: TierRange::new(40, 60),
                exclusive_cooldown: TierRange::new(30, 40),
                foreign_malus: 0.3,
            },
            HunterRank::B => RankFeatures {
                module_count: 2,
                affinity_cap: 3,
                specialization_unlocked: true,
                exclusive_cost: TierRange::new(35, 50),
                exclusive_cooldown: TierRange::new(25, 35),
                foreign_malus: 0.2,
            },
            HunterRank::A => RankFeatures {
                module_count: 3,
                affinity_cap: 4,
                specialization_unlocked: true,
                exclusive_cost: TierRange::new(30, 45),
                exclusive_cooldown: TierRange::new(20, 30),
                foreign_malus: 0.1,
            },
            HunterRank::S => RankFeatures {
                module_count: 3,
                affinity_cap: 6,
                specialization_unlocked: true,
                exclusive_cost: TierRange::new(25, 40),
                exclusive_cooldown: TierRange::new(15, 25),
                foreign_malus: 0.0,
            },
        }
    }
}

impl RankOracle for StandardRanks {
    fn features(&self, rank: HunterRank) -> RankFeatures {
        Self::table(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn malus_strictly_decreases_to_zero_at_top() {
        let malus: Vec<f32> = HunterRank::iter()
            .map(|r| StandardRanks.features(r).foreign_malus)
            .collect();
        assert!(malus.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(StandardRanks.features(HunterRank::TOP).foreign_malus, 0.0);
    }

    #[test]
    fn module_counts_unlock_one_two_three() {
        let counts: Vec<u8> = HunterRank::iter()
            .map(|r| StandardRanks.features(r).module_count)
            .collect();
        assert_eq!(counts, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn foreign_multipliers_follow_the_malus() {
        let b = StandardRanks.features(HunterRank::B);
        assert!((b.foreign_effect() - 0.8).abs() < 1e-6);
        assert!((b.foreign_cost() - 1.2).abs() < 1e-6);
        assert!((b.foreign_cooldown() - 1.2).abs() < 1e-6);

        let s = StandardRanks.features(HunterRank::S);
        assert_eq!(s.foreign_cooldown(), 1.0);
    }

    #[test]
    fn tier_range_clamps_into_bounds() {
        let range = TierRange::new(40, 20);
        assert_eq!(range, TierRange { min: 20, max: 40 });
        assert_eq!(range.clamp(5), 20);
        assert_eq!(range.clamp(30), 30);
        assert_eq!(range.clamp(90), 40);
    }
}
