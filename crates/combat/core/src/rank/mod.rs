//! Rank-scaled skill effectiveness model.
//!
//! Pure functions from `(role, rank, awakening phase, specialization)` to
//! skill availability and damage/cost/cooldown multipliers, plus the
//! equip-time affinity cap and the shared exclusive-skill timer.
mod effectiveness;
mod exclusive;
mod features;
mod loadout;
mod role;
mod tier;

pub use effectiveness::{AwakeningPhase, Progression, SkillEffectiveness, Unavailable, evaluate};
pub use exclusive::{ExclusiveTimer, exclusive_cooldown, exclusive_cost};
pub use features::{RankFeatures, StandardRanks, TierRange};
pub use loadout::{EquipError, Loadout};
pub use role::{Role, RoleSet};
pub use tier::HunterRank;

use std::fmt;

/// Sub-choice within a role that unlocks exclusive skills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecializationId(pub u16);

impl fmt::Display for SpecializationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spec:{}", self.0)
    }
}
