use super::RankFeatures;
use crate::action::ActionCost;
use crate::state::Tick;

/// Shared cooldown across every exclusive skill of one character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusiveTimer {
    ready_at: Option<Tick>,
}

impl ExclusiveTimer {
    pub fn is_ready(&self, now: Tick) -> bool {
        self.ready_at.is_none_or(|ready_at| now >= ready_at)
    }

    /// Ticks until an exclusive skill may be used again.
    pub fn remaining(&self, now: Tick) -> u64 {
        self.ready_at.map_or(0, |ready_at| now.until(ready_at))
    }

    /// Starts the shared cooldown at `now`.
    pub fn trigger(&mut self, now: Tick, cooldown_ticks: u32) {
        self.ready_at = Some(now + u64::from(cooldown_ticks));
    }
}

/// Rank-dependent cost of an exclusive skill.
///
/// Each non-zero component of the action's (already scaled) cost is clamped
/// into the rank's exclusive cost range.
pub fn exclusive_cost(cost: ActionCost, features: &RankFeatures) -> ActionCost {
    let clamp = |value: u32| {
        if value == 0 {
            0
        } else {
            features.exclusive_cost.clamp(value)
        }
    };
    ActionCost {
        mana: clamp(cost.mana),
        stamina: clamp(cost.stamina),
    }
}

/// Rank-dependent duration of the shared exclusive cooldown, from the
/// action's (already scaled) cooldown.
pub fn exclusive_cooldown(ticks: u32, features: &RankFeatures) -> u32 {
    features.exclusive_cooldown.clamp(ticks)
}
