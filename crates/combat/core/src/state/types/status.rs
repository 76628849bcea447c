//! Status effect system for combatants.
//!
//! Status effects are timed, stacking modifiers: damage over time, regen,
//! shields, crowd control and debuffs.
//!
//! # Tick-based Duration
//!
//! Effects store the number of ticks they have left. The status processor
//! applies each effect's consequence, then decrements every duration once per
//! tick and removes effects that reach zero.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Ticks left before the effect is removed.
    pub remaining: u32,
    /// Per-tick amount (damage, healing, shield floor) or percentage (weaken).
    pub magnitude: u32,
    pub stacks: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, magnitude: u32, duration: u32) -> Self {
        Self {
            kind,
            remaining: duration,
            magnitude,
            stacks: 1,
        }
    }

    /// Per-tick magnitude scaled by the stack count.
    pub fn stacked_magnitude(&self) -> u32 {
        self.magnitude.saturating_mul(self.stacks)
    }
}

/// Types of status effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    Bleed,
    Burn,
    Poison,

    // ========================================================================
    // Crowd control (blocks new actions)
    // ========================================================================
    Freeze,
    Stun,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Raises the shield pool to at least the magnitude every tick.
    Shield,
    /// Heals the magnitude every tick.
    Regen,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Outgoing damage reduced by magnitude percent per stack.
    Weaken,
}

impl StatusEffectKind {
    pub const fn is_damage_over_time(self) -> bool {
        matches!(self, Self::Bleed | Self::Burn | Self::Poison)
    }

    pub const fn incapacitates(self) -> bool {
        matches!(self, Self::Freeze | Self::Stun)
    }

    pub const fn is_beneficial(self) -> bool {
        matches!(self, Self::Shield | Self::Regen)
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Applies an effect, merging with an existing one of the same kind.
    ///
    /// A merge increments the stack count and keeps the longer duration and
    /// the larger magnitude. Returns false if the set is full and the effect
    /// was dropped.
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.stacks = existing.stacks.saturating_add(1);
            existing.remaining = existing.remaining.max(effect.remaining);
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Decrements every duration and removes effects that reached zero.
    ///
    /// Returns the kinds that expired on this call.
    pub fn tick_down(&mut self) -> Vec<StatusEffectKind> {
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
        }

        let expired = self
            .effects
            .iter()
            .filter(|e| e.remaining == 0)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    /// Returns true while any crowd-control effect is active.
    pub fn is_incapacitated(&self) -> bool {
        self.effects.iter().any(|e| e.kind.incapacitates())
    }

    /// Outgoing damage multiplier from weaken stacks, floored at 10%.
    pub fn outgoing_damage_factor(&self) -> f32 {
        match self.get(StatusEffectKind::Weaken) {
            Some(weaken) => {
                let percent = weaken.stacked_magnitude().min(90);
                1.0 - percent as f32 / 100.0
            }
            None => 1.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplication_stacks_and_keeps_longer_duration() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::new(StatusEffectKind::Bleed, 4, 5));
        effects.apply(StatusEffect::new(StatusEffectKind::Bleed, 3, 2));

        let bleed = effects.get(StatusEffectKind::Bleed).unwrap();
        assert_eq!(bleed.stacks, 2);
        assert_eq!(bleed.remaining, 5);
        assert_eq!(bleed.magnitude, 4);
        assert_eq!(bleed.stacked_magnitude(), 8);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn tick_down_removes_expired_effects() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::new(StatusEffectKind::Stun, 0, 1));
        effects.apply(StatusEffect::new(StatusEffectKind::Regen, 5, 3));

        assert!(effects.is_incapacitated());
        let expired = effects.tick_down();

        assert_eq!(expired, vec![StatusEffectKind::Stun]);
        assert!(!effects.is_incapacitated());
        assert_eq!(effects.get(StatusEffectKind::Regen).unwrap().remaining, 2);
    }

    #[test]
    fn repeated_application_never_grows_the_set() {
        let mut effects = StatusEffects::empty();
        for _ in 0..CombatConfig::MAX_STATUS_EFFECTS * 2 {
            assert!(effects.apply(StatusEffect::new(StatusEffectKind::Burn, 1, 1)));
        }
        assert_eq!(effects.len(), 1);
        assert_eq!(
            effects.get(StatusEffectKind::Burn).unwrap().stacks as usize,
            CombatConfig::MAX_STATUS_EFFECTS * 2
        );
    }

    #[test]
    fn weaken_reduces_outgoing_damage() {
        let mut effects = StatusEffects::empty();
        assert_eq!(effects.outgoing_damage_factor(), 1.0);

        effects.apply(StatusEffect::new(StatusEffectKind::Weaken, 50, 3));
        effects.apply(StatusEffect::new(StatusEffectKind::Weaken, 50, 3));
        assert!((effects.outgoing_damage_factor() - 0.1).abs() < f32::EPSILON);
    }
}
