//! Immutable action definitions.
//!
//! A [`CombatAction`] is catalog data: it describes what a skill does, what
//! it costs, and who may use it. Runtime state (cooldowns, in-flight
//! preparation) lives on the [`Combatant`](crate::state::Combatant).
mod tags;

pub use tags::ActionTags;

use crate::rank::{RoleSet, SpecializationId};
use crate::state::{ActionId, StatusEffectKind, ThreatLevel};

/// Resource cost paid when an action is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionCost {
    pub mana: u32,
    pub stamina: u32,
}

impl ActionCost {
    pub const FREE: Self = Self {
        mana: 0,
        stamina: 0,
    };

    pub fn mana(mana: u32) -> Self {
        Self { mana, stamina: 0 }
    }

    pub fn stamina(stamina: u32) -> Self {
        Self { mana: 0, stamina }
    }

    /// Scales both components by `multiplier`, rounding to nearest.
    pub fn scaled(self, multiplier: f32) -> Self {
        Self {
            mana: scale_u32(self.mana, multiplier),
            stamina: scale_u32(self.stamina, multiplier),
        }
    }
}

/// A status effect an action attempts to apply on hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub kind: StatusEffectKind,
    pub magnitude: u32,
    pub duration: u32,
}

/// Gating data consumed by the effectiveness model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillRequirements {
    /// Roles for which this skill is native. Empty means every role.
    pub roles: RoleSet,
    /// Zero-based module index; `None` is always visible.
    pub module: Option<u8>,
    /// Set for specialization-exclusive skills.
    pub exclusive: Option<SpecializationId>,
}

impl SkillRequirements {
    pub fn is_exclusive(&self) -> bool {
        self.exclusive.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatAction {
    pub id: ActionId,
    pub name: String,
    pub base_damage: u32,
    pub base_healing: u32,
    pub cost: ActionCost,
    pub cooldown_ticks: u32,
    /// Zero resolves on the intake tick with no telegraph.
    pub preparation_ticks: u32,
    pub tags: ActionTags,
    pub effects: Vec<StatusApplication>,
    /// Explicit threat; classified from damage when absent.
    pub threat: Option<ThreatLevel>,
    pub requirements: SkillRequirements,
}

impl CombatAction {
    pub fn new(id: ActionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.base_damage = damage;
        self
    }

    pub fn with_healing(mut self, healing: u32) -> Self {
        self.base_healing = healing;
        self
    }

    pub fn with_cost(mut self, cost: ActionCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_cooldown(mut self, ticks: u32) -> Self {
        self.cooldown_ticks = ticks;
        self
    }

    pub fn with_preparation(mut self, ticks: u32) -> Self {
        self.preparation_ticks = ticks;
        self
    }

    pub fn with_tags(mut self, tags: ActionTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_effect(mut self, kind: StatusEffectKind, magnitude: u32, duration: u32) -> Self {
        self.effects.push(StatusApplication {
            kind,
            magnitude,
            duration,
        });
        self
    }

    pub fn with_threat(mut self, threat: ThreatLevel) -> Self {
        self.threat = Some(threat);
        self
    }

    pub fn with_requirements(mut self, requirements: SkillRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.preparation_ticks == 0
    }

    pub fn deals_damage(&self) -> bool {
        self.base_damage > 0
    }

    /// Threat against a target with the given maximum health.
    pub fn threat_against(&self, target_max_health: u32) -> ThreatLevel {
        self.threat
            .unwrap_or_else(|| ThreatLevel::classify(self.base_damage, target_max_health))
    }
}

pub(crate) fn scale_u32(value: u32, multiplier: f32) -> u32 {
    let scaled = (value as f32 * multiplier).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= u32::MAX as f32 {
        u32::MAX
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_threat_overrides_classification() {
        let slam = CombatAction::new(ActionId(1), "Slam").with_damage(80);
        assert_eq!(slam.threat_against(100), ThreatLevel::Lethal);

        let feint = slam.clone().with_threat(ThreatLevel::Low);
        assert_eq!(feint.threat_against(100), ThreatLevel::Low);
    }

    #[test]
    fn cost_scaling_rounds_to_nearest() {
        let cost = ActionCost {
            mana: 10,
            stamina: 3,
        };
        assert_eq!(cost.scaled(1.25), ActionCost { mana: 13, stamina: 4 });
        assert_eq!(cost.scaled(0.0), ActionCost::FREE);
    }
}
