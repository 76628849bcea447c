//! Skill effectiveness evaluation.
//!
//! [`evaluate`] is a pure function of a character's progression and a
//! skill's requirements. Nothing here is cached: the engine asks again every
//! time an action is submitted or executed, so rank changes apply at once.
//!
//! Gating runs in a fixed order and stops at the first failure:
//!
//! 1. module tier (rank unlocks 1, 2, then 3 modules)
//! 2. specialization, for exclusive skills
//! 3. awakening phase (own-role only before awakening, malus after)

use super::{HunterRank, Role, SpecializationId};
use crate::action::{ActionCost, SkillRequirements, scale_u32};
use crate::env::RankOracle;
use crate::error::{CombatError, ErrorSeverity};

/// Global progression phase of one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum AwakeningPhase {
    PreAwakening,
    PostAwakening,
}

impl AwakeningPhase {
    pub fn for_level(level: u32, awakening_level: u32) -> Self {
        if level < awakening_level {
            Self::PreAwakening
        } else {
            Self::PostAwakening
        }
    }
}

/// Inputs to the effectiveness model taken from a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub role: Role,
    pub rank: HunterRank,
    pub level: u32,
    pub specialization: Option<SpecializationId>,
    /// Extra foreign-skill slots on top of the rank's affinity cap.
    pub affinity_bonus: u8,
}

/// Why a skill cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unavailable {
    #[error("requires module tier {required_tier}, rank {rank} unlocks {unlocked}")]
    ModuleLocked {
        required_tier: u8,
        unlocked: u8,
        rank: HunterRank,
    },

    #[error("rank {rank} has not unlocked specializations")]
    SpecializationLocked { rank: HunterRank },

    #[error("requires specialization {required}")]
    SpecializationMismatch { required: SpecializationId },

    #[error("{role} cannot use foreign skills before awakening")]
    RoleLocked { role: Role },
}

impl CombatError for Unavailable {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ModuleLocked { .. } => "SKILL_MODULE_LOCKED",
            Self::SpecializationLocked { .. } => "SKILL_SPECIALIZATION_LOCKED",
            Self::SpecializationMismatch { .. } => "SKILL_SPECIALIZATION_MISMATCH",
            Self::RoleLocked { .. } => "SKILL_ROLE_LOCKED",
        }
    }
}

/// Derived usability and multipliers of one skill for one character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffectiveness {
    pub effect: f32,
    pub cost: f32,
    pub cooldown: f32,
    /// Skill is outside the character's role.
    pub foreign: bool,
    pub unavailable: Option<Unavailable>,
}

impl SkillEffectiveness {
    pub fn native() -> Self {
        Self {
            effect: 1.0,
            cost: 1.0,
            cooldown: 1.0,
            foreign: false,
            unavailable: None,
        }
    }

    pub fn locked(reason: Unavailable, foreign: bool) -> Self {
        Self {
            effect: 0.0,
            cost: 0.0,
            cooldown: 0.0,
            foreign,
            unavailable: Some(reason),
        }
    }

    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn scale_cost(&self, cost: ActionCost) -> ActionCost {
        cost.scaled(self.cost)
    }

    pub fn scale_cooldown(&self, ticks: u32) -> u32 {
        scale_u32(ticks, self.cooldown)
    }
}

/// Evaluates whether `progression` may use a skill and at what multipliers.
pub fn evaluate(
    progression: &Progression,
    requirements: &SkillRequirements,
    ranks: &dyn RankOracle,
    awakening_level: u32,
) -> SkillEffectiveness {
    let features = ranks.features(progression.rank);
    let foreign = !requirements.roles.admits(progression.role);

    if let Some(module) = requirements.module
        && module >= features.module_count
    {
        return SkillEffectiveness::locked(
            Unavailable::ModuleLocked {
                required_tier: module + 1,
                unlocked: features.module_count,
                rank: progression.rank,
            },
            foreign,
        );
    }

    if let Some(required) = requirements.exclusive {
        if !features.specialization_unlocked {
            return SkillEffectiveness::locked(
                Unavailable::SpecializationLocked {
                    rank: progression.rank,
                },
                foreign,
            );
        }
        if progression.specialization != Some(required) {
            return SkillEffectiveness::locked(
                Unavailable::SpecializationMismatch { required },
                foreign,
            );
        }
    }

    if !foreign {
        return SkillEffectiveness::native();
    }

    match AwakeningPhase::for_level(progression.level, awakening_level) {
        AwakeningPhase::PreAwakening => SkillEffectiveness::locked(
            Unavailable::RoleLocked {
                role: progression.role,
            },
            true,
        ),
        AwakeningPhase::PostAwakening => SkillEffectiveness {
            effect: features.foreign_effect(),
            cost: features.foreign_cost(),
            cooldown: features.foreign_cooldown(),
            foreign: true,
            unavailable: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{RoleSet, StandardRanks};

    const AWAKENING: u32 = 40;

    fn hunter(role: Role, rank: HunterRank, level: u32) -> Progression {
        Progression {
            role,
            rank,
            level,
            specialization: None,
            affinity_bonus: 0,
        }
    }

    fn skill(roles: RoleSet) -> SkillRequirements {
        SkillRequirements {
            roles,
            ..SkillRequirements::default()
        }
    }

    #[test]
    fn own_role_skills_are_full_strength_in_both_phases() {
        for level in [1, 80] {
            let result = evaluate(
                &hunter(Role::Mage, HunterRank::E, level),
                &skill(RoleSet::MAGE),
                &StandardRanks,
                AWAKENING,
            );
            assert_eq!(result, SkillEffectiveness::native());
        }
    }

    #[test]
    fn foreign_skills_hidden_before_awakening() {
        let result = evaluate(
            &hunter(Role::Mage, HunterRank::A, 39),
            &skill(RoleSet::TANK),
            &StandardRanks,
            AWAKENING,
        );
        assert_eq!(result.effect, 0.0);
        assert_eq!(
            result.unavailable,
            Some(Unavailable::RoleLocked { role: Role::Mage })
        );
    }

    #[test]
    fn foreign_skills_use_rank_malus_after_awakening() {
        let result = evaluate(
            &hunter(Role::Mage, HunterRank::C, 40),
            &skill(RoleSet::TANK),
            &StandardRanks,
            AWAKENING,
        );
        assert!(result.is_available());
        assert!(result.foreign);
        assert!((result.effect - 0.7).abs() < 1e-6);
        assert!((result.cost - 1.3).abs() < 1e-6);
        assert!((result.cooldown - 1.3).abs() < 1e-6);

        let master = evaluate(
            &hunter(Role::Mage, HunterRank::S, 90),
            &skill(RoleSet::TANK),
            &StandardRanks,
            AWAKENING,
        );
        assert_eq!(master.effect, 1.0);
        assert_eq!(master.cost, 1.0);
    }

    #[test]
    fn module_gate_applies_before_phase_rule() {
        let requirements = SkillRequirements {
            roles: RoleSet::MAGE,
            module: Some(2),
            exclusive: None,
        };
        let result = evaluate(
            &hunter(Role::Mage, HunterRank::C, 80),
            &requirements,
            &StandardRanks,
            AWAKENING,
        );
        assert_eq!(
            result.unavailable,
            Some(Unavailable::ModuleLocked {
                required_tier: 3,
                unlocked: 2,
                rank: HunterRank::C,
            })
        );

        let unlocked = evaluate(
            &hunter(Role::Mage, HunterRank::A, 80),
            &requirements,
            &StandardRanks,
            AWAKENING,
        );
        assert!(unlocked.is_available());
    }

    #[test]
    fn exclusive_skills_require_matching_specialization() {
        let requirements = SkillRequirements {
            roles: RoleSet::FIGHTER,
            module: None,
            exclusive: Some(SpecializationId(7)),
        };

        let low = evaluate(
            &hunter(Role::Fighter, HunterRank::D, 80),
            &requirements,
            &StandardRanks,
            AWAKENING,
        );
        assert!(matches!(
            low.unavailable,
            Some(Unavailable::SpecializationLocked { .. })
        ));

        let mut other = hunter(Role::Fighter, HunterRank::B, 80);
        other.specialization = Some(SpecializationId(3));
        let mismatch = evaluate(&other, &requirements, &StandardRanks, AWAKENING);
        assert!(matches!(
            mismatch.unavailable,
            Some(Unavailable::SpecializationMismatch { .. })
        ));

        other.specialization = Some(SpecializationId(7));
        assert!(evaluate(&other, &requirements, &StandardRanks, AWAKENING).is_available());
    }
}
