//! Equipped skills and the affinity cap.

use super::{Progression, Unavailable, evaluate};
use crate::action::CombatAction;
use crate::env::RankOracle;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::ActionId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{action} is already equipped")]
    AlreadyEquipped { action: ActionId },

    #[error(transparent)]
    Unavailable(#[from] Unavailable),

    #[error("affinity cap reached: {current}/{max} foreign skills equipped")]
    AffinityCapExceeded { current: usize, max: usize },
}

impl CombatError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyEquipped { .. } => "EQUIP_DUPLICATE",
            Self::Unavailable(inner) => inner.error_code(),
            Self::AffinityCapExceeded { .. } => "EQUIP_AFFINITY_CAP",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    action: ActionId,
    foreign: bool,
}

/// Skills a character has equipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    slots: Vec<Slot>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equips `action` for `progression`.
    ///
    /// Rejects duplicates, skills the effectiveness model reports unavailable,
    /// and foreign skills past `rank cap + affinity bonus`.
    pub fn equip(
        &mut self,
        action: &CombatAction,
        progression: &Progression,
        ranks: &dyn RankOracle,
        awakening_level: u32,
    ) -> Result<(), EquipError> {
        if self.contains(action.id) {
            return Err(EquipError::AlreadyEquipped { action: action.id });
        }

        let effectiveness = evaluate(progression, &action.requirements, ranks, awakening_level);
        if let Some(reason) = effectiveness.unavailable {
            return Err(reason.into());
        }

        if effectiveness.foreign {
            let max = Self::affinity_cap(progression, ranks);
            let current = self.foreign_count();
            if current >= max {
                return Err(EquipError::AffinityCapExceeded { current, max });
            }
        }

        self.slots.push(Slot {
            action: action.id,
            foreign: effectiveness.foreign,
        });
        Ok(())
    }

    /// Removes `action`. Returns false if it was not equipped.
    pub fn unequip(&mut self, action: ActionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.action != action);
        self.slots.len() != before
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.slots.iter().any(|slot| slot.action == action)
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.slots.iter().map(|slot| slot.action)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn foreign_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.foreign).count()
    }

    pub fn affinity_cap(progression: &Progression, ranks: &dyn RankOracle) -> usize {
        let features = ranks.features(progression.rank);
        usize::from(features.affinity_cap) + usize::from(progression.affinity_bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::SkillRequirements;
    use crate::rank::{HunterRank, Role, RoleSet, StandardRanks};

    fn skill(id: u16, roles: RoleSet) -> CombatAction {
        CombatAction::new(ActionId(id), format!("skill-{id}")).with_requirements(
            SkillRequirements {
                roles,
                ..SkillRequirements::default()
            },
        )
    }

    fn awakened_mage(rank: HunterRank, bonus: u8) -> Progression {
        Progression {
            role: Role::Mage,
            rank,
            level: 60,
            specialization: None,
            affinity_bonus: bonus,
        }
    }

    #[test]
    fn rejects_foreign_skill_past_cap() {
        let mage = awakened_mage(HunterRank::E, 0);
        let mut loadout = Loadout::new();

        loadout
            .equip(&skill(1, RoleSet::MAGE), &mage, &StandardRanks, 40)
            .unwrap();
        loadout
            .equip(&skill(2, RoleSet::TANK), &mage, &StandardRanks, 40)
            .unwrap();

        let err = loadout
            .equip(&skill(3, RoleSet::RANGER), &mage, &StandardRanks, 40)
            .unwrap_err();
        assert_eq!(err, EquipError::AffinityCapExceeded { current: 1, max: 1 });
        assert_eq!(loadout.len(), 2);
    }

    #[test]
    fn affinity_bonus_raises_cap() {
        let mage = awakened_mage(HunterRank::E, 1);
        let mut loadout = Loadout::new();
        for id in 1..=2 {
            loadout
                .equip(&skill(id, RoleSet::TANK), &mage, &StandardRanks, 40)
                .unwrap();
        }
        assert_eq!(loadout.foreign_count(), 2);
    }

    #[test]
    fn rejects_duplicates_and_locked_skills() {
        let mage = awakened_mage(HunterRank::E, 0);
        let mut loadout = Loadout::new();
        let bolt = skill(1, RoleSet::MAGE);
        loadout.equip(&bolt, &mage, &StandardRanks, 40).unwrap();

        assert_eq!(
            loadout.equip(&bolt, &mage, &StandardRanks, 40),
            Err(EquipError::AlreadyEquipped { action: ActionId(1) })
        );

        let young = Progression { level: 5, ..mage };
        assert!(matches!(
            loadout.equip(&skill(2, RoleSet::TANK), &young, &StandardRanks, 40),
            Err(EquipError::Unavailable(Unavailable::RoleLocked { .. }))
        ));
    }

    #[test]
    fn unequip_frees_affinity() {
        let mage = awakened_mage(HunterRank::E, 0);
        let mut loadout = Loadout::new();
        loadout
            .equip(&skill(2, RoleSet::TANK), &mage, &StandardRanks, 40)
            .unwrap();
        assert!(loadout.unequip(ActionId(2)));
        assert!(!loadout.unequip(ActionId(2)));
        loadout
            .equip(&skill(3, RoleSet::TANK), &mage, &StandardRanks, 40)
            .unwrap();
    }
}
