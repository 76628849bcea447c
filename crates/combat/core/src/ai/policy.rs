use crate::action::CombatAction;
use crate::state::{ActionId, Combatant};

/// Chooses one action among an AI combatant's candidates.
///
/// `roll` is a deterministic random value drawn by the engine for this
/// decision; policies must not use any other entropy.
pub trait AiPolicy: Send + Sync {
    fn select(
        &self,
        actor: &Combatant,
        candidates: &[&CombatAction],
        roll: u32,
    ) -> Option<ActionId>;
}

/// Uniform choice over the candidates.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl AiPolicy for RandomPolicy {
    fn select(
        &self,
        _actor: &Combatant,
        candidates: &[&CombatAction],
        roll: u32,
    ) -> Option<ActionId> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[roll as usize % candidates.len()].id)
    }
}

/// Weighted choice using the actor's behavior profile tag weights.
///
/// Falls back to uniform choice for combatants without a profile.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeightedPolicy;

impl AiPolicy for WeightedPolicy {
    fn select(
        &self,
        actor: &Combatant,
        candidates: &[&CombatAction],
        roll: u32,
    ) -> Option<ActionId> {
        let Some(profile) = actor.behavior.as_ref() else {
            return RandomPolicy.select(actor, candidates, roll);
        };

        let weights: Vec<u64> = candidates
            .iter()
            .map(|action| u64::from(profile.weight_of(action)))
            .collect();
        let total: u64 = weights.iter().sum();
        if total == 0 {
            return None;
        }

        let mut point = u64::from(roll) % total;
        for (action, weight) in candidates.iter().zip(weights) {
            if point < weight {
                return Some(action.id);
            }
            point -= weight;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionTags;
    use crate::ai::BehaviorProfile;
    use crate::state::CombatantId;

    fn actions() -> Vec<CombatAction> {
        vec![
            CombatAction::new(ActionId(1), "Claw").with_tags(ActionTags::STRIKE),
            CombatAction::new(ActionId(2), "Hex").with_tags(ActionTags::MAGIC),
        ]
    }

    #[test]
    fn random_policy_covers_every_candidate() {
        let actor = Combatant::new(CombatantId(1), "Imp", 3, 20);
        let owned = actions();
        let candidates: Vec<&CombatAction> = owned.iter().collect();

        assert_eq!(RandomPolicy.select(&actor, &candidates, 0), Some(ActionId(1)));
        assert_eq!(RandomPolicy.select(&actor, &candidates, 1), Some(ActionId(2)));
        assert_eq!(RandomPolicy.select(&actor, &[], 1), None);
    }

    #[test]
    fn weighted_policy_follows_tag_weights() {
        let actor = Combatant::new(CombatantId(1), "Witch", 3, 20)
            .with_behavior(BehaviorProfile::new().with_tag_weight(ActionTags::MAGIC, 9));
        let owned = actions();
        let candidates: Vec<&CombatAction> = owned.iter().collect();

        // Claw has weight 1, Hex weight 10: only roll 0 (mod 11) picks Claw.
        let picks: Vec<_> = (0..11)
            .filter_map(|roll| WeightedPolicy.select(&actor, &candidates, roll))
            .collect();
        assert_eq!(picks.iter().filter(|id| **id == ActionId(1)).count(), 1);
        assert_eq!(picks.iter().filter(|id| **id == ActionId(2)).count(), 10);
    }
}
