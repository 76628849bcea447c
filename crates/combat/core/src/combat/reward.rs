use crate::config::RewardRates;
use crate::state::{Combatant, Victor};

/// Experience and gold granted at the end of a combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub experience: u64,
    pub gold: u64,
    /// Number of enemies counted.
    pub defeated: u32,
}

impl Rewards {
    pub const NONE: Self = Self {
        experience: 0,
        gold: 0,
        defeated: 0,
    };
}

/// Linear in the levels of defeated enemies; nothing when the enemy wins.
pub fn compute_rewards(victor: Victor, enemies: &[Combatant], rates: &RewardRates) -> Rewards {
    if victor == Victor::Enemy {
        return Rewards::NONE;
    }
    enemies
        .iter()
        .filter(|enemy| enemy.is_defeated())
        .fold(Rewards::NONE, |acc, enemy| {
            let level = u64::from(enemy.level);
            Rewards {
                experience: acc.experience + level * rates.experience_per_level,
                gold: acc.gold + level * rates.gold_per_level,
                defeated: acc.defeated + 1,
            }
        })
}
