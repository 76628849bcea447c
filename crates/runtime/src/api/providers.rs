//! Asynchronous abstraction for sourcing player intent.
//!
//! Enemies and the squad are driven by the engine's AI policy; the player is
//! driven from outside the tick loop. Runtime users plug in
//! [`ActionProvider`] implementations so a combat can run with human input,
//! scripted rotations, or test fixtures.
use async_trait::async_trait;
use combat_core::{ActionId, CombatState, CombatantId};

use super::errors::Result;

/// A player decision: the action and an optional explicit target.
pub type PlayerIntent = (ActionId, Option<CombatantId>);

/// Trait for providing player actions from a combat snapshot.
///
/// Called once per published tick. Returning `None` lets the tick pass.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_action(&self, state: &CombatState) -> Result<Option<PlayerIntent>>;
}

/// Never acts. Useful for testing or as a fallback.
pub struct IdleActionProvider;

#[async_trait]
impl ActionProvider for IdleActionProvider {
    async fn provide_action(&self, _state: &CombatState) -> Result<Option<PlayerIntent>> {
        Ok(None)
    }
}

/// Cycles through a fixed priority list.
///
/// Picks the first listed action the player owns, has off cooldown, and can
/// pay for, but only while the player is idle (not preparing something).
pub struct RotationProvider {
    priorities: Vec<ActionId>,
}

impl RotationProvider {
    pub fn new(priorities: impl IntoIterator<Item = ActionId>) -> Self {
        Self {
            priorities: priorities.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ActionProvider for RotationProvider {
    async fn provide_action(&self, state: &CombatState) -> Result<Option<PlayerIntent>> {
        let player = &state.player;
        if !player.is_alive() || !player.is_idle() || player.status.is_incapacitated() {
            return Ok(None);
        }

        let choice = self.priorities.iter().copied().find(|&id| {
            let Some(action) = player.action(id) else {
                return false;
            };
            player.cooldown(id) == Some(0)
                && action.cost.mana <= player.mana_available()
                && action.cost.stamina <= player.stamina_available()
        });
        Ok(choice.map(|id| (id, None)))
    }
}
