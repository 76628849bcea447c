use super::{CombatantId, PreparedId};
use crate::action::CombatAction;

/// A combatant's commitment to use an action on a target.
///
/// Lives in the combatant's single prepared slot until its countdown reaches
/// zero, then is taken out of the slot and executed exactly once.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreparedAction {
    pub id: PreparedId,
    pub action: CombatAction,
    pub source: CombatantId,
    pub target: CombatantId,
    /// Ticks left before execution. Starts equal to the action's preparation.
    pub remaining: u32,
    /// True iff the action is a channel or ritual.
    pub interruptible: bool,
}

impl PreparedAction {
    pub fn new(
        id: PreparedId,
        action: CombatAction,
        source: CombatantId,
        target: CombatantId,
    ) -> Self {
        Self {
            id,
            remaining: action.preparation_ticks,
            interruptible: action.tags.is_interruptible(),
            action,
            source,
            target,
        }
    }

    /// Advances the countdown by one tick. Returns true once it is due.
    pub fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}
