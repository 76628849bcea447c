//! Borrow bundle handed to every tick phase.

use crate::action::CombatAction;
use crate::config::CombatConfig;
use crate::env::{CombatEnv, RollContext, compute_seed};
use crate::events::CombatEvent;
use crate::rank::{SkillEffectiveness, evaluate};
use crate::state::{Combatant, CombatantId, CombatState, LogKind, Tick};

/// Mutable state plus the read-only collaborators of one engine.
///
/// Events raised while a phase runs are buffered here and published by the
/// engine once the phase sequence is done.
pub(super) struct TickContext<'a> {
    pub state: &'a mut CombatState,
    pub env: &'a CombatEnv,
    pub config: &'a CombatConfig,
    pub events: &'a mut Vec<CombatEvent>,
}

impl TickContext<'_> {
    pub fn now(&self) -> Tick {
        self.state.tick
    }

    /// Appends a combat log line and queues the matching log event.
    pub fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        let entry = self.state.log.push(self.state.tick, kind, message);
        self.events.push(CombatEvent::Log(entry));
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Seed of the next roll for `actor`.
    pub fn roll_seed(&mut self, actor: CombatantId, context: RollContext) -> u64 {
        let nonce = self.state.next_roll_nonce();
        compute_seed(self.state.seed, nonce, actor.0, context as u32)
    }

    pub fn effectiveness(&self, actor: &Combatant, action: &CombatAction) -> SkillEffectiveness {
        evaluate(
            &actor.progression(),
            &action.requirements,
            self.env.ranks.as_ref(),
            self.config.awakening_level,
        )
    }

    pub fn name_of(&self, id: CombatantId) -> String {
        self.state
            .combatant(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    /// Cancels everything a freshly defeated combatant had in flight.
    pub fn handle_defeat(&mut self, id: CombatantId) {
        let Some(combatant) = self.state.combatant_mut(id) else {
            return;
        };
        let name = combatant.name.clone();
        if let Some(prepared) = combatant.prepared.take() {
            self.state.remove_telegraph(prepared.id);
        }
        tracing::debug!(combatant = %id, "defeated");
        self.log(LogKind::Defeat, format!("{name} is defeated"));
    }
}
