//! AI intake phase.

use super::context::TickContext;
use super::intake::{self, effective_cost};
use crate::action::CombatAction;
use crate::ai::AiPolicy;
use crate::env::RollContext;
use crate::state::{ActionId, Combatant, CombatantId, LogKind};

pub(super) fn run(ctx: &mut TickContext<'_>, policy: &dyn AiPolicy) {
    for id in ctx.state.combatant_ids() {
        if !ctx.state.is_live() {
            return;
        }
        let ready = ctx
            .state
            .combatant(id)
            .is_some_and(|c| c.ai_controlled && c.is_idle());
        if !ready {
            continue;
        }

        enter_boss_phases(ctx, id);

        let Some(choice) = choose(ctx, policy, id) else {
            continue;
        };
        let Some(action) = ctx
            .state
            .combatant(id)
            .and_then(|c| c.action(choice))
            .cloned()
        else {
            continue;
        };
        let Some(target) = intake::default_target(ctx, id, &action) else {
            continue;
        };

        if let Err(err) = intake::submit(ctx, id, choice, Some(target), true) {
            tracing::debug!(actor = %id, action = %choice, "ai intake rejected: {err}");
        }
    }
}

fn enter_boss_phases(ctx: &mut TickContext<'_>, id: CombatantId) {
    let Some(combatant) = ctx.state.combatant_mut(id) else {
        return;
    };
    let percent = combatant.health.percent();
    let Some(profile) = combatant.behavior.as_mut() else {
        return;
    };
    let entered = profile.advance_phases(percent);
    if entered.is_empty() {
        return;
    }

    let name = combatant.name.clone();
    let mut lines = Vec::with_capacity(entered.len());
    for phase in entered {
        lines.push(format!("{name} enters {}", phase.name));
        for action in phase.actions {
            combatant.add_action(action);
        }
    }
    for line in lines {
        ctx.log(LogKind::System, line);
    }
}

/// Candidate actions: owned, off cooldown, available and affordable.
fn candidates<'a>(ctx: &TickContext<'_>, actor: &'a Combatant) -> Vec<&'a CombatAction> {
    let now = ctx.now();
    actor
        .actions()
        .iter()
        .filter(|action| actor.cooldown(action.id) == Some(0))
        .filter(|action| !action.requirements.is_exclusive() || actor.exclusive.is_ready(now))
        .filter(|action| {
            let effectiveness = ctx.effectiveness(actor, action);
            if !effectiveness.is_available() {
                return false;
            }
            let cost = effective_cost(ctx, actor, action, &effectiveness);
            cost.mana <= actor.mana_available() && cost.stamina <= actor.stamina_available()
        })
        .collect()
}

fn choose(ctx: &mut TickContext<'_>, policy: &dyn AiPolicy, id: CombatantId) -> Option<ActionId> {
    let seed = ctx.roll_seed(id, RollContext::AiChoice);
    let roll = ctx.env.rng.next_u32(seed);
    let actor = ctx.state.combatant(id)?;
    let options = candidates(ctx, actor);
    policy.select(actor, &options, roll)
}
