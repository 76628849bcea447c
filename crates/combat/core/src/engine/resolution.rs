//! Prepared-action advance and action execution.

use super::context::TickContext;
use crate::action::{ActionTags, CombatAction};
use crate::combat::{CounterOutcome, damage};
use crate::env::RollContext;
use crate::events::{CombatEvent, DamageEvent, HealEvent};
use crate::state::{CombatantId, LogKind, StatusEffect, StatusEffectKind};

/// Advances every living combatant's prepared action and executes the due
/// ones. Returns how many actions executed.
pub(super) fn advance(ctx: &mut TickContext<'_>) -> usize {
    let mut executed = 0;
    for id in ctx.state.combatant_ids() {
        let Some(combatant) = ctx.state.combatant_mut(id) else {
            continue;
        };
        if combatant.is_defeated() {
            continue;
        }
        let due = combatant.prepared.as_mut().is_some_and(|p| p.advance());
        if !due {
            continue;
        }
        let Some(prepared) = combatant.prepared.take() else {
            continue;
        };
        ctx.state.remove_telegraph(prepared.id);

        let name = ctx.name_of(id);
        ctx.log(
            LogKind::Action,
            format!("{name} unleashes {}", prepared.action.name),
        );
        execute(ctx, prepared.source, &prepared.action, prepared.target);
        executed += 1;
    }
    executed
}

/// Resolves `action` from `actor_id` against `target_id`.
///
/// The actor's cooldown for the action is set on every path, including a
/// lost target or a counter.
pub(super) fn execute(
    ctx: &mut TickContext<'_>,
    actor_id: CombatantId,
    action: &CombatAction,
    target_id: CombatantId,
) {
    let Some(actor) = ctx.state.combatant(actor_id) else {
        return;
    };
    let effectiveness = ctx.effectiveness(actor, action);
    let cooldown = effectiveness.scale_cooldown(action.cooldown_ticks);
    let actor_name = actor.name.clone();
    let actor_level = actor.level;
    let weaken = actor.status.outgoing_damage_factor();

    resolve(
        ctx,
        Attack {
            actor_id,
            actor_name,
            actor_level,
            weaken,
            effect: effectiveness.effect,
            action,
            target_id,
        },
    );

    if let Some(actor) = ctx.state.combatant_mut(actor_id) {
        actor.set_cooldown(action.id, cooldown);
    }
}

struct Attack<'a> {
    actor_id: CombatantId,
    actor_name: String,
    actor_level: u32,
    weaken: f32,
    effect: f32,
    action: &'a CombatAction,
    target_id: CombatantId,
}

fn resolve(ctx: &mut TickContext<'_>, attack: Attack<'_>) {
    let Attack {
        actor_id,
        actor_name,
        actor_level,
        weaken,
        effect,
        action,
        target_id,
    } = attack;

    let Some(target) = ctx.state.combatant(target_id).filter(|t| t.is_alive()) else {
        ctx.log(
            LogKind::TargetLost,
            format!("{actor_name}'s {} has no target", action.name),
        );
        return;
    };
    let target_name = target.name.clone();
    let gap = actor_level as i32 - target.level as i32;
    let level_modifier = ctx.env.levels.effect_modifier(gap);
    let hostile = ctx.state.side_of(actor_id) != ctx.state.side_of(target_id);

    // ===== counter rules against the target's in-flight action =====
    let mut multiplier = 1.0;
    if hostile && let Some(in_flight) = target.prepared.as_ref() {
        let in_flight_name = in_flight.action.name.clone();
        let in_flight_tags = in_flight.action.tags;

        if action.tags.contains(ActionTags::INTERRUPT) && in_flight.interruptible {
            if let Some(target) = ctx.state.combatant_mut(target_id)
                && let Some(cancelled) = target.prepared.take()
            {
                ctx.state.remove_telegraph(cancelled.id);
            }
            ctx.log(
                LogKind::Counter,
                format!("{actor_name} interrupts {target_name}'s {in_flight_name}"),
            );
        } else if action.deals_damage() {
            if in_flight_tags.contains(ActionTags::BLOCK) && action.tags.is_blockable() {
                multiplier *= 1.0 - ctx.config.block_reduction.clamp(0.0, 1.0);
                ctx.log(
                    LogKind::Counter,
                    format!("{target_name} blocks {}", action.name),
                );
            }

            if in_flight_tags.contains(ActionTags::DODGE)
                && !action.tags.contains(ActionTags::AREA)
            {
                let seed = ctx.roll_seed(target_id, RollContext::Dodge);
                if ctx.env.rng.chance(seed, ctx.config.dodge_chance) {
                    ctx.log(
                        LogKind::Counter,
                        format!("{target_name} dodges {}", action.name),
                    );
                    return;
                }
            }

            match ctx.env.interactions.resolve(action.tags, in_flight_tags) {
                CounterOutcome::Unaffected => {}
                CounterOutcome::Countered { message } => {
                    ctx.log(LogKind::Counter, format!("{}: {message}", action.name));
                    return;
                }
                CounterOutcome::Modified { modifier, message } => {
                    multiplier *= modifier;
                    ctx.log(LogKind::Counter, format!("{}: {message}", action.name));
                }
            }
        }
    }

    // ===== damage =====
    if action.deals_damage() {
        let amount = damage::outgoing(
            action.base_damage,
            effect * multiplier,
            level_modifier,
            weaken,
        );
        if let Some(target) = ctx.state.combatant_mut(target_id) {
            let applied = target.take_damage(amount);
            let defeated = target.is_defeated();

            let mut line = format!(
                "{actor_name} hits {target_name} with {} for {} damage",
                action.name, applied.dealt
            );
            if applied.absorbed > 0 {
                line.push_str(&format!(" ({} absorbed)", applied.absorbed));
            }
            ctx.log(LogKind::Damage, line);
            ctx.emit(CombatEvent::Damage(DamageEvent {
                tick: ctx.now(),
                source: Some(actor_id),
                target: target_id,
                amount: applied.dealt,
                absorbed: applied.absorbed,
            }));
            if defeated {
                ctx.handle_defeat(target_id);
            }
        }
    }

    // ===== healing =====
    if action.base_healing > 0 {
        // damaging actions drain into the actor; support actions heal the target
        let recipient = if action.deals_damage() {
            actor_id
        } else {
            target_id
        };
        let amount = damage::outgoing(action.base_healing, effect, 1.0, 1.0);
        if let Some(combatant) = ctx.state.combatant_mut(recipient) {
            let healed = combatant.heal(amount);
            let name = combatant.name.clone();
            if healed > 0 {
                ctx.log(
                    LogKind::Healing,
                    format!(
                        "{actor_name}'s {} restores {healed} health to {name}",
                        action.name
                    ),
                );
                ctx.emit(CombatEvent::Heal(HealEvent {
                    tick: ctx.now(),
                    source: Some(actor_id),
                    target: recipient,
                    amount: healed,
                }));
            }
        }
    }

    // ===== status applications =====
    for application in &action.effects {
        let recipient = if hostile && application.kind.is_beneficial() {
            actor_id
        } else {
            target_id
        };
        if ctx
            .state
            .combatant(recipient)
            .is_none_or(|c| c.is_defeated())
        {
            continue;
        }

        if recipient != actor_id && hostile {
            let chance = ctx.env.levels.status_chance(gap);
            let seed = ctx.roll_seed(recipient, RollContext::Status);
            if !ctx.env.rng.chance_f32(seed, chance) {
                let name = ctx.name_of(recipient);
                ctx.log(
                    LogKind::Resist,
                    format!("{name} resists {}", application.kind),
                );
                continue;
            }
        }

        let status = StatusEffect::new(
            application.kind,
            application.magnitude,
            application.duration,
        );
        if let Some(combatant) = ctx.state.combatant_mut(recipient) {
            if !combatant.status.apply(status) {
                continue;
            }
            if application.kind == StatusEffectKind::Shield {
                combatant.shield = combatant.shield.max(application.magnitude);
            }
            let name = combatant.name.clone();
            ctx.log(
                LogKind::Status,
                format!("{name} gains {} from {}", application.kind, action.name),
            );
        }
    }
}
