//! Status effect phase: runs first in every tick.

use super::context::TickContext;
use crate::events::{CombatEvent, DamageEvent, HealEvent};
use crate::state::{LogKind, StatusEffectKind};

pub(super) fn run(ctx: &mut TickContext<'_>) {
    let tick = ctx.now();
    for id in ctx.state.combatant_ids() {
        let Some(combatant) = ctx.state.combatant_mut(id) else {
            continue;
        };
        if combatant.is_defeated() || combatant.status.is_empty() {
            continue;
        }

        let name = combatant.name.clone();
        let effects: Vec<_> = combatant.status.iter().copied().collect();
        let mut lines = Vec::new();
        let mut events = Vec::new();

        for effect in effects {
            let amount = effect.stacked_magnitude();
            match effect.kind {
                kind if kind.is_damage_over_time() => {
                    // bypasses shield and reduction
                    let dealt = combatant.health.deplete(amount);
                    if dealt > 0 {
                        lines.push((LogKind::Status, format!("{name} takes {dealt} {kind} damage")));
                        events.push(CombatEvent::Damage(DamageEvent {
                            tick,
                            source: None,
                            target: id,
                            amount: dealt,
                            absorbed: 0,
                        }));
                    }
                }
                StatusEffectKind::Regen => {
                    let healed = combatant.heal(amount);
                    if healed > 0 {
                        lines.push((LogKind::Healing, format!("{name} regenerates {healed} health")));
                        events.push(CombatEvent::Heal(HealEvent {
                            tick,
                            source: None,
                            target: id,
                            amount: healed,
                        }));
                    }
                }
                StatusEffectKind::Shield => {
                    combatant.shield = combatant.shield.max(effect.magnitude);
                }
                _ => {}
            }
        }

        for kind in combatant.status.tick_down() {
            lines.push((LogKind::Status, format!("{kind} wears off {name}")));
        }
        let defeated = combatant.is_defeated();

        for (kind, line) in lines {
            ctx.log(kind, line);
        }
        for event in events {
            ctx.emit(event);
        }
        if defeated {
            ctx.handle_defeat(id);
        }
    }
}
