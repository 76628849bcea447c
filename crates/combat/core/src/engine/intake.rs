//! Action intake shared by the player and the AI.
//!
//! Checks run in a fixed order and the first failure wins. Nothing is
//! charged unless every check passes.

use super::context::TickContext;
use super::{resolution, telegraphs};
use crate::action::{ActionCost, CombatAction};
use crate::error::{CombatError, ErrorSeverity};
use crate::rank::{SkillEffectiveness, Unavailable, exclusive_cooldown, exclusive_cost};
use crate::state::{
    ActionId, Combatant, CombatantId, LogKind, PreparedAction, PreparedId, Side, Telegraph,
};

/// Why an action was not accepted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("combat is not accepting actions")]
    NotAccepting,

    #[error("unknown combatant {0}")]
    UnknownActor(CombatantId),

    #[error("actor is defeated")]
    ActorDefeated,

    #[error("{action} not available")]
    UnknownAction { action: ActionId },

    #[error("{action} not available: {reason}")]
    Unavailable {
        action: ActionId,
        reason: Unavailable,
    },

    #[error("{action} on cooldown ({remaining} ticks)")]
    OnCooldown { action: ActionId, remaining: u32 },

    #[error("incapacitated")]
    Incapacitated,

    #[error("exclusive cooldown ({remaining} ticks)")]
    ExclusiveCooldown { remaining: u64 },

    #[error("insufficient mana ({required} needed, {available} available)")]
    InsufficientMana { required: u32, available: u32 },

    #[error("insufficient stamina ({required} needed, {available} available)")]
    InsufficientStamina { required: u32, available: u32 },

    #[error("busy preparing another action")]
    Busy,

    #[error("no valid target")]
    NoTarget,
}

impl CombatError for IntakeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. }
            | Self::Incapacitated
            | Self::ExclusiveCooldown { .. }
            | Self::InsufficientMana { .. }
            | Self::InsufficientStamina { .. }
            | Self::Busy
            | Self::NotAccepting => ErrorSeverity::Recoverable,
            Self::UnknownActor(_)
            | Self::ActorDefeated
            | Self::UnknownAction { .. }
            | Self::Unavailable { .. }
            | Self::NoTarget => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAccepting => "INTAKE_NOT_ACCEPTING",
            Self::UnknownActor(_) => "INTAKE_UNKNOWN_ACTOR",
            Self::ActorDefeated => "INTAKE_ACTOR_DEFEATED",
            Self::UnknownAction { .. } => "INTAKE_UNKNOWN_ACTION",
            Self::Unavailable { .. } => "INTAKE_UNAVAILABLE",
            Self::OnCooldown { .. } => "INTAKE_ON_COOLDOWN",
            Self::Incapacitated => "INTAKE_INCAPACITATED",
            Self::ExclusiveCooldown { .. } => "INTAKE_EXCLUSIVE_COOLDOWN",
            Self::InsufficientMana { .. } => "INTAKE_INSUFFICIENT_MANA",
            Self::InsufficientStamina { .. } => "INTAKE_INSUFFICIENT_STAMINA",
            Self::Busy => "INTAKE_BUSY",
            Self::NoTarget => "INTAKE_NO_TARGET",
        }
    }
}

/// What happened to an accepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntakeOutcome {
    /// Zero preparation: resolved on the spot.
    Resolved,
    /// Stored in the actor's prepared slot and telegraphed.
    Prepared { id: PreparedId, ticks: u32 },
}

/// Resource cost of `action` for `actor` after rank scaling.
pub(super) fn effective_cost(
    ctx: &TickContext<'_>,
    actor: &Combatant,
    action: &CombatAction,
    effectiveness: &SkillEffectiveness,
) -> ActionCost {
    let cost = effectiveness.scale_cost(action.cost);
    if action.requirements.is_exclusive() {
        exclusive_cost(cost, &ctx.env.ranks.features(actor.rank))
    } else {
        cost
    }
}

/// Runs every intake check without mutating anything.
fn validate(
    ctx: &TickContext<'_>,
    actor: &Combatant,
    action_id: ActionId,
) -> Result<(CombatAction, ActionCost), IntakeError> {
    if !actor.is_alive() {
        return Err(IntakeError::ActorDefeated);
    }

    let action = actor
        .action(action_id)
        .ok_or(IntakeError::UnknownAction { action: action_id })?;
    let effectiveness = ctx.effectiveness(actor, action);
    if let Some(reason) = effectiveness.unavailable.clone() {
        return Err(IntakeError::Unavailable {
            action: action_id,
            reason,
        });
    }

    let remaining = actor.cooldown(action_id).unwrap_or(0);
    if remaining > 0 {
        return Err(IntakeError::OnCooldown {
            action: action_id,
            remaining,
        });
    }

    if actor.status.is_incapacitated() {
        return Err(IntakeError::Incapacitated);
    }

    let now = ctx.now();
    if action.requirements.is_exclusive() && !actor.exclusive.is_ready(now) {
        return Err(IntakeError::ExclusiveCooldown {
            remaining: actor.exclusive.remaining(now),
        });
    }

    let cost = effective_cost(ctx, actor, action, &effectiveness);
    if cost.mana > actor.mana_available() {
        return Err(IntakeError::InsufficientMana {
            required: cost.mana,
            available: actor.mana_available(),
        });
    }
    if cost.stamina > actor.stamina_available() {
        return Err(IntakeError::InsufficientStamina {
            required: cost.stamina,
            available: actor.stamina_available(),
        });
    }

    if actor.prepared.is_some() {
        return Err(IntakeError::Busy);
    }

    Ok((action.clone(), cost))
}

/// Picks the target when the caller named none.
///
/// Pure support actions land on the actor; everything else on the side's
/// default target.
pub(super) fn default_target(
    ctx: &TickContext<'_>,
    actor: CombatantId,
    action: &CombatAction,
) -> Option<CombatantId> {
    if !action.deals_damage() && action.base_healing > 0 {
        return Some(actor);
    }
    let side = ctx.state.side_of(actor).unwrap_or(Side::Enemy);
    ctx.state.default_target_for(side)
}

/// Validates, charges and starts an action.
///
/// `announce_threat` adds a warning line when the new telegraph is critical
/// (used for AI-submitted actions).
pub(super) fn submit(
    ctx: &mut TickContext<'_>,
    actor_id: CombatantId,
    action_id: ActionId,
    target: Option<CombatantId>,
    announce_threat: bool,
) -> Result<IntakeOutcome, IntakeError> {
    if !ctx.state.is_live() {
        return Err(IntakeError::NotAccepting);
    }
    let actor = ctx
        .state
        .combatant(actor_id)
        .ok_or(IntakeError::UnknownActor(actor_id))?;
    let (action, cost) = validate(ctx, actor, action_id)?;
    let target = target
        .or_else(|| default_target(ctx, actor_id, &action))
        .ok_or(IntakeError::NoTarget)?;

    let now = ctx.now();
    let features = ctx.env.ranks.features(actor.rank);
    let effectiveness = ctx.effectiveness(actor, &action);
    let target_max_health = ctx
        .state
        .combatant(target)
        .map_or(0, |c| c.health.maximum());

    let Some(actor) = ctx.state.combatant_mut(actor_id) else {
        return Err(IntakeError::UnknownActor(actor_id));
    };
    if let Some(mana) = actor.mana.as_mut() {
        mana.spend(cost.mana);
    }
    if let Some(stamina) = actor.stamina.as_mut() {
        stamina.spend(cost.stamina);
    }
    if action.requirements.is_exclusive() {
        let ticks = effectiveness.scale_cooldown(action.cooldown_ticks);
        actor.exclusive.trigger(now, exclusive_cooldown(ticks, &features));
    }
    let actor_name = actor.name.clone();

    if action.is_instant() {
        tracing::debug!(actor = %actor_id, action = %action.id, "instant action");
        ctx.log(LogKind::Action, format!("{actor_name} uses {}", action.name));
        resolution::execute(ctx, actor_id, &action, target);
        return Ok(IntakeOutcome::Resolved);
    }

    let id = ctx.state.allocate_prepared_id();
    let ticks = action.preparation_ticks;
    let threat = action.threat_against(target_max_health);
    let telegraph = Telegraph::new(id, &action, threat, actor_id, target);
    let prepared = PreparedAction::new(id, action, actor_id, target);

    let line = format!(
        "{actor_name} begins {} ({ticks} ticks)",
        prepared.action.name
    );
    let warning = (announce_threat && telegraph.is_critical()).then(|| {
        format!(
            "Warning: {actor_name} prepares {} ({threat} threat)",
            prepared.action.name
        )
    });
    let landing = (telegraph.remaining_ticks == 1).then(|| telegraph.clone());

    if let Some(actor) = ctx.state.combatant_mut(actor_id) {
        actor.prepared = Some(prepared);
    }
    ctx.state.telegraphs.push(telegraph);

    tracing::debug!(actor = %actor_id, prepared = %id, ticks, "action prepared");
    ctx.log(LogKind::Telegraph, line);
    if let Some(warning) = warning {
        ctx.log(LogKind::Threat, warning);
    }
    // the countdown phase only forewarns after a decrement lands on one
    if let Some(telegraph) = landing {
        telegraphs::forewarn(ctx, &telegraph);
    }
    Ok(IntakeOutcome::Prepared { id, ticks })
}
