//! Tick scheduler and action pipeline.
//!
//! The [`CombatEngine`] is the single writer of a [`CombatState`]. Each
//! [`tick`](CombatEngine::tick) runs the phases in a fixed order:
//!
//! 1. status effects
//! 2. telegraph countdown
//! 3. cooldown decrement
//! 4. prepared-action advance and execution
//! 5. AI intake for idle AI combatants
//! 6. victory check
//! 7. publish the tick event (after the damage, heal and log events the
//!    phases raised)
//!
//! Player input goes through [`player_use_action`](CombatEngine::player_use_action)
//! between ticks and shares the intake path with the AI.
mod context;
mod decisions;
mod intake;
mod resolution;
mod status;
mod telegraphs;
mod victory;

pub use intake::{IntakeError, IntakeOutcome};

use context::TickContext;

use crate::ai::{AiPolicy, WeightedPolicy};
use crate::combat::compute_rewards;
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::events::{
    CombatEvent, CombatOutcome, EventDispatcher, EventKind, SubscriberResult, SubscriptionId,
};
use crate::rank::{SkillEffectiveness, evaluate};
use crate::state::{ActionId, CombatState, CombatantId, LogKind, Tick, Victor};

/// Summary of one completed tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: Tick,
    /// Prepared actions that executed this tick.
    pub executed: usize,
    /// Events published, including the tick event itself.
    pub events: usize,
    /// Set when this tick ended the combat.
    pub victor: Option<Victor>,
}

pub struct CombatEngine {
    state: CombatState,
    config: CombatConfig,
    env: CombatEnv,
    policy: Box<dyn AiPolicy>,
    dispatcher: EventDispatcher,
    pending: Vec<CombatEvent>,
}

impl CombatEngine {
    /// Creates an engine with the standard environment and weighted AI.
    pub fn new(state: CombatState, config: CombatConfig) -> Self {
        let env = CombatEnv::standard(&config);
        Self {
            state,
            config,
            env,
            policy: Box::new(WeightedPolicy),
            dispatcher: EventDispatcher::new(),
            pending: Vec::new(),
        }
    }

    pub fn with_env(mut self, env: CombatEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_policy(mut self, policy: impl AiPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_boxed_policy(mut self, policy: Box<dyn AiPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn into_state(self) -> CombatState {
        self.state
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn env(&self) -> &CombatEnv {
        &self.env
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent, &CombatState) -> SubscriberResult + Send + 'static,
    {
        self.dispatcher.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Starts the combat. No-op if already running or ended.
    pub fn start(&mut self) -> bool {
        if self.state.running || self.state.is_ended() {
            return false;
        }
        self.state.running = true;
        tracing::info!(seed = self.state.seed, "combat started");
        let tick = self.state.tick;
        self.with_context(|ctx| {
            ctx.log(LogKind::System, "Combat started");
            ctx.emit(CombatEvent::CombatStart { tick });
        });
        self.flush();
        true
    }

    /// Freezes ticks and intake. Returns false if nothing changed.
    pub fn pause(&mut self) -> bool {
        if !self.state.running || self.state.paused || self.state.is_ended() {
            return false;
        }
        self.state.paused = true;
        tracing::info!(tick = %self.state.tick, "combat paused");
        let tick = self.state.tick;
        self.pending.push(CombatEvent::CombatPause { tick });
        self.flush();
        true
    }

    /// Continues from the same tick. Returns false if nothing changed.
    pub fn resume(&mut self) -> bool {
        if !self.state.paused || self.state.is_ended() {
            return false;
        }
        self.state.paused = false;
        tracing::info!(tick = %self.state.tick, "combat resumed");
        let tick = self.state.tick;
        self.pending.push(CombatEvent::CombatResume { tick });
        self.flush();
        true
    }

    /// Ends the combat with `victor`. Only the first call has any effect.
    pub fn stop(&mut self, victor: Victor) -> bool {
        if !self.finish(victor) {
            return false;
        }
        self.flush();
        true
    }

    fn finish(&mut self, victor: Victor) -> bool {
        if self.state.is_ended() {
            return false;
        }
        let rewards = compute_rewards(victor, &self.state.enemies, &self.config.rewards);
        self.state.victor = Some(victor);
        self.state.rewards = Some(rewards);
        self.state.running = false;
        self.state.paused = false;

        tracing::info!(%victor, tick = %self.state.tick, ?rewards, "combat ended");
        let tick = self.state.tick;
        let line = match victor {
            Victor::Player => format!(
                "Victory! Gained {} experience and {} gold",
                rewards.experience, rewards.gold
            ),
            Victor::Enemy => "Defeat...".to_string(),
        };
        self.with_context(|ctx| {
            ctx.log(LogKind::System, line);
            ctx.emit(CombatEvent::CombatEnd(CombatOutcome {
                tick,
                victor,
                rewards,
            }));
        });
        true
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances exactly one tick when running, unpaused and not ended.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.state.is_live() {
            return None;
        }
        self.state.tick = self.state.tick + 1;
        let tick = self.state.tick;
        let _span = tracing::debug_span!("tick", tick = tick.0).entered();

        let policy = self.policy.as_ref();
        let mut ctx = TickContext {
            state: &mut self.state,
            env: &self.env,
            config: &self.config,
            events: &mut self.pending,
        };

        status::run(&mut ctx);
        telegraphs::run(&mut ctx);
        for combatant in ctx.state.combatants_mut() {
            combatant.tick_cooldowns();
        }
        let executed = resolution::advance(&mut ctx);
        decisions::run(&mut ctx, policy);
        let victor = victory::check(ctx.state);

        if let Some(victor) = victor {
            self.finish(victor);
        }
        self.pending.push(CombatEvent::Tick { tick });
        let events = self.flush();

        Some(TickReport {
            tick,
            executed,
            events,
            victor,
        })
    }

    // ========================================================================
    // Intake
    // ========================================================================

    /// Player intake. Returns false on rejection and logs the reason.
    ///
    /// `target` defaults to the current target (or to the player for pure
    /// support actions).
    pub fn player_use_action(&mut self, action: ActionId, target: Option<CombatantId>) -> bool {
        match self.try_player_action(action, target) {
            Ok(_) => true,
            Err(err) => {
                let name = self.state.player.name.clone();
                self.with_context(|ctx| {
                    ctx.log(LogKind::Rejected, format!("{name} cannot act: {err}"));
                });
                self.flush();
                false
            }
        }
    }

    /// Player intake reporting why an action was rejected.
    ///
    /// A rejection leaves the state untouched and is not logged.
    pub fn try_player_action(
        &mut self,
        action: ActionId,
        target: Option<CombatantId>,
    ) -> Result<IntakeOutcome, IntakeError> {
        let player = self.state.player.id;
        let outcome = self.with_context(|ctx| intake::submit(ctx, player, action, target, false));
        self.flush();
        outcome
    }

    /// Changes the player-side default target. Only living enemies qualify.
    pub fn set_target(&mut self, target: CombatantId) -> bool {
        if !self.state.living_enemies().any(|e| e.id == target) {
            return false;
        }
        self.state.current_target = Some(target);
        true
    }

    /// Current effectiveness of an owned action, for presentation.
    pub fn effectiveness(
        &self,
        combatant: CombatantId,
        action: ActionId,
    ) -> Option<SkillEffectiveness> {
        let combatant = self.state.combatant(combatant)?;
        let action = combatant.action(action)?;
        Some(evaluate(
            &combatant.progression(),
            &action.requirements,
            self.env.ranks.as_ref(),
            self.config.awakening_level,
        ))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn with_context<R>(&mut self, f: impl FnOnce(&mut TickContext<'_>) -> R) -> R {
        let mut ctx = TickContext {
            state: &mut self.state,
            env: &self.env,
            config: &self.config,
            events: &mut self.pending,
        };
        f(&mut ctx)
    }

    /// Publishes buffered events in order. Returns how many were published.
    fn flush(&mut self) -> usize {
        let events = std::mem::take(&mut self.pending);
        for event in &events {
            self.dispatcher.emit(event, &self.state);
        }
        events.len()
    }
}

impl std::fmt::Debug for CombatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEngine")
            .field("tick", &self.state.tick)
            .field("running", &self.state.running)
            .field("paused", &self.state.paused)
            .field("victor", &self.state.victor)
            .finish_non_exhaustive()
    }
}
