//! High-level runtime orchestrator.
//!
//! The runtime owns the scheduler worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive one combat.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use combat_core::{
    AiPolicy, CombatConfig, CombatEngine, CombatEnv, CombatEvent, CombatOutcome, CombatState,
};

use crate::api::{ActionProvider, CombatHandle, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SchedulerWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Ends the combat as an enemy victory once this tick completes.
    pub max_ticks: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            max_ticks: None,
        }
    }
}

/// Main runtime that orchestrates one combat
///
/// Design: Runtime owns the scheduler and the player provider.
/// [`CombatHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: CombatHandle,
    player_provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> CombatHandle {
        self.handle.clone()
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Starts the combat (if needed) and feeds the player provider one
    /// decision per tick until the combat ends.
    ///
    /// Without a provider the player simply never acts.
    pub async fn run(&mut self) -> Result<CombatOutcome> {
        let mut ticks = self.handle.subscribe(Topic::Tick);
        let mut ends = self.handle.subscribe(Topic::CombatEnd);

        let state = self.handle.query_state().await?;
        if let Some(outcome) = outcome_of(&state) {
            return Ok(outcome);
        }
        if !state.running {
            self.handle.start().await?;
        }

        loop {
            tokio::select! {
                biased;
                event = ends.recv() => match event {
                    Ok(Event::Combat(CombatEvent::CombatEnd(outcome))) => return Ok(outcome),
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(RuntimeError::EventChannelClosed { topic: Topic::CombatEnd });
                    }
                },
                event = ticks.recv() => match event {
                    Ok(Event::Tick(tick)) => {
                        if tick.snapshot.is_ended() {
                            continue;
                        }
                        if let Some(provider) = &self.player_provider
                            && let Some((action, target)) =
                                provider.provide_action(&tick.snapshot).await?
                        {
                            self.handle.player_use_action(action, target).await?;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "player provider fell behind the tick clock");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(RuntimeError::EventChannelClosed { topic: Topic::Tick });
                    }
                },
            }
        }
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        // the worker may already be gone if every handle was dropped
        let _ = self.handle.shutdown().await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

fn outcome_of(state: &CombatState) -> Option<CombatOutcome> {
    Some(CombatOutcome {
        tick: state.tick,
        victor: state.victor?,
        rewards: state.rewards.unwrap_or_default(),
    })
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    combat_config: Option<CombatConfig>,
    state: Option<CombatState>,
    env: Option<CombatEnv>,
    policy: Option<Box<dyn AiPolicy>>,
    player_provider: Option<Box<dyn ActionProvider>>,
    seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combat_config: None,
            state: None,
            env: None,
            policy: None,
            player_provider: None,
            seed: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the engine configuration. Its tick duration replaces the
    /// one recorded in the initial state.
    pub fn combat_config(mut self, config: CombatConfig) -> Self {
        self.combat_config = Some(config);
        self
    }

    /// Provide the initial combat state (required)
    pub fn initial_state(mut self, state: CombatState) -> Self {
        self.state = Some(state);
        self
    }

    /// Override the oracles (defaults to the standard environment)
    pub fn env(mut self, env: CombatEnv) -> Self {
        self.env = Some(env);
        self
    }

    pub fn policy(mut self, policy: impl AiPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Fix the combat seed. Without it, a zero seed in the state is replaced
    /// by a random one.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the runtime and spawn the scheduler
    pub async fn build(self) -> Result<Runtime> {
        let mut state = self.state.ok_or(RuntimeError::MissingState)?;
        let mut combat_config = match self.combat_config {
            Some(config) => {
                state.tick_duration_ms = config.tick_duration_ms;
                config
            }
            None => CombatConfig::default().with_tick_duration_ms(state.tick_duration_ms),
        };

        state.seed = match self.seed {
            Some(seed) => seed,
            None if state.seed == 0 => rand::random(),
            None => state.seed,
        };
        combat_config.seed = state.seed;
        tracing::info!(seed = state.seed, "combat runtime seeded");

        let env = self
            .env
            .unwrap_or_else(|| CombatEnv::standard(&combat_config));
        let mut engine = CombatEngine::new(state, combat_config).with_env(env);
        if let Some(policy) = self.policy {
            engine = engine.with_boxed_policy(policy);
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = CombatHandle::new(command_tx, event_bus.clone());

        let worker = SchedulerWorker::new(engine, command_rx, event_bus, self.config.max_ticks);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            worker_handle,
        })
    }
}
