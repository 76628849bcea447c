//! Scheduler worker that owns the authoritative [`CombatEngine`].
//!
//! Receives commands from [`CombatHandle`](crate::api::CombatHandle), drives
//! `tick()` on a wall-clock interval while the combat is live, and forwards
//! every engine event to the [`EventBus`].

use std::sync::Arc;
use std::time::Duration;

use strum::IntoEnumIterator;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use combat_core::{
    ActionId, CombatEngine, CombatEvent, CombatState, CombatantId, EventKind, IntakeError,
    IntakeOutcome, Victor,
};

use crate::events::{Event, EventBus, TickEvent, Topic};

/// Commands that can be sent to the scheduler worker
pub enum Command {
    Start {
        reply: oneshot::Sender<bool>,
    },
    Pause {
        reply: oneshot::Sender<bool>,
    },
    Resume {
        reply: oneshot::Sender<bool>,
    },
    Stop {
        victor: Victor,
        reply: oneshot::Sender<bool>,
    },
    /// Player intake; rejections are written to the combat log.
    UseAction {
        action: ActionId,
        target: Option<CombatantId>,
        reply: oneshot::Sender<bool>,
    },
    /// Player intake reporting the rejection reason instead of logging it.
    TryAction {
        action: ActionId,
        target: Option<CombatantId>,
        reply: oneshot::Sender<Result<IntakeOutcome, IntakeError>>,
    },
    SetTarget {
        target: CombatantId,
        reply: oneshot::Sender<bool>,
    },
    /// Query the current combat state (read-only snapshot).
    QueryState {
        reply: oneshot::Sender<CombatState>,
    },
    Shutdown,
}

/// Background task that runs one combat.
pub struct SchedulerWorker {
    engine: CombatEngine,
    command_rx: mpsc::Receiver<Command>,
    period: Duration,
    max_ticks: Option<u64>,
}

impl SchedulerWorker {
    /// Creates a worker and wires the engine's dispatcher into `event_bus`.
    pub fn new(
        mut engine: CombatEngine,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        max_ticks: Option<u64>,
    ) -> Self {
        let period = Duration::from_millis(engine.state().tick_duration_ms.max(1));

        for kind in EventKind::iter() {
            let bus = event_bus.clone();
            engine.subscribe(kind, move |event, state| {
                if let Some(event) = forward(&bus, event, state) {
                    bus.publish(event);
                }
                Ok(())
            });
        }

        info!(
            period_ms = period.as_millis() as u64,
            enemies = engine.state().enemies.len(),
            "scheduler initialized"
        );

        Self {
            engine,
            command_rx,
            period,
            max_ticks,
        }
    }

    /// Main worker loop.
    ///
    /// Ticks only fire while the combat is running and unpaused. Starting or
    /// resuming re-arms the clock so the next tick is one full period away.
    pub async fn run(mut self) {
        let mut clock = time::interval_at(Instant::now() + self.period, self.period);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    match self.handle_command(cmd) {
                        Flow::Continue => {}
                        Flow::Rearm => clock.reset(),
                        Flow::Exit => break,
                    }
                }
                _ = clock.tick(), if self.engine.state().is_live() => {
                    self.advance();
                }
            }
        }
        debug!(tick = %self.engine.state().tick, "scheduler stopped");
    }

    fn advance(&mut self) {
        let Some(report) = self.engine.tick() else {
            return;
        };
        if let Some(limit) = self.max_ticks
            && report.victor.is_none()
            && report.tick.0 >= limit
        {
            info!(limit, "tick limit reached, ending combat");
            self.engine.stop(Victor::Enemy);
        }
    }

    fn handle_command(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::Start { reply } => {
                let started = self.engine.start();
                send(reply, started, "Start");
                if started { Flow::Rearm } else { Flow::Continue }
            }
            Command::Pause { reply } => {
                send(reply, self.engine.pause(), "Pause");
                Flow::Continue
            }
            Command::Resume { reply } => {
                let resumed = self.engine.resume();
                send(reply, resumed, "Resume");
                if resumed { Flow::Rearm } else { Flow::Continue }
            }
            Command::Stop { victor, reply } => {
                send(reply, self.engine.stop(victor), "Stop");
                Flow::Continue
            }
            Command::UseAction {
                action,
                target,
                reply,
            } => {
                send(reply, self.engine.player_use_action(action, target), "UseAction");
                Flow::Continue
            }
            Command::TryAction {
                action,
                target,
                reply,
            } => {
                send(reply, self.engine.try_player_action(action, target), "TryAction");
                Flow::Continue
            }
            Command::SetTarget { target, reply } => {
                send(reply, self.engine.set_target(target), "SetTarget");
                Flow::Continue
            }
            Command::QueryState { reply } => {
                send(reply, self.engine.state().clone(), "QueryState");
                Flow::Continue
            }
            Command::Shutdown => Flow::Exit,
        }
    }
}

enum Flow {
    Continue,
    Rearm,
    Exit,
}

fn send<T>(reply: oneshot::Sender<T>, value: T, command: &str) {
    if reply.send(value).is_err() {
        debug!("{command} reply channel closed (caller dropped)");
    }
}

/// Converts an engine event for the bus. Tick events carry a snapshot, so
/// they are skipped entirely while nobody listens on the tick topic.
fn forward(bus: &EventBus, event: &CombatEvent, state: &CombatState) -> Option<Event> {
    match event {
        CombatEvent::Tick { tick } => bus.has_subscribers(Topic::Tick).then(|| {
            Event::Tick(TickEvent {
                tick: *tick,
                snapshot: Arc::new(state.clone()),
            })
        }),
        other => Some(Event::Combat(other.clone())),
    }
}
