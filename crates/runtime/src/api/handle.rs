//! Cloneable façade for issuing commands to the runtime.
//!
//! [`CombatHandle`] hides channel plumbing and offers async helpers for
//! controlling the combat or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{ActionId, CombatState, CombatantId, IntakeOutcome, Victor};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a running combat
#[derive(Clone)]
pub struct CombatHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl CombatHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Starts ticking. Returns false if already running or ended.
    pub async fn start(&self) -> Result<bool> {
        self.request(|reply| Command::Start { reply }).await
    }

    pub async fn pause(&self) -> Result<bool> {
        self.request(|reply| Command::Pause { reply }).await
    }

    pub async fn resume(&self) -> Result<bool> {
        self.request(|reply| Command::Resume { reply }).await
    }

    /// Ends the combat. Only the first stop has any effect.
    pub async fn stop(&self, victor: Victor) -> Result<bool> {
        self.request(|reply| Command::Stop { victor, reply }).await
    }

    /// Submits a player action; a rejection is logged in the combat log and
    /// reported as `Ok(false)`.
    pub async fn player_use_action(
        &self,
        action: ActionId,
        target: Option<CombatantId>,
    ) -> Result<bool> {
        self.request(|reply| Command::UseAction {
            action,
            target,
            reply,
        })
        .await
    }

    /// Submits a player action, surfacing a rejection as
    /// [`RuntimeError::Rejected`].
    pub async fn try_player_action(
        &self,
        action: ActionId,
        target: Option<CombatantId>,
    ) -> Result<IntakeOutcome> {
        let outcome = self
            .request(|reply| Command::TryAction {
                action,
                target,
                reply,
            })
            .await?;
        Ok(outcome?)
    }

    pub async fn set_target(&self, target: CombatantId) -> Result<bool> {
        self.request(|reply| Command::SetTarget { target, reply })
            .await
    }

    /// Query the current combat state (read-only snapshot)
    pub async fn query_state(&self) -> Result<CombatState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use combat_runtime::Topic;
    ///
    /// let mut damage_rx = handle.subscribe(Topic::Damage);
    /// while let Ok(event) = damage_rx.recv().await {
    ///     // Handle damage events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Asks the scheduler to exit. Commands queued before this one still run.
    pub async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
