//! Runtime event payloads.

use std::sync::Arc;

use combat_core::{CombatEvent, CombatState, Tick};

/// Published after every completed tick.
///
/// Carries a snapshot of the state as it stood once the tick finished, so
/// subscribers never need to query the scheduler for it.
#[derive(Debug, Clone)]
pub struct TickEvent {
    pub tick: Tick,
    pub snapshot: Arc<CombatState>,
}

/// Event wrapper routed through the [`EventBus`](super::EventBus).
#[derive(Debug, Clone)]
pub enum Event {
    Tick(TickEvent),
    /// Any other engine event, forwarded unchanged.
    Combat(CombatEvent),
}

impl Event {
    pub fn topic(&self) -> super::Topic {
        match self {
            Event::Tick(_) => super::Topic::Tick,
            Event::Combat(event) => event.kind().into(),
        }
    }

    pub fn tick(&self) -> Tick {
        match self {
            Event::Tick(event) => event.tick,
            Event::Combat(event) => event.tick(),
        }
    }
}
