//! Async runtime for the tick-based combat engine.
//!
//! This crate wires a [`combat_core::CombatEngine`] to a wall-clock tick
//! scheduler, a command channel, and a topic-based event bus. Consumers embed
//! [`Runtime`] to run a combat, subscribe to events, and submit player
//! actions through [`CombatHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps the scheduler task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, CombatHandle, IdleActionProvider, PlayerIntent, Result, RotationProvider,
    RuntimeError,
};
pub use events::{Event, EventBus, TickEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
