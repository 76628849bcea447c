//! Typed combat events.
//!
//! Every observable change of a combat is published as a [`CombatEvent`]
//! through the engine's [`EventDispatcher`]. Subscribers register per
//! [`EventKind`] and receive the event together with a read-only view of the
//! state after the change.
mod dispatcher;
mod types;

pub use dispatcher::{EventDispatcher, SubscriberError, SubscriberResult, SubscriptionId};
pub use types::{CombatEvent, CombatOutcome, DamageEvent, EventKind, HealEvent};
