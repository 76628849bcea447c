//! In-process event dispatcher.
//!
//! Subscribers are called synchronously, in subscription order. A subscriber
//! that returns an error or panics is logged and skipped; the remaining
//! subscribers still receive the event and the tick loop keeps running.

use std::panic::{AssertUnwindSafe, catch_unwind};

use super::{CombatEvent, EventKind};
use crate::state::CombatState;

/// Failure reported by a subscriber.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SubscriberError(pub String);

impl From<&str> for SubscriberError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for SubscriberError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

pub type SubscriberResult = Result<(), SubscriberError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&CombatEvent, &CombatState) -> SubscriberResult + Send>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
pub struct EventDispatcher {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent, &CombatState) -> SubscriberResult + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions
            .iter()
            .filter(|sub| sub.kind == kind)
            .count()
    }

    /// Delivers `event` to every subscriber of its kind.
    ///
    /// Returns the number of subscribers that handled it successfully.
    pub fn emit(&mut self, event: &CombatEvent, state: &CombatState) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for sub in self.subscriptions.iter_mut().filter(|sub| sub.kind == kind) {
            match catch_unwind(AssertUnwindSafe(|| (sub.handler)(event, state))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => {
                    tracing::warn!(subscription = ?sub.id, %kind, "subscriber failed: {err}");
                }
                Err(_) => {
                    tracing::warn!(subscription = ?sub.id, %kind, "subscriber panicked");
                }
            }
        }
        delivered
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::config::CombatConfig;
    use crate::state::{Combatant, CombatantId, Tick};

    fn state() -> CombatState {
        CombatState::new(
            Combatant::new(CombatantId::PLAYER, "Hunter", 1, 10),
            vec![Combatant::new(CombatantId(1), "Slime", 1, 10)],
            &CombatConfig::default(),
        )
    }

    #[test]
    fn failing_subscribers_are_isolated() {
        let mut dispatcher = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        dispatcher.subscribe(EventKind::Tick, |_, _| Err("boom".into()));
        dispatcher.subscribe(EventKind::Tick, |_, _| panic!("subscriber bug"));
        let sink = Arc::clone(&seen);
        dispatcher.subscribe(EventKind::Tick, move |event, _| {
            sink.lock().unwrap().push(event.tick());
            Ok(())
        });

        let delivered = dispatcher.emit(&CombatEvent::Tick { tick: Tick(3) }, &state());
        assert_eq!(delivered, 1);
        assert_eq!(*seen.lock().unwrap(), vec![Tick(3)]);
    }

    #[test]
    fn delivers_by_kind_in_subscription_order() {
        let mut dispatcher = EventDispatcher::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second"] {
            let order = Arc::clone(&order);
            dispatcher.subscribe(EventKind::CombatStart, move |_, _| {
                order.lock().unwrap().push(label);
                Ok(())
            });
        }
        dispatcher.subscribe(EventKind::Tick, |_, _| panic!("wrong kind"));

        dispatcher.emit(&CombatEvent::CombatStart { tick: Tick(0) }, &state());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut dispatcher = EventDispatcher::new();
        let id = dispatcher.subscribe(EventKind::Log, |_, _| Ok(()));
        assert_eq!(dispatcher.subscriber_count(EventKind::Log), 1);
        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        assert_eq!(dispatcher.subscriber_count(EventKind::Log), 0);
    }
}
