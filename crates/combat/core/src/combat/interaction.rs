//! Tag interaction table.
//!
//! Rules are keyed by a pair of single tags. A lookup between an incoming
//! action and the action the target has in flight checks every tag pair in
//! both directions and keeps the lowest modifier, so a rule only needs to be
//! registered once.

use std::collections::HashMap;

use crate::action::ActionTags;

/// Damage modifier applied when two tags meet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interaction {
    /// `0.0` counters the incoming action entirely.
    pub modifier: f32,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CounterOutcome {
    Unaffected,
    Modified { modifier: f32, message: String },
    Countered { message: String },
}

#[derive(Clone, Debug, Default)]
pub struct InteractionTable {
    rules: HashMap<(ActionTags, ActionTags), Interaction>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert(
            ActionTags::PROJECTILE,
            ActionTags::SHIELD,
            0.0,
            "the shield deflects the projectile",
        );
        table.insert(
            ActionTags::MAGIC,
            ActionTags::SHIELD,
            0.5,
            "the shield dampens the spell",
        );
        table.insert(
            ActionTags::PIERCE,
            ActionTags::SHIELD,
            0.75,
            "the shield turns the point aside",
        );
        table.insert(
            ActionTags::STRIKE,
            ActionTags::CHANNEL,
            1.5,
            "the strike catches the channeler exposed",
        );
        table.insert(
            ActionTags::AREA,
            ActionTags::RITUAL,
            1.25,
            "the blast disrupts the ritual circle",
        );
        table
    }

    /// Registers a rule for a pair of single tags.
    pub fn insert(
        &mut self,
        a: ActionTags,
        b: ActionTags,
        modifier: f32,
        message: impl Into<String>,
    ) {
        self.rules.insert(
            (a, b),
            Interaction {
                modifier: modifier.max(0.0),
                message: message.into(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Lowest-modifier rule between any tag of `incoming` and any tag of
    /// `in_flight`, looked up in both directions.
    pub fn lookup(&self, incoming: ActionTags, in_flight: ActionTags) -> Option<&Interaction> {
        let mut best: Option<&Interaction> = None;
        for a in incoming.iter() {
            for b in in_flight.iter() {
                for key in [(a, b), (b, a)] {
                    if let Some(rule) = self.rules.get(&key)
                        && best.is_none_or(|current| rule.modifier < current.modifier)
                    {
                        best = Some(rule);
                    }
                }
            }
        }
        best
    }

    pub fn resolve(&self, incoming: ActionTags, in_flight: ActionTags) -> CounterOutcome {
        match self.lookup(incoming, in_flight) {
            None => CounterOutcome::Unaffected,
            Some(rule) if rule.modifier <= 0.0 => CounterOutcome::Countered {
                message: rule.message.clone(),
            },
            Some(rule) => CounterOutcome::Modified {
                modifier: rule.modifier,
                message: rule.message.clone(),
            },
        }
    }
}
