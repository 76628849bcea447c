//! Bounded combat log.
//!
//! Gameplay-facing record of what happened, rendered by the client. Distinct
//! from `tracing` diagnostics. Capacity is fixed per combat and the oldest
//! entries are dropped first, so a long fight cannot grow memory unboundedly.

use std::collections::VecDeque;

use super::Tick;

/// A single entry in the combat log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub tick: Tick,
    pub kind: LogKind,
    pub message: String,
}

/// Types of combat log entries for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum LogKind {
    /// Action started or resolved.
    Action,
    Damage,
    Healing,
    /// Status applied, ticked, or expired.
    Status,
    /// Telegraph created or forewarning.
    Telegraph,
    /// Critical threat announcement.
    Threat,
    /// Interrupt, block, dodge, or tag counter.
    Counter,
    /// Status application resisted.
    Resist,
    /// Intake rejected.
    Rejected,
    /// Target vanished before execution.
    TargetLost,
    Defeat,
    /// Lifecycle and boss phase changes.
    System,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl CombatLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest one when full.
    ///
    /// Returns a copy of the stored entry for event publication.
    pub fn push(&mut self, tick: Tick, kind: LogKind, message: impl Into<String>) -> LogEntry {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        let entry = LogEntry {
            tick,
            kind,
            message: message.into(),
        };
        self.entries.push_back(entry.clone());
        entry
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn filter_by_kind(&self, kind: LogKind) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// True if any retained entry contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
