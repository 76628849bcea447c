use crate::combat::Rewards;
use crate::state::{CombatantId, LogEntry, Tick, Victor};

/// Subscription key of a [`CombatEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    Tick,
    Damage,
    Heal,
    CombatStart,
    CombatPause,
    CombatResume,
    CombatEnd,
    Log,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    pub tick: Tick,
    /// `None` for damage over time.
    pub source: Option<CombatantId>,
    pub target: CombatantId,
    /// Health removed.
    pub amount: u32,
    /// Absorbed by the shield pool.
    pub absorbed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEvent {
    pub tick: Tick,
    /// `None` for regeneration.
    pub source: Option<CombatantId>,
    pub target: CombatantId,
    /// Health actually restored.
    pub amount: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub tick: Tick,
    pub victor: Victor,
    pub rewards: Rewards,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    Tick { tick: Tick },
    Damage(DamageEvent),
    Heal(HealEvent),
    CombatStart { tick: Tick },
    CombatPause { tick: Tick },
    CombatResume { tick: Tick },
    CombatEnd(CombatOutcome),
    Log(LogEntry),
}

impl CombatEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Tick { .. } => EventKind::Tick,
            Self::Damage(_) => EventKind::Damage,
            Self::Heal(_) => EventKind::Heal,
            Self::CombatStart { .. } => EventKind::CombatStart,
            Self::CombatPause { .. } => EventKind::CombatPause,
            Self::CombatResume { .. } => EventKind::CombatResume,
            Self::CombatEnd(_) => EventKind::CombatEnd,
            Self::Log(_) => EventKind::Log,
        }
    }

    pub fn tick(&self) -> Tick {
        match self {
            Self::Tick { tick }
            | Self::CombatStart { tick }
            | Self::CombatPause { tick }
            | Self::CombatResume { tick } => *tick,
            Self::Damage(event) => event.tick,
            Self::Heal(event) => event.tick,
            Self::CombatEnd(outcome) => outcome.tick,
            Self::Log(entry) => entry.tick,
        }
    }
}
