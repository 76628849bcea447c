//! Enemy and ally decision making.
//!
//! The engine collects the candidate actions of an idle AI combatant (owned,
//! off cooldown, affordable, available) and hands them to an [`AiPolicy`].
//! Boss phase transitions are evaluated before candidates are collected.
mod phases;
mod policy;

pub use phases::{BehaviorProfile, BossPhase};
pub use policy::{AiPolicy, RandomPolicy, WeightedPolicy};
