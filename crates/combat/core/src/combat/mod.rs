//! Combat resolution rules: mitigation, level interaction, tag counters and
//! rewards. Everything here is pure; the engine phases call into it.
pub mod damage;
mod interaction;
mod level;
mod reward;

pub use damage::{DamageApplied, MitigatedDamage};
pub use interaction::{CounterOutcome, Interaction, InteractionTable};
pub use level::{LevelInteraction, LinearLevelCurve};
pub use reward::{Rewards, compute_rewards};
