//! Value types stored inside [`CombatState`](super::CombatState).

pub mod combatant;
pub mod common;
pub mod cooldowns;
pub mod prepared;
pub mod status;
pub mod telegraph;

pub use combatant::Combatant;
pub use common::{ActionId, CombatantId, Meter, PreparedId, Tick};
pub use cooldowns::Cooldowns;
pub use prepared::PreparedAction;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use telegraph::{Telegraph, TelegraphKind, ThreatLevel};
