//! Damage mitigation.
//!
//! Incoming direct damage is absorbed by the shield pool first, then reduced
//! by the flat damage-reduction fraction, then removed from health.

/// Breakdown of an incoming hit before it touches health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MitigatedDamage {
    pub absorbed: u32,
    pub reduced: u32,
    pub to_health: u32,
}

/// Breakdown of a hit after it was applied to a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageApplied {
    pub absorbed: u32,
    pub reduced: u32,
    /// Health actually removed (never more than the health that was left).
    pub dealt: u32,
}

pub fn mitigate(shield: u32, reduction: f32, amount: u32) -> MitigatedDamage {
    let absorbed = amount.min(shield);
    let remaining = amount - absorbed;
    let reduced = ((remaining as f32) * reduction.clamp(0.0, 1.0)).round() as u32;
    let reduced = reduced.min(remaining);
    MitigatedDamage {
        absorbed,
        reduced,
        to_health: remaining - reduced,
    }
}

/// Outgoing damage of an action before mitigation.
///
/// `base × effect × level × weaken`, rounded to nearest.
pub fn outgoing(base: u32, effect: f32, level_modifier: f32, weaken_factor: f32) -> u32 {
    let value = (base as f32 * effect * level_modifier * weaken_factor).round();
    if value <= 0.0 { 0 } else { value as u32 }
}
