//! Externally visible forecasts of pending multi-tick actions.

use super::{CombatantId, PreparedId};
use crate::action::{ActionTags, CombatAction};

/// Severity of a telegraphed action.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    High,
    Lethal,
    Catastrophic,
}

impl ThreatLevel {
    /// Classifies an attack by its base damage relative to the target's
    /// maximum health.
    pub fn classify(base_damage: u32, target_max_health: u32) -> Self {
        if target_max_health == 0 {
            return Self::Low;
        }
        let percent = u64::from(base_damage) * 100 / u64::from(target_max_health);
        match percent {
            100.. => Self::Catastrophic,
            50..=99 => Self::Lethal,
            25..=49 => Self::High,
            _ => Self::Low,
        }
    }

    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Lethal | Self::Catastrophic)
    }
}

/// Presentation category of a telegraph, derived from the action's tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum TelegraphKind {
    Ritual,
    Channel,
    Area,
    Projectile,
    Spell,
    Strike,
    Defense,
    Support,
}

impl TelegraphKind {
    pub fn from_action(action: &CombatAction) -> Self {
        let tags = action.tags;
        if tags.contains(ActionTags::RITUAL) {
            Self::Ritual
        } else if tags.contains(ActionTags::CHANNEL) {
            Self::Channel
        } else if tags.contains(ActionTags::AREA) {
            Self::Area
        } else if tags.contains(ActionTags::PROJECTILE) {
            Self::Projectile
        } else if tags.contains(ActionTags::MAGIC) {
            Self::Spell
        } else if tags.intersects(ActionTags::BLOCK | ActionTags::DODGE | ActionTags::SHIELD) {
            Self::Defense
        } else if action.base_damage == 0 {
            Self::Support
        } else {
            Self::Strike
        }
    }
}

/// Forecast of a prepared action, visible ticks in advance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telegraph {
    /// Same id as the prepared action this telegraph announces.
    pub id: PreparedId,
    pub kind: TelegraphKind,
    pub threat: ThreatLevel,
    pub action_name: String,
    pub total_ticks: u32,
    pub remaining_ticks: u32,
    pub source: CombatantId,
    pub target: CombatantId,
}

impl Telegraph {
    pub fn new(
        id: PreparedId,
        action: &CombatAction,
        threat: ThreatLevel,
        source: CombatantId,
        target: CombatantId,
    ) -> Self {
        Self {
            id,
            kind: TelegraphKind::from_action(action),
            threat,
            action_name: action.name.clone(),
            total_ticks: action.preparation_ticks,
            remaining_ticks: action.preparation_ticks,
            source,
            target,
        }
    }

    /// Critical when the threat is lethal/catastrophic or one tick remains.
    pub fn is_critical(&self) -> bool {
        self.threat.is_severe() || self.remaining_ticks == 1
    }

    /// Advances the countdown by one tick and returns the ticks left.
    pub fn advance(&mut self) -> u32 {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActionId;

    #[test]
    fn threat_classification_by_damage_share() {
        assert_eq!(ThreatLevel::classify(10, 100), ThreatLevel::Low);
        assert_eq!(ThreatLevel::classify(25, 100), ThreatLevel::High);
        assert_eq!(ThreatLevel::classify(60, 100), ThreatLevel::Lethal);
        assert_eq!(ThreatLevel::classify(150, 100), ThreatLevel::Catastrophic);
        assert_eq!(ThreatLevel::classify(150, 0), ThreatLevel::Low);
    }

    #[test]
    fn critical_when_severe_or_last_tick() {
        let action = CombatAction::new(ActionId(1), "Cleave")
            .with_damage(10)
            .with_preparation(3);
        let mut telegraph = Telegraph::new(
            PreparedId(1),
            &action,
            ThreatLevel::Low,
            CombatantId(1),
            CombatantId::PLAYER,
        );

        assert!(!telegraph.is_critical());
        telegraph.advance();
        assert_eq!(telegraph.advance(), 1);
        assert!(telegraph.is_critical());

        let severe = Telegraph::new(
            PreparedId(2),
            &action,
            ThreatLevel::Catastrophic,
            CombatantId(1),
            CombatantId::PLAYER,
        );
        assert!(severe.is_critical());
    }

    #[test]
    fn kind_prefers_ritual_and_channel() {
        let ritual = CombatAction::new(ActionId(1), "Summon")
            .with_tags(ActionTags::RITUAL | ActionTags::MAGIC);
        assert_eq!(TelegraphKind::from_action(&ritual), TelegraphKind::Ritual);

        let bolt = CombatAction::new(ActionId(2), "Bolt")
            .with_damage(5)
            .with_tags(ActionTags::MAGIC | ActionTags::PROJECTILE);
        assert_eq!(TelegraphKind::from_action(&bolt), TelegraphKind::Projectile);
    }
}
