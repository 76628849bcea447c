use crate::action::{ActionTags, CombatAction};

/// A boss phase entered when health drops to `health_percent` or below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhase {
    pub health_percent: u8,
    pub name: String,
    /// Actions added to (or replacing) the boss's set on entry.
    pub actions: Vec<CombatAction>,
}

/// Per-combatant AI tuning: tag preferences and boss phases.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorProfile {
    /// Weight added for each matching tag; actions start at weight 1.
    pub tag_weights: Vec<(ActionTags, u32)>,
    phases: Vec<BossPhase>,
    entered: usize,
}

impl BehaviorProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_weight(mut self, tags: ActionTags, weight: u32) -> Self {
        self.tag_weights.push((tags, weight));
        self
    }

    /// Adds a phase. Phases are kept ordered from highest threshold down.
    pub fn with_phase(mut self, phase: BossPhase) -> Self {
        self.phases.push(phase);
        self.phases
            .sort_by(|a, b| b.health_percent.cmp(&a.health_percent));
        self
    }

    pub fn phases(&self) -> &[BossPhase] {
        &self.phases
    }

    /// Number of phases already entered.
    pub fn phases_entered(&self) -> usize {
        self.entered
    }

    /// Selection weight of an action under this profile.
    pub fn weight_of(&self, action: &CombatAction) -> u32 {
        self.tag_weights
            .iter()
            .filter(|(tags, _)| action.tags.intersects(*tags))
            .fold(1u32, |acc, (_, weight)| acc.saturating_add(*weight))
    }

    /// Enters every phase whose threshold `health_percent` has crossed.
    ///
    /// Each phase is entered at most once, in threshold order, even when one
    /// hit skips past several thresholds.
    pub fn advance_phases(&mut self, health_percent: u8) -> Vec<BossPhase> {
        let mut entered = Vec::new();
        while let Some(phase) = self.phases.get(self.entered) {
            if health_percent > phase.health_percent {
                break;
            }
            entered.push(phase.clone());
            self.entered += 1;
        }
        entered
    }
}
