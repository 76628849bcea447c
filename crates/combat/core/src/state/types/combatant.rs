//! Combatant state.
//!
//! One fighting entity: the player, an enemy, or a squad ally.
//!
//! # Invariants
//!
//! - `health` is clamped to `[0, max]` by [`Meter`]
//! - health 0 means defeated: never selected to act or targeted again
//! - `cooldowns` has exactly one slot per entry of `actions`
//! - at most one prepared action is in flight

use super::{ActionId, CombatantId, Cooldowns, Meter, PreparedAction, StatusEffects};
use crate::action::CombatAction;
use crate::ai::BehaviorProfile;
use crate::combat::damage::{DamageApplied, mitigate};
use crate::env::ActionOracle;
use crate::rank::{ExclusiveTimer, HunterRank, Loadout, Progression, Role, SpecializationId};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub is_player: bool,
    pub level: u32,
    pub health: Meter,
    pub mana: Option<Meter>,
    pub stamina: Option<Meter>,

    // === Progression (inputs to the effectiveness model) ===
    pub role: Role,
    pub rank: HunterRank,
    pub specialization: Option<SpecializationId>,
    pub affinity_bonus: u8,

    // === Defensive state ===
    pub status: StatusEffects,
    /// Absorption pool depleted before health.
    pub shield: u32,
    /// Flat fraction of post-shield damage ignored, in `[0, 1]`.
    pub damage_reduction: f32,

    // === Action state ===
    actions: Vec<CombatAction>,
    cooldowns: Cooldowns,
    pub prepared: Option<PreparedAction>,
    pub exclusive: ExclusiveTimer,

    // === Control ===
    pub ai_controlled: bool,
    pub behavior: Option<BehaviorProfile>,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, level: u32, max_health: u32) -> Self {
        Self {
            id,
            name: name.into(),
            is_player: id.is_player(),
            level,
            health: Meter::full(max_health),
            mana: None,
            stamina: None,
            role: Role::Fighter,
            rank: HunterRank::E,
            specialization: None,
            affinity_bonus: 0,
            status: StatusEffects::empty(),
            shield: 0,
            damage_reduction: 0.0,
            actions: Vec::new(),
            cooldowns: Cooldowns::default(),
            prepared: None,
            exclusive: ExclusiveTimer::default(),
            ai_controlled: !id.is_player(),
            behavior: None,
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn with_mana(mut self, maximum: u32) -> Self {
        self.mana = Some(Meter::full(maximum));
        self
    }

    pub fn with_stamina(mut self, maximum: u32) -> Self {
        self.stamina = Some(Meter::full(maximum));
        self
    }

    pub fn with_role(mut self, role: Role, rank: HunterRank) -> Self {
        self.role = role;
        self.rank = rank;
        self
    }

    pub fn with_specialization(mut self, specialization: SpecializationId) -> Self {
        self.specialization = Some(specialization);
        self
    }

    pub fn with_affinity_bonus(mut self, bonus: u8) -> Self {
        self.affinity_bonus = bonus;
        self
    }

    pub fn with_shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self
    }

    pub fn with_damage_reduction(mut self, fraction: f32) -> Self {
        self.damage_reduction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_action(mut self, action: CombatAction) -> Self {
        self.add_action(action);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = CombatAction>) -> Self {
        for action in actions {
            self.add_action(action);
        }
        self
    }

    /// Resolves every equipped skill of `loadout` through the catalog.
    ///
    /// Ids missing from the catalog are skipped with a warning.
    pub fn with_loadout(mut self, loadout: &Loadout, catalog: &dyn ActionOracle) -> Self {
        for id in loadout.iter() {
            match catalog.action(id) {
                Some(action) => self.add_action(action),
                None => tracing::warn!("{} equips unknown {}", self.name, id),
            }
        }
        self
    }

    pub fn with_ai(mut self, controlled: bool) -> Self {
        self.ai_controlled = controlled;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorProfile) -> Self {
        self.behavior = Some(behavior);
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    /// Alive, not preparing, not incapacitated.
    pub fn is_idle(&self) -> bool {
        self.is_alive() && self.prepared.is_none() && !self.status.is_incapacitated()
    }

    pub fn progression(&self) -> Progression {
        Progression {
            role: self.role,
            rank: self.rank,
            level: self.level,
            specialization: self.specialization,
            affinity_bonus: self.affinity_bonus,
        }
    }

    pub fn actions(&self) -> &[CombatAction] {
        &self.actions
    }

    pub fn action(&self, id: ActionId) -> Option<&CombatAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    fn slot_of(&self, id: ActionId) -> Option<usize> {
        self.actions.iter().position(|a| a.id == id)
    }

    /// Remaining cooldown ticks, or `None` if the action is not owned.
    pub fn cooldown(&self, id: ActionId) -> Option<u32> {
        self.slot_of(id).map(|slot| self.cooldowns.remaining(slot))
    }

    pub fn mana_available(&self) -> u32 {
        self.mana.map_or(0, |m| m.current())
    }

    pub fn stamina_available(&self) -> u32 {
        self.stamina.map_or(0, |m| m.current())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Adds an action, replacing any existing action with the same id.
    pub fn add_action(&mut self, action: CombatAction) {
        match self.slot_of(action.id) {
            Some(slot) => self.actions[slot] = action,
            None => {
                self.actions.push(action);
                self.cooldowns.push_slot();
            }
        }
    }

    pub fn set_cooldown(&mut self, id: ActionId, ticks: u32) {
        if let Some(slot) = self.slot_of(id) {
            self.cooldowns.set(slot, ticks);
        }
    }

    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.tick_down();
    }

    /// Applies damage through shield, then reduction, then health.
    pub fn take_damage(&mut self, amount: u32) -> DamageApplied {
        let mitigated = mitigate(self.shield, self.damage_reduction, amount);
        self.shield -= mitigated.absorbed;
        let dealt = self.health.deplete(mitigated.to_health);
        DamageApplied {
            absorbed: mitigated.absorbed,
            reduced: mitigated.reduced,
            dealt,
        }
    }

    /// Heals toward max, returning the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.health.restore(amount)
    }
}
