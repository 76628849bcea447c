//! Authoritative combat state representation.
//!
//! [`CombatState`] is the aggregate root for one combat. It is owned
//! exclusively by a [`CombatEngine`](crate::engine::CombatEngine) for the
//! duration of the fight; renderers receive it read-only between ticks.
pub mod log;
pub mod types;

pub use log::{CombatLog, LogEntry, LogKind};
pub use types::{
    ActionId, Combatant, CombatantId, Cooldowns, Meter, PreparedAction, PreparedId, StatusEffect,
    StatusEffectKind, StatusEffects, Telegraph, TelegraphKind, ThreatLevel, Tick,
};

use crate::combat::Rewards;
use crate::config::CombatConfig;

/// Which side of the fight a combatant is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The player and squad allies.
    Player,
    Enemy,
}

/// Terminal winner of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Victor {
    Player,
    Enemy,
}

/// Canonical snapshot of one combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub tick: Tick,
    pub running: bool,
    pub paused: bool,
    pub tick_duration_ms: u64,

    pub player: Combatant,
    pub enemies: Vec<Combatant>,
    pub squad: Vec<Combatant>,
    /// Player-side default target.
    pub current_target: Option<CombatantId>,

    pub telegraphs: Vec<Telegraph>,
    pub log: CombatLog,

    pub victor: Option<Victor>,
    pub rewards: Option<Rewards>,

    /// RNG seed for every roll in this combat. Never modified.
    pub seed: u64,
    /// Monotonic roll counter mixed into every seed.
    roll_nonce: u64,
    next_prepared_id: u64,
}

impl CombatState {
    pub fn new(player: Combatant, enemies: Vec<Combatant>, config: &CombatConfig) -> Self {
        let current_target = enemies.first().map(|e| e.id);
        Self {
            tick: Tick::ZERO,
            running: false,
            paused: false,
            tick_duration_ms: config.tick_duration_ms,
            player,
            enemies,
            squad: Vec::new(),
            current_target,
            telegraphs: Vec::new(),
            log: CombatLog::with_capacity(config.log_capacity),
            victor: None,
            rewards: None,
            seed: config.seed,
            roll_nonce: 0,
            next_prepared_id: 1,
        }
    }

    pub fn with_squad(mut self, squad: Vec<Combatant>) -> Self {
        self.squad = squad;
        self
    }

    pub fn is_ended(&self) -> bool {
        self.victor.is_some()
    }

    /// Accepting intake: started, not paused, not ended.
    pub fn is_live(&self) -> bool {
        self.running && !self.paused && !self.is_ended()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// All combatants in deterministic order: player, enemies, squad.
    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        std::iter::once(&self.player)
            .chain(self.enemies.iter())
            .chain(self.squad.iter())
    }

    pub fn combatants_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        std::iter::once(&mut self.player)
            .chain(self.enemies.iter_mut())
            .chain(self.squad.iter_mut())
    }

    /// Ids in processing order (player, enemies, squad).
    pub fn combatant_ids(&self) -> Vec<CombatantId> {
        self.combatants().map(|c| c.id).collect()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants_mut().find(|c| c.id == id)
    }

    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        if self.player.id == id || self.squad.iter().any(|c| c.id == id) {
            Some(Side::Player)
        } else if self.enemies.iter().any(|c| c.id == id) {
            Some(Side::Enemy)
        } else {
            None
        }
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Combatant> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    /// Default target for attackers standing on `attacker_side`.
    ///
    /// Enemies go for the player, then the first living squad member. The
    /// player side uses the current target while it lives, then the first
    /// living enemy.
    pub fn default_target_for(&self, attacker_side: Side) -> Option<CombatantId> {
        match attacker_side {
            Side::Enemy => {
                if self.player.is_alive() {
                    Some(self.player.id)
                } else {
                    self.squad.iter().find(|c| c.is_alive()).map(|c| c.id)
                }
            }
            Side::Player => self
                .current_target
                .filter(|id| self.living_enemies().any(|e| e.id == *id))
                .or_else(|| self.living_enemies().next().map(|e| e.id)),
        }
    }

    // ========================================================================
    // Telegraphs
    // ========================================================================

    pub fn telegraph(&self, id: PreparedId) -> Option<&Telegraph> {
        self.telegraphs.iter().find(|t| t.id == id)
    }

    pub fn remove_telegraph(&mut self, id: PreparedId) -> Option<Telegraph> {
        let index = self.telegraphs.iter().position(|t| t.id == id)?;
        Some(self.telegraphs.remove(index))
    }

    // ========================================================================
    // Allocators
    // ========================================================================

    pub(crate) fn allocate_prepared_id(&mut self) -> PreparedId {
        let id = PreparedId(self.next_prepared_id);
        self.next_prepared_id += 1;
        id
    }

    pub(crate) fn next_roll_nonce(&mut self) -> u64 {
        self.roll_nonce += 1;
        self.roll_nonce
    }
}
