//! Encounter loader.
//!
//! An encounter names the player, the enemy roster and an optional allied
//! squad. Combatants reference skills by catalog id; hunters (the player
//! and the squad) equip them through a [`Loadout`] so rank gating and the
//! affinity cap apply, while monsters take their list as written.

use std::path::Path;

use combat_core::{
    ActionId, ActionOracle, ActionTags, BehaviorProfile, BossPhase, CombatAction, CombatConfig,
    CombatState, Combatant, CombatantId, HunterRank, Loadout, RankOracle, Role, SpecializationId,
};

use crate::loaders::{LoadResult, read_file};

/// Encounter definition as written in RON.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    pub player: CombatantSpec,
    pub enemies: Vec<CombatantSpec>,
    #[serde(default)]
    pub squad: Vec<CombatantSpec>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub level: u32,
    pub health: u32,
    #[serde(default)]
    pub mana: Option<u32>,
    #[serde(default)]
    pub stamina: Option<u32>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub rank: HunterRank,
    #[serde(default)]
    pub specialization: Option<SpecializationId>,
    #[serde(default)]
    pub affinity_bonus: u8,
    #[serde(default)]
    pub shield: u32,
    #[serde(default)]
    pub damage_reduction: f32,
    pub actions: Vec<ActionId>,
    #[serde(default)]
    pub behavior: Option<BehaviorSpec>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BehaviorSpec {
    #[serde(default)]
    pub tag_weights: Vec<(ActionTags, u32)>,
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PhaseSpec {
    pub health_percent: u8,
    pub name: String,
    pub actions: Vec<ActionId>,
}

/// A resolved encounter, ready to become a [`CombatState`].
#[derive(Debug, Clone)]
pub struct Encounter {
    pub name: String,
    pub player: Combatant,
    pub enemies: Vec<Combatant>,
    pub squad: Vec<Combatant>,
}

impl Encounter {
    pub fn into_state(self, config: &CombatConfig) -> CombatState {
        CombatState::new(self.player, self.enemies, config).with_squad(self.squad)
    }
}

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load encounter {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        if spec.enemies.is_empty() {
            anyhow::bail!("encounter '{}' has no enemies", spec.name);
        }
        Ok(spec)
    }
}

impl EncounterSpec {
    /// Resolves every action reference and assigns combatant ids.
    ///
    /// The player is always [`CombatantId::PLAYER`]; enemies follow from 1,
    /// then the squad.
    pub fn build(
        &self,
        catalog: &dyn ActionOracle,
        ranks: &dyn RankOracle,
        config: &CombatConfig,
    ) -> LoadResult<Encounter> {
        let player = self
            .player
            .build_hunter(CombatantId::PLAYER, catalog, ranks, config)?;

        let mut next_id = 1u32;
        let mut enemies = Vec::with_capacity(self.enemies.len());
        for spec in &self.enemies {
            enemies.push(spec.build_monster(CombatantId(next_id), catalog)?);
            next_id += 1;
        }

        let mut squad = Vec::with_capacity(self.squad.len());
        for spec in &self.squad {
            squad.push(spec.build_hunter(CombatantId(next_id), catalog, ranks, config)?);
            next_id += 1;
        }

        tracing::debug!(
            encounter = %self.name,
            enemies = enemies.len(),
            squad = squad.len(),
            "encounter built"
        );
        Ok(Encounter {
            name: self.name.clone(),
            player,
            enemies,
            squad,
        })
    }
}

impl CombatantSpec {
    fn base(&self, id: CombatantId) -> Combatant {
        let mut combatant = Combatant::new(id, self.name.clone(), self.level, self.health)
            .with_role(self.role, self.rank)
            .with_affinity_bonus(self.affinity_bonus)
            .with_shield(self.shield)
            .with_damage_reduction(self.damage_reduction);
        if let Some(mana) = self.mana {
            combatant = combatant.with_mana(mana);
        }
        if let Some(stamina) = self.stamina {
            combatant = combatant.with_stamina(stamina);
        }
        if let Some(specialization) = self.specialization {
            combatant = combatant.with_specialization(specialization);
        }
        combatant
    }

    fn build_hunter(
        &self,
        id: CombatantId,
        catalog: &dyn ActionOracle,
        ranks: &dyn RankOracle,
        config: &CombatConfig,
    ) -> LoadResult<Combatant> {
        let combatant = self.base(id);
        let progression = combatant.progression();

        let mut loadout = Loadout::new();
        for &action_id in &self.actions {
            let action = resolve(catalog, action_id, &self.name)?;
            loadout
                .equip(&action, &progression, ranks, config.awakening_level)
                .map_err(|e| {
                    anyhow::anyhow!("{} cannot equip '{}': {}", self.name, action.name, e)
                })?;
        }

        let mut combatant = combatant.with_loadout(&loadout, catalog);
        if let Some(behavior) = &self.behavior {
            combatant = combatant.with_behavior(behavior.build(catalog, &self.name)?);
        }
        Ok(combatant)
    }

    fn build_monster(&self, id: CombatantId, catalog: &dyn ActionOracle) -> LoadResult<Combatant> {
        let mut actions = Vec::with_capacity(self.actions.len());
        for &action_id in &self.actions {
            actions.push(resolve(catalog, action_id, &self.name)?);
        }

        let mut combatant = self.base(id).with_actions(actions);
        if let Some(behavior) = &self.behavior {
            combatant = combatant.with_behavior(behavior.build(catalog, &self.name)?);
        }
        Ok(combatant)
    }
}

impl BehaviorSpec {
    fn build(&self, catalog: &dyn ActionOracle, owner: &str) -> LoadResult<BehaviorProfile> {
        let mut profile = BehaviorProfile::new();
        for &(tags, weight) in &self.tag_weights {
            profile = profile.with_tag_weight(tags, weight);
        }
        for phase in &self.phases {
            if phase.health_percent > 100 {
                anyhow::bail!(
                    "{} phase '{}' threshold {}% exceeds 100",
                    owner,
                    phase.name,
                    phase.health_percent
                );
            }
            let mut actions = Vec::with_capacity(phase.actions.len());
            for &action_id in &phase.actions {
                actions.push(resolve(catalog, action_id, owner)?);
            }
            profile = profile.with_phase(BossPhase {
                health_percent: phase.health_percent,
                name: phase.name.clone(),
                actions,
            });
        }
        Ok(profile)
    }
}

fn resolve(
    catalog: &dyn ActionOracle,
    id: ActionId,
    owner: &str,
) -> LoadResult<CombatAction> {
    catalog
        .action(id)
        .ok_or_else(|| anyhow::anyhow!("{} references unknown {}", owner, id))
}
