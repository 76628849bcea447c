//! Traits describing read-only collaborators of the engine.
//!
//! Oracles expose the rank table, the action catalog and the random source.
//! [`CombatEnv`] bundles the ones the engine consults every tick so the
//! engine never depends on concrete implementations.
mod actions;
mod ranks;
mod rng;

pub use actions::ActionOracle;
pub use ranks::RankOracle;
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use std::sync::Arc;

use crate::combat::{InteractionTable, LevelInteraction, LinearLevelCurve};
use crate::config::CombatConfig;
use crate::rank::StandardRanks;

/// Read-only collaborators shared by one engine.
#[derive(Clone)]
pub struct CombatEnv {
    pub ranks: Arc<dyn RankOracle>,
    pub rng: Arc<dyn RngOracle>,
    pub levels: Arc<dyn LevelInteraction>,
    pub interactions: Arc<InteractionTable>,
}

impl CombatEnv {
    pub fn new(
        ranks: Arc<dyn RankOracle>,
        rng: Arc<dyn RngOracle>,
        levels: Arc<dyn LevelInteraction>,
        interactions: Arc<InteractionTable>,
    ) -> Self {
        Self {
            ranks,
            rng,
            levels,
            interactions,
        }
    }

    /// Built-in rank table, PCG rolls, linear level curve, standard counters.
    pub fn standard(config: &CombatConfig) -> Self {
        Self::new(
            Arc::new(StandardRanks),
            Arc::new(PcgRng),
            Arc::new(LinearLevelCurve::new(config.level_curve)),
            Arc::new(InteractionTable::standard()),
        )
    }

    pub fn with_ranks(mut self, ranks: Arc<dyn RankOracle>) -> Self {
        self.ranks = ranks;
        self
    }

    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_levels(mut self, levels: Arc<dyn LevelInteraction>) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_interactions(mut self, interactions: InteractionTable) -> Self {
        self.interactions = Arc::new(interactions);
        self
    }
}

impl std::fmt::Debug for CombatEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("interactions", &self.interactions.len())
            .finish_non_exhaustive()
    }
}
