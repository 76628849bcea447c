//! Builds one combat from the content pack and runs it to the end.
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use combat_content::ContentFactory;
use combat_core::{ActionId, CombatEnv, CombatEvent, CombatOutcome, CombatState, Combatant};
use combat_runtime::{Event, RotationProvider, Runtime, RuntimeConfig, Topic};

use crate::config::SkirmishConfig;

/// A built runtime plus the combat log printer attached to it.
pub struct Session {
    encounter: String,
    runtime: Runtime,
    printer: JoinHandle<()>,
}

impl Session {
    pub async fn prepare(config: &SkirmishConfig) -> Result<Self> {
        let factory = match &config.content_dir {
            Some(dir) => ContentFactory::new(dir.clone()),
            None => ContentFactory::bundled(),
        };
        tracing::debug!("Loading content from {}", factory.data_dir().display());

        let mut combat_config = factory.load_config()?;
        if let Some(ms) = config.tick_ms {
            combat_config = combat_config.with_tick_duration_ms(ms);
        }
        if let Some(seed) = config.seed {
            combat_config = combat_config.with_seed(seed);
        }

        let ranks = Arc::new(factory.load_ranks()?);
        let catalog = factory.load_actions()?;
        let encounter = factory
            .load_encounter(&config.encounter)?
            .build(&catalog, ranks.as_ref(), &combat_config)
            .with_context(|| format!("Failed to build encounter {}", config.encounter))?;

        let name = encounter.name.clone();
        let rotation: Vec<ActionId> = encounter.player.actions().iter().map(|a| a.id).collect();
        tracing::info!(
            encounter = %name,
            enemies = encounter.enemies.len(),
            squad = encounter.squad.len(),
            "encounter loaded"
        );

        let state = encounter.into_state(&combat_config);
        let env = CombatEnv::standard(&combat_config).with_ranks(ranks);
        let runtime_config = RuntimeConfig {
            max_ticks: config.max_ticks,
            ..RuntimeConfig::default()
        };

        let mut builder = Runtime::builder()
            .config(runtime_config)
            .combat_config(combat_config)
            .env(env)
            .initial_state(state)
            .player_provider(RotationProvider::new(rotation));
        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }
        let runtime = builder.build().await?;

        let printer = tokio::spawn(print_log(runtime.handle().subscribe(Topic::Log)));

        Ok(Self {
            encounter: name,
            runtime,
            printer,
        })
    }

    /// Runs the combat, shuts the runtime down and summarizes the result.
    pub async fn run(mut self) -> Result<Summary> {
        let outcome = self.runtime.run().await?;
        let state = self.runtime.handle().query_state().await?;

        self.runtime.shutdown().await?;
        self.printer.await?;

        Ok(Summary::new(self.encounter, outcome, &state))
    }
}

async fn print_log(mut log: broadcast::Receiver<Event>) {
    loop {
        match log.recv().await {
            Ok(Event::Combat(CombatEvent::Log(entry))) => {
                println!("[{:>4}] {:<10} {}", entry.tick.0, entry.kind.to_string(), entry.message);
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "combat log printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Final report printed as JSON.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub encounter: String,
    pub seed: u64,
    pub outcome: CombatOutcome,
    pub player: Standing,
    pub enemies: Vec<Standing>,
    pub squad: Vec<Standing>,
}

#[derive(Debug, Serialize)]
pub struct Standing {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
}

impl From<&Combatant> for Standing {
    fn from(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            health: combatant.health.current(),
            max_health: combatant.health.maximum(),
        }
    }
}

impl Summary {
    fn new(encounter: String, outcome: CombatOutcome, state: &CombatState) -> Self {
        Self {
            encounter,
            seed: state.seed,
            outcome,
            player: Standing::from(&state.player),
            enemies: state.enemies.iter().map(Standing::from).collect(),
            squad: state.squad.iter().map(Standing::from).collect(),
        }
    }
}
