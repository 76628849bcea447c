use std::sync::Arc;

use combat_content::{ActionLoader, ContentFactory, RankTable};
use combat_core::{
    ActionId, CombatConfig, CombatEngine, CombatEnv, CombatState, HunterRank, RankOracle,
    StandardRanks,
};
use strum::IntoEnumIterator;

fn factory() -> ContentFactory {
    ContentFactory::bundled()
}

#[test]
fn bundled_rank_table_matches_builtin() {
    let table = factory().load_ranks().expect("ranks.toml loads");
    for rank in HunterRank::iter() {
        assert_eq!(table.features(rank), StandardRanks::table(rank), "rank {rank}");
    }
}

#[test]
fn bundled_config_matches_defaults() {
    let config = factory().load_config().expect("config.toml loads");
    assert_eq!(config, CombatConfig::default());
}

#[test]
fn file_catalog_matches_embedded() {
    let from_disk = factory().load_actions().expect("actions.ron loads");
    let embedded = ActionLoader::embedded().expect("embedded catalog loads");
    assert_eq!(from_disk.len(), embedded.len());
    assert_eq!(
        from_disk.get(ActionId(112)).map(|a| a.name.as_str()),
        Some("Abyssal Ritual")
    );
}

#[test]
fn every_bundled_encounter_builds() {
    let factory = factory();
    let config = factory.load_config().expect("config loads");
    let ranks = factory.load_ranks().expect("ranks load");
    let catalog = factory.load_actions().expect("actions load");

    let names = factory.encounter_names().expect("encounters listed");
    assert!(names.contains(&"goblin_warren".to_string()));
    assert!(names.contains(&"shaman_ritual".to_string()));

    for name in names {
        let spec = factory.load_encounter(&name).expect("encounter parses");
        let encounter = spec
            .build(&catalog, &ranks, &config)
            .unwrap_or_else(|e| panic!("{name} fails to build: {e}"));
        assert!(!encounter.enemies.is_empty());
        assert!(!encounter.player.actions().is_empty());
    }
}

fn run_shaman(seed: u64, ticks: usize) -> CombatState {
    let factory = factory();
    let config = factory.load_config().expect("config loads").with_seed(seed);
    let ranks: RankTable = factory.load_ranks().expect("ranks load");
    let catalog = factory.load_actions().expect("actions load");
    let state = factory
        .load_encounter("shaman_ritual")
        .expect("encounter parses")
        .build(&catalog, &ranks, &config)
        .expect("encounter builds")
        .into_state(&config);

    let env = CombatEnv::standard(&config).with_ranks(Arc::new(ranks));
    let mut engine = CombatEngine::new(state, config).with_env(env);
    engine.start();
    for _ in 0..ticks {
        if engine.tick().is_none() {
            break;
        }
    }
    engine.into_state()
}

#[test]
fn same_seed_replays_identically() {
    let first = run_shaman(11, 40);
    let second = run_shaman(11, 40);
    assert_eq!(first.log, second.log);
    assert_eq!(first.player.health, second.player.health);
    assert_eq!(first.enemies[0].health, second.enemies[0].health);
}
