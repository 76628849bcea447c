use std::sync::{Arc, Mutex};

use combat_core::{
    ActionCost, ActionId, ActionTags, CombatAction, CombatConfig, CombatEngine, CombatEnv,
    CombatState, Combatant, CombatantId, EventKind, HunterRank, IntakeError, IntakeOutcome,
    LevelInteraction, LogKind, RandomPolicy, RngOracle, Role, RoleSet, SkillRequirements,
    SpecializationId, StatusEffectKind, ThreatLevel, Tick, Unavailable, Victor,
};

const GOBLIN: CombatantId = CombatantId(1);

fn strike() -> CombatAction {
    CombatAction::new(ActionId(1), "Strike")
        .with_damage(20)
        .with_cooldown(2)
        .with_tags(ActionTags::STRIKE)
}

fn hunter() -> Combatant {
    Combatant::new(CombatantId::PLAYER, "Jin", 10, 100)
        .with_mana(200)
        .with_action(strike())
}

fn goblin(max_health: u32) -> Combatant {
    Combatant::new(GOBLIN, "Goblin", 10, max_health)
}

fn engine(player: Combatant, enemies: Vec<Combatant>) -> CombatEngine {
    let config = CombatConfig::default().with_seed(7);
    let state = CombatState::new(player, enemies, &config);
    let mut engine = CombatEngine::new(state, config).with_policy(RandomPolicy);
    engine.start();
    engine
}

fn tick_n(engine: &mut CombatEngine, n: usize) {
    for _ in 0..n {
        engine.tick();
    }
}

/// Status applications always land, damage is never scaled by level.
struct Certain;

impl LevelInteraction for Certain {
    fn effect_modifier(&self, _gap: i32) -> f32 {
        1.0
    }

    fn status_chance(&self, _gap: i32) -> f32 {
        1.0
    }
}

// ============================================================================
// Instant actions
// ============================================================================

#[test]
fn instant_hit_resolves_without_telegraph() {
    let mut engine = engine(hunter(), vec![goblin(100)]);

    assert!(engine.player_use_action(ActionId(1), Some(GOBLIN)));

    let state = engine.state();
    assert_eq!(state.enemies[0].health.current(), 80);
    assert!(state.telegraphs.is_empty());
    assert!(state.player.prepared.is_none());
    assert_eq!(state.player.cooldown(ActionId(1)), Some(2));
}

#[test]
fn cooldown_blocks_reuse_until_elapsed() {
    let mut engine = engine(hunter(), vec![goblin(100)]);
    assert!(engine.player_use_action(ActionId(1), Some(GOBLIN)));

    assert_eq!(
        engine.try_player_action(ActionId(1), Some(GOBLIN)),
        Err(IntakeError::OnCooldown {
            action: ActionId(1),
            remaining: 2,
        })
    );
    assert!(!engine.player_use_action(ActionId(1), Some(GOBLIN)));
    assert!(engine.state().log.mentions("on cooldown"));

    tick_n(&mut engine, 2);
    assert_eq!(
        engine.try_player_action(ActionId(1), None),
        Ok(IntakeOutcome::Resolved)
    );
    assert_eq!(engine.state().enemies[0].health.current(), 60);
}

// ============================================================================
// Telegraphs and counters
// ============================================================================

fn siphon() -> CombatAction {
    CombatAction::new(ActionId(50), "Soul Siphon")
        .with_damage(60)
        .with_preparation(3)
        .with_cooldown(4)
        .with_tags(ActionTags::CHANNEL | ActionTags::MAGIC)
}

#[test]
fn interrupt_cancels_channel_and_telegraph() {
    let player = hunter().with_action(
        CombatAction::new(ActionId(2), "Kick")
            .with_damage(5)
            .with_tags(ActionTags::STRIKE | ActionTags::INTERRUPT),
    );
    let shaman = goblin(100).with_action(siphon());
    let mut engine = engine(player, vec![shaman]);

    engine.tick();
    {
        let state = engine.state();
        let prepared = state.enemies[0].prepared.as_ref().expect("channel started");
        assert_eq!(prepared.remaining, 3);
        let telegraph = state.telegraph(prepared.id).expect("telegraph exists");
        assert_eq!(telegraph.threat, ThreatLevel::Lethal);
        assert!(state.log.mentions("Warning: Goblin prepares Soul Siphon"));
    }

    assert!(engine.player_use_action(ActionId(2), Some(GOBLIN)));
    let state = engine.state();
    assert!(state.enemies[0].prepared.is_none());
    assert!(state.telegraphs.is_empty());
    assert!(state.log.mentions("Jin interrupts Goblin's Soul Siphon"));
    assert_eq!(state.enemies[0].health.current(), 95);

    // the goblin restarts the channel next tick; it cannot land before tick 5
    tick_n(&mut engine, 3);
    assert_eq!(engine.state().player.health.current(), 100);
}

#[test]
fn prepared_action_lands_after_preparation() {
    let shaman = goblin(100).with_action(siphon());
    let mut engine = engine(hunter(), vec![shaman]);

    tick_n(&mut engine, 3);
    assert_eq!(engine.state().player.health.current(), 100);

    let report = engine.tick().expect("combat is live");
    assert_eq!(report.executed, 1);
    assert_eq!(engine.state().player.health.current(), 40);
    assert!(engine.state().telegraphs.is_empty());
    assert_eq!(engine.state().enemies[0].cooldown(ActionId(50)), Some(4));
}

#[test]
fn forewarning_and_critical_threat_fire_on_the_same_tick() {
    let meteor = CombatAction::new(ActionId(60), "Meteor")
        .with_damage(250)
        .with_preparation(3)
        .with_tags(ActionTags::RITUAL | ActionTags::AREA);
    let mut engine = engine(hunter(), vec![goblin(100).with_action(meteor)]);

    tick_n(&mut engine, 3);

    let state = engine.state();
    let at_tick_three: Vec<_> = state
        .log
        .entries()
        .filter(|e| e.tick == Tick(3))
        .map(|e| e.kind)
        .collect();
    assert!(at_tick_three.contains(&LogKind::Telegraph));
    assert!(at_tick_three.contains(&LogKind::Threat));
    assert!(state.log.mentions("Goblin's Meteor lands next tick"));
    assert!(state.telegraphs[0].is_critical());
}

#[test]
fn block_reduces_strike_damage() {
    let brace = CombatAction::new(ActionId(70), "Brace")
        .with_preparation(3)
        .with_tags(ActionTags::BLOCK);
    let mut engine = engine(hunter(), vec![goblin(100).with_action(brace)]);

    engine.tick();
    assert!(engine.player_use_action(ActionId(1), Some(GOBLIN)));

    // 20 × (1 - 0.6)
    assert_eq!(engine.state().enemies[0].health.current(), 92);
    assert!(engine.state().log.mentions("Goblin blocks Strike"));
}

#[test]
fn shield_counters_projectile_entirely() {
    let bulwark = CombatAction::new(ActionId(71), "Bulwark")
        .with_preparation(3)
        .with_tags(ActionTags::SHIELD);
    let arrow = CombatAction::new(ActionId(3), "Arrow")
        .with_damage(30)
        .with_tags(ActionTags::PROJECTILE | ActionTags::PIERCE);
    let mut engine = engine(
        hunter().with_action(arrow),
        vec![goblin(100).with_action(bulwark)],
    );

    engine.tick();
    assert!(engine.player_use_action(ActionId(3), Some(GOBLIN)));

    let state = engine.state();
    assert_eq!(state.enemies[0].health.current(), 100);
    assert!(state.log.mentions("deflects the projectile"));
    // countered actions still go on cooldown
    assert!(state.player.cooldown(ActionId(3)).is_some());
}

// ============================================================================
// Status effects
// ============================================================================

#[test]
fn burn_ticks_through_shield_and_expires() {
    let config = CombatConfig::default().with_seed(3);
    let env = CombatEnv::standard(&config).with_levels(Arc::new(Certain));
    let ignite = CombatAction::new(ActionId(4), "Ignite").with_effect(StatusEffectKind::Burn, 5, 3);
    let state = CombatState::new(
        hunter().with_action(ignite),
        vec![goblin(100).with_shield(50)],
        &config,
    );
    let mut engine = CombatEngine::new(state, config).with_env(env);
    engine.start();

    assert!(engine.player_use_action(ActionId(4), Some(GOBLIN)));
    assert!(engine.state().enemies[0].status.has(StatusEffectKind::Burn));

    tick_n(&mut engine, 3);
    let goblin = &engine.state().enemies[0];
    assert_eq!(goblin.health.current(), 85);
    assert_eq!(goblin.shield, 50);
    assert!(!goblin.status.has(StatusEffectKind::Burn));

    tick_n(&mut engine, 2);
    assert_eq!(engine.state().enemies[0].health.current(), 85);
}

#[test]
fn stun_blocks_intake() {
    let config = CombatConfig::default();
    let env = CombatEnv::standard(&config).with_levels(Arc::new(Certain));
    let bash = CombatAction::new(ActionId(80), "Shield Bash")
        .with_damage(1)
        .with_cooldown(10)
        .with_effect(StatusEffectKind::Stun, 0, 2);
    let state = CombatState::new(hunter(), vec![goblin(100).with_action(bash)], &config);
    let mut engine = CombatEngine::new(state, config)
        .with_env(env)
        .with_policy(RandomPolicy);
    engine.start();

    engine.tick();
    assert!(engine.state().player.status.is_incapacitated());
    assert_eq!(
        engine.try_player_action(ActionId(1), Some(GOBLIN)),
        Err(IntakeError::Incapacitated)
    );

    tick_n(&mut engine, 2);
    assert!(!engine.state().player.status.is_incapacitated());
    assert!(engine.player_use_action(ActionId(1), Some(GOBLIN)));
}

// ============================================================================
// Rank gating
// ============================================================================

#[test]
fn module_gate_rejects_locked_skill_without_charge() {
    let domain = CombatAction::new(ActionId(5), "Third Form")
        .with_damage(90)
        .with_cost(ActionCost::mana(40))
        .with_requirements(SkillRequirements {
            roles: RoleSet::FIGHTER,
            module: Some(2),
            exclusive: None,
        });
    let player = hunter()
        .with_role(Role::Fighter, HunterRank::C)
        .with_action(domain);
    let mut engine = engine(player, vec![goblin(100)]);

    assert_eq!(
        engine.try_player_action(ActionId(5), Some(GOBLIN)),
        Err(IntakeError::Unavailable {
            action: ActionId(5),
            reason: Unavailable::ModuleLocked {
                required_tier: 3,
                unlocked: 2,
                rank: HunterRank::C,
            },
        })
    );
    assert!(!engine.player_use_action(ActionId(5), Some(GOBLIN)));
    assert!(engine.state().log.mentions("not available"));
    assert_eq!(engine.state().player.mana_available(), 200);
}

#[test]
fn exclusive_skills_share_one_global_cooldown() {
    let spec = SpecializationId(7);
    let exclusive = |id: u16, name: &str| {
        CombatAction::new(ActionId(id), name)
            .with_damage(1)
            .with_cooldown(5)
            .with_cost(ActionCost::mana(10))
            .with_requirements(SkillRequirements {
                roles: RoleSet::FIGHTER,
                module: None,
                exclusive: Some(spec),
            })
    };
    let player = Combatant::new(CombatantId::PLAYER, "Jin", 50, 100)
        .with_mana(200)
        .with_role(Role::Fighter, HunterRank::B)
        .with_specialization(spec)
        .with_action(exclusive(10, "Ruler's Hand"))
        .with_action(exclusive(11, "Shadow Step"));
    let mut engine = engine(player, vec![goblin(10_000)]);

    assert!(engine.player_use_action(ActionId(10), Some(GOBLIN)));
    // rank B clamps the cost into 35..=50
    assert_eq!(engine.state().player.mana_available(), 165);

    assert!(matches!(
        engine.try_player_action(ActionId(11), Some(GOBLIN)),
        Err(IntakeError::ExclusiveCooldown { .. })
    ));
    assert_eq!(engine.state().player.mana_available(), 165);

    // rank B clamps the shared cooldown into 25..=35
    tick_n(&mut engine, 24);
    assert!(engine.try_player_action(ActionId(11), Some(GOBLIN)).is_err());
    engine.tick();
    assert_eq!(
        engine.try_player_action(ActionId(11), Some(GOBLIN)),
        Ok(IntakeOutcome::Resolved)
    );
}

#[test]
fn foreign_skill_costs_more_after_awakening() {
    let heal = CombatAction::new(ActionId(6), "Mend")
        .with_healing(40)
        .with_cost(ActionCost::mana(20))
        .with_requirements(SkillRequirements {
            roles: RoleSet::HEALER,
            ..SkillRequirements::default()
        });
    let player = Combatant::new(CombatantId::PLAYER, "Jin", 45, 100)
        .with_mana(200)
        .with_role(Role::Fighter, HunterRank::C)
        .with_action(heal);
    let mut engine = engine(player, vec![goblin(100)]);

    let effectiveness = engine
        .effectiveness(CombatantId::PLAYER, ActionId(6))
        .expect("owned action");
    assert!(effectiveness.foreign);

    assert!(engine.player_use_action(ActionId(6), None));
    // 20 × 1.3
    assert_eq!(engine.state().player.mana_available(), 174);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn lifecycle_transitions_are_idempotent() {
    let config = CombatConfig::default();
    let state = CombatState::new(hunter(), vec![goblin(100)], &config);
    let mut engine = CombatEngine::new(state, config);

    let ends = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&ends);
    engine.subscribe(EventKind::CombatEnd, move |_, _| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    assert!(engine.tick().is_none());
    assert!(!engine.player_use_action(ActionId(1), Some(GOBLIN)));

    assert!(engine.start());
    assert!(!engine.start());

    assert!(engine.pause());
    assert!(!engine.pause());
    assert!(engine.tick().is_none());
    assert_eq!(
        engine.try_player_action(ActionId(1), Some(GOBLIN)),
        Err(IntakeError::NotAccepting)
    );

    assert!(engine.resume());
    assert!(!engine.resume());
    assert_eq!(engine.tick().map(|r| r.tick), Some(Tick(1)));

    assert!(engine.stop(Victor::Player));
    assert!(!engine.stop(Victor::Enemy));
    assert_eq!(engine.state().victor, Some(Victor::Player));
    assert!(!engine.start());
    assert!(engine.tick().is_none());
    assert_eq!(*ends.lock().unwrap(), 1);
}

#[test]
fn defeating_last_enemy_wins_with_rewards() {
    let mut engine = engine(hunter(), vec![goblin(20)]);
    assert!(engine.player_use_action(ActionId(1), Some(GOBLIN)));
    assert!(engine.state().enemies[0].is_defeated());

    let report = engine.tick().expect("tick runs");
    assert_eq!(report.victor, Some(Victor::Player));

    let rewards = engine.state().rewards.expect("rewards recorded");
    assert_eq!(rewards.defeated, 1);
    assert_eq!(rewards.experience, 10 * 25);
    assert_eq!(rewards.gold, 10 * 10);
}

#[test]
fn player_defeat_ends_combat_for_the_enemy() {
    let crush = CombatAction::new(ActionId(90), "Crush").with_damage(500);
    let mut engine = engine(hunter(), vec![goblin(100).with_action(crush)]);

    let report = engine.tick().expect("tick runs");
    assert_eq!(report.victor, Some(Victor::Enemy));
    assert_eq!(engine.state().player.health.current(), 0);
    assert_eq!(engine.state().rewards.map(|r| r.experience), Some(0));
}

#[test]
fn events_are_published_in_order_with_tick_last() {
    let crush = CombatAction::new(ActionId(90), "Claw").with_damage(10);
    let mut engine = engine(hunter(), vec![goblin(100).with_action(crush)]);

    let kinds = Arc::new(Mutex::new(Vec::new()));
    for kind in [EventKind::Damage, EventKind::Tick] {
        let sink = Arc::clone(&kinds);
        engine.subscribe(kind, move |event, state| {
            assert_eq!(event.tick(), state.tick);
            sink.lock().unwrap().push(event.kind());
            Ok(())
        });
    }

    engine.tick();
    assert_eq!(*kinds.lock().unwrap(), vec![EventKind::Damage, EventKind::Tick]);
}

// ============================================================================
// Resolution edge cases
// ============================================================================

/// Every roll comes up zero: dodges and status rolls succeed.
struct LowRolls;

impl RngOracle for LowRolls {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

/// Status applications never land.
struct Unyielding;

impl LevelInteraction for Unyielding {
    fn effect_modifier(&self, _gap: i32) -> f32 {
        1.0
    }

    fn status_chance(&self, _gap: i32) -> f32 {
        0.0
    }
}

#[test]
fn one_tick_preparation_warns_and_forewarns_at_intake() {
    let jab = CombatAction::new(ActionId(61), "Jab")
        .with_damage(5)
        .with_preparation(1)
        .with_cooldown(5);
    let mut engine = engine(hunter(), vec![goblin(100).with_action(jab)]);

    engine.tick();
    {
        let state = engine.state();
        let prepared = state.enemies[0].prepared.as_ref().expect("jab queued");
        let telegraph = state.telegraph(prepared.id).expect("telegraph exists");
        assert_eq!(telegraph.threat, ThreatLevel::Low);
        assert!(telegraph.is_critical());
        assert!(state.log.mentions("Warning: Goblin prepares Jab (low threat)"));
        assert!(state.log.mentions("Goblin's Jab lands next tick"));
    }

    engine.tick();
    let state = engine.state();
    assert_eq!(state.player.health.current(), 95);
    let forewarnings = state
        .log
        .entries()
        .filter(|e| e.message.contains("lands next tick"))
        .count();
    assert_eq!(forewarnings, 1);
}

#[test]
fn dodge_negates_single_target_but_not_area_attacks() {
    let config = CombatConfig::default();
    let env = CombatEnv::standard(&config).with_rng(Arc::new(LowRolls));
    let sidestep = CombatAction::new(ActionId(72), "Sidestep")
        .with_preparation(3)
        .with_tags(ActionTags::DODGE);
    let shockwave = CombatAction::new(ActionId(7), "Shockwave")
        .with_damage(20)
        .with_tags(ActionTags::AREA);
    let state = CombatState::new(
        hunter().with_action(shockwave),
        vec![goblin(100).with_action(sidestep)],
        &config,
    );
    let mut engine = CombatEngine::new(state, config)
        .with_env(env)
        .with_policy(RandomPolicy);
    engine.start();

    engine.tick();
    assert!(engine.state().enemies[0].prepared.is_some());

    assert!(engine.player_use_action(ActionId(1), Some(GOBLIN)));
    {
        let state = engine.state();
        assert_eq!(state.enemies[0].health.current(), 100);
        assert!(state.log.mentions("Goblin dodges Strike"));
        assert_eq!(state.player.cooldown(ActionId(1)), Some(2));
    }

    assert!(engine.player_use_action(ActionId(7), Some(GOBLIN)));
    let state = engine.state();
    assert_eq!(state.enemies[0].health.current(), 80);
    assert!(!state.log.mentions("dodges Shockwave"));
}

#[test]
fn failed_status_roll_logs_resist_and_applies_nothing() {
    let config = CombatConfig::default();
    let env = CombatEnv::standard(&config).with_levels(Arc::new(Unyielding));
    let ignite = CombatAction::new(ActionId(4), "Ignite").with_effect(StatusEffectKind::Burn, 5, 3);
    let state = CombatState::new(hunter().with_action(ignite), vec![goblin(100)], &config);
    let mut engine = CombatEngine::new(state, config).with_env(env);
    engine.start();

    assert!(engine.player_use_action(ActionId(4), Some(GOBLIN)));

    let state = engine.state();
    assert!(state.log.mentions("Goblin resists burn"));
    assert!(!state.enemies[0].status.has(StatusEffectKind::Burn));
    assert!(state.enemies[0].status.is_empty());

    engine.tick();
    assert_eq!(engine.state().enemies[0].health.current(), 100);
}

#[test]
fn prepared_action_against_fallen_target_still_goes_on_cooldown() {
    let config = CombatConfig::default();
    let env = CombatEnv::standard(&config).with_levels(Arc::new(Certain));
    let ignite = CombatAction::new(ActionId(4), "Ignite").with_effect(StatusEffectKind::Burn, 5, 3);
    let swing = CombatAction::new(ActionId(8), "Heavy Swing")
        .with_damage(30)
        .with_preparation(2)
        .with_cooldown(3);
    let orc = Combatant::new(CombatantId(2), "Orc", 10, 100);
    let state = CombatState::new(
        hunter().with_action(ignite).with_action(swing),
        vec![goblin(5), orc],
        &config,
    );
    let mut engine = CombatEngine::new(state, config).with_env(env);
    engine.start();

    assert!(engine.player_use_action(ActionId(4), Some(GOBLIN)));
    assert!(engine.player_use_action(ActionId(8), Some(GOBLIN)));

    engine.tick();
    assert!(engine.state().enemies[0].is_defeated());
    assert!(engine.state().player.prepared.is_some());

    let report = engine.tick().expect("combat is live");
    assert_eq!(report.executed, 1);
    let state = engine.state();
    assert!(state.log.mentions("Jin's Heavy Swing has no target"));
    assert_eq!(state.player.cooldown(ActionId(8)), Some(3));
    assert_eq!(state.enemies[1].health.current(), 100);
    assert!(!state.is_ended());
}

#[test]
fn prepared_countdown_and_telegraph_stay_in_lockstep() {
    let shaman = goblin(100).with_action(siphon());
    let mut engine = engine(hunter(), vec![shaman]);

    let mut finished_at = None;
    for _ in 0..4 {
        let report = engine.tick().expect("combat is live");
        let state = engine.state();
        match state.enemies[0].prepared.as_ref() {
            Some(prepared) => {
                let telegraph = state.telegraph(prepared.id).expect("telegraph exists");
                assert_eq!(telegraph.remaining_ticks, prepared.remaining);
            }
            None => {
                assert!(state.telegraphs.is_empty());
                finished_at.get_or_insert(report.tick);
            }
        }
    }
    assert_eq!(finished_at, Some(Tick(4)));
}

#[cfg(feature = "serde")]
#[test]
fn mid_channel_snapshot_restores_through_json() {
    let shaman = goblin(100).with_action(siphon());
    let mut engine = engine(hunter(), vec![shaman]);
    engine.tick();

    let json = serde_json::to_string(engine.state()).expect("state serializes");
    let restored: CombatState = serde_json::from_str(&json).expect("state deserializes");
    assert_eq!(&restored, engine.state());

    let config = CombatConfig::default().with_seed(7);
    let mut resumed = CombatEngine::new(restored, config).with_policy(RandomPolicy);
    tick_n(&mut engine, 3);
    tick_n(&mut resumed, 3);
    assert_eq!(resumed.state(), engine.state());
    assert_eq!(resumed.state().player.health.current(), 40);
}
