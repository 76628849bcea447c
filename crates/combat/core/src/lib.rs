//! Deterministic combat rules shared by the runtime and offline tools.
//!
//! `combat-core` defines the tick-based action/telegraph engine and the
//! rank-scaled skill effectiveness model. All state mutation flows through
//! [`engine::CombatEngine`]; the async timer that drives it lives in the
//! `combat-runtime` crate.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod rank;
pub mod state;

pub use action::{ActionCost, ActionTags, CombatAction, SkillRequirements, StatusApplication};
pub use ai::{AiPolicy, BehaviorProfile, BossPhase, RandomPolicy, WeightedPolicy};
pub use combat::{
    CounterOutcome, Interaction, InteractionTable, LevelInteraction, LinearLevelCurve, Rewards,
};
pub use config::{CombatConfig, LevelCurveConfig, RewardRates};
pub use engine::{CombatEngine, IntakeError, IntakeOutcome, TickReport};
pub use env::{ActionOracle, CombatEnv, PcgRng, RankOracle, RngOracle, RollContext, compute_seed};
pub use error::{CombatError, ErrorSeverity};
pub use events::{
    CombatEvent, CombatOutcome, DamageEvent, EventDispatcher, EventKind, HealEvent,
    SubscriberError, SubscriberResult, SubscriptionId,
};
pub use rank::{
    AwakeningPhase, EquipError, ExclusiveTimer, HunterRank, Loadout, Progression, RankFeatures,
    Role, RoleSet, SkillEffectiveness, SpecializationId, StandardRanks, TierRange, Unavailable,
    evaluate,
};
pub use state::{
    ActionId, CombatLog, CombatState, Combatant, CombatantId, LogEntry, LogKind, Meter,
    PreparedAction, PreparedId, Side, StatusEffect, StatusEffectKind, StatusEffects, Telegraph,
    TelegraphKind, ThreatLevel, Tick, Victor,
};
