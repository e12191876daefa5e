//! Deterministic duel resolution.
//!
//! `duel-core` defines the canonical combat rules (stats, damage, status
//! effects, class and race abilities, boss kits) and the French replay log a
//! match produces. It performs no I/O: balance numbers, catalogs and
//! randomness arrive through the oracles in [`env`], and every match flows
//! through [`engine::DuelEngine`].
pub mod combat;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod replay;
pub mod stats;

pub use combat::{
    AbilityResolver, BossResolver, CombatFlags, CombatantState, DamageKind, DamageRoll, Dice,
    Exchange, Impact, StatusEffects, magical_damage, physical_damage,
};
pub use combatant::{
    Archetype, BossAbility, BossKit, Class, Combatant, CombatantRecord, MageTowerPassive,
    PassiveKind, PassiveRef, Race, ValidationError, Weapon, WeaponPassive,
};
pub use config::{ConfigError, DuelConfig, EncounterMode, TurnCapRule};
pub use engine::{DuelEngine, MatchEndReason, MatchError, MatchResult, TriggerPhase, run_match};
pub use env::{
    BalanceTables, CatalogOracle, DuelEnv, Env, PassiveDefinition, PcgRng, RngOracle,
    TablesOracle,
};
pub use error::{DuelError, ErrorSeverity};
pub use replay::{Phase, ReplayLog, ReplayStep, Side, Snapshot};
pub use stats::{BaseStats, BonusBreakdown, EffectiveStats, StatDelta, StatKind, StatResolver};
