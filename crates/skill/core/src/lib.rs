//! Deterministic skill-effect aggregation shared by the game services.
//!
//! `skill-core` turns the data-encoded effects attached to a character's skills
//! into every derived quantity the rest of the game consumes: combat stat
//! inputs, battle-time behaviors, reward and exploration multipliers,
//! equipment-slot bonuses, spell access and a UI-facing modifier summary.
//!
//! All aggregation flows through [`aggregate::SkillAggregator`], which is
//! handed a read-only [`registry::EffectRegistry`] built once at start-up.
//! The crate performs no I/O and keeps no state between calls.
pub mod accumulate;
pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod summary;

pub use accumulate::{
    BattleEffects, CombatEffects, CombatStatInputs, DamageEffects, EquipmentSlots,
    ExplorationContext, ExplorationModifiers, MiscEffects, ResurrectionEffects, RewardChannel,
    RewardComponents, SpellEffects, SpellLoadout, Spellbook, StatusEffects,
};
pub use aggregate::{AggregationOptions, SkillAggregator, SkillBundle};
pub use catalog::{
    ActorStats, ArrayKey, BaseStat, CombatStat, DamageType, Effect, EquipmentCategory, ParamKey,
    SkillDefinition, SkillId, SpellDefinition, SpellSchool, TextKey, ValueKey,
};
pub use config::EngineConfig;
pub use effect::{EffectFamily, EffectType, ModifierKey, Payload, Routes};
pub use error::{ConfigError, ConfigErrorKind};
pub use registry::EffectRegistry;
pub use summary::{ModifierSummary, SummaryEntry, SummaryValue};
