//! Battle-effect handlers.
//!
//! One pure function per Battle-Effect-routed effect type. A handler reads
//! the typed payload, mutates exactly the draft group its family owns and
//! records what it added into the accumulator's modifier snapshot. Shared
//! rules:
//!
//! - percent and multiplier channels compose as
//!   `max(0, 1 + Σpercent / 100) × Πmultiplier`;
//! - restrictive caps keep the minimum, permissive chances and caps the
//!   maximum;
//! - triggered and timed abilities are keyed by [`Payload::identity`], so a
//!   later effect with the same identity replaces an earlier one.

mod combat;
mod damage;
mod misc;
mod resurrection;
mod spell;
mod status;

use crate::accumulate::BattleEffectAccumulator;
use crate::catalog::ActorStats;
use crate::effect::{EffectType, Payload};
use crate::error::ConfigError;
use crate::registry::EffectRegistry;

pub(crate) type HandlerResult = Result<(), ConfigError>;

/// Signature shared by every battle handler.
pub type BattleHandler = fn(
    &Payload<'_>,
    &mut BattleEffectAccumulator,
    &HandlerContext<'_>,
) -> Result<(), ConfigError>;

/// Read-only inputs available to every accumulator during one call.
#[derive(Clone, Copy, Debug)]
pub struct HandlerContext<'a> {
    registry: &'a EffectRegistry,
    stats: Option<&'a ActorStats>,
}

impl<'a> HandlerContext<'a> {
    pub fn new(registry: &'a EffectRegistry, stats: Option<&'a ActorStats>) -> Self {
        Self { registry, stats }
    }

    pub fn registry(&self) -> &'a EffectRegistry {
        self.registry
    }

    /// Actor stat snapshot for stat-scaled chances, if the caller gave one.
    pub fn stats(&self) -> Option<&'a ActorStats> {
        self.stats
    }
}

/// Handler for one effect type; `None` for types the battle simulator
/// never sees.
pub fn handler_for(kind: EffectType) -> Option<BattleHandler> {
    use EffectType::*;

    let handler: BattleHandler = match kind {
        // Damage
        DamageDealtPercent => damage::dealt_percent,
        DamageDealtMultiplier => damage::dealt_multiplier,
        DamageTakenPercent => damage::taken_percent,
        DamageTakenMultiplier => damage::taken_multiplier,
        DamageDealtAgainstRace => damage::dealt_against_race,
        DamageTakenFromRace => damage::taken_from_race,
        CriticalDamagePercent => damage::critical_damage_percent,
        CriticalDamageMultiplier => damage::critical_damage_multiplier,
        CriticalDamageTakenMultiplier => damage::critical_damage_taken_multiplier,
        AdditionalDamageScoreAdditive => damage::additional_score_additive,
        AdditionalDamageScoreMultiplier => damage::additional_score_multiplier,
        MinHitScale => damage::min_hit_scale,
        DodgeCap => damage::dodge_cap,
        MagicNullifyChance => damage::magic_nullify_chance,
        LevelComparisonDamage => damage::level_comparison,
        Absorption => damage::absorption,
        HealingDealtPercent => damage::healing_dealt_percent,
        HealingReceivedMultiplier => damage::healing_received_multiplier,
        PhysicalPenetration => damage::physical_penetration,
        MartialBonusPercent => damage::martial_percent,
        MartialBonusMultiplier => damage::martial_multiplier,

        // Spells
        SpellPowerPercent => spell::power_percent,
        SpellPowerMultiplier => spell::power_multiplier,
        SpellSpecificMultiplier => spell::specific_multiplier,
        SpellSpecificTakenMultiplier => spell::specific_taken_multiplier,
        SpellChargeModifier => spell::charge_modifier,
        SpellChargeRecovery => spell::charge_recovery,
        SpellCriticalPercent => spell::critical_percent,
        SpellCriticalMultiplier => spell::critical_multiplier,
        TacticSpellAmplify => spell::tactic_amplify,

        // Combat behavior
        ExtraAction => combat::extra_action,
        Reaction => combat::reaction,
        ProcRate => combat::proc_rate,
        ProcMultiplier => combat::proc_multiplier,
        ActionOrderShuffle => combat::action_order_shuffle,
        ActionOrderMultiplier => combat::action_order_multiplier,
        CounterEvasionMultiplier => combat::counter_evasion_multiplier,
        Parry => combat::parry,
        ShieldBlock => combat::shield_block,
        Barrier => combat::barrier,
        BarrierOnGuard => combat::barrier_on_guard,
        SpecialAttack => combat::special_attack,
        EnemyActionDebuffChance => combat::enemy_action_debuff,
        EnemySingleActionSkipChance => combat::enemy_single_action_skip,
        TimedBuffTrigger => combat::timed_buff_trigger,
        TimedBuffPerTurn => combat::timed_buff_per_turn,
        FirstStrike => combat::first_strike,

        // Resurrection
        ResurrectionRescue => resurrection::rescue,
        ResurrectionActive => resurrection::active,
        ResurrectionForced => resurrection::forced,
        ResurrectionVitalize => resurrection::vitalize,
        ResurrectionSummon => resurrection::summon,
        ResurrectionPassive => resurrection::passive,
        ResurrectionSacrifice => resurrection::sacrifice,

        // Status
        StatusResistancePercent => status::resistance_percent,
        StatusResistanceMultiplier => status::resistance_multiplier,
        StatusInflict => status::inflict,
        StatusInflictMultiplier => status::inflict_multiplier,
        Berserk => status::berserk,
        AutoStatusCure => status::auto_cure,
        StatusImmunity => status::immunity,

        // Misc battle
        RowProfile => misc::row_profile,
        TargetingWeight => misc::targeting_weight,
        CoverRowsBehind => misc::cover_rows_behind,
        PartyHostility => misc::party_hostility,
        PartyProtection => misc::party_protection,
        DegradationRepair => misc::degradation_repair,
        FleeThreshold => misc::flee_threshold,
        RetreatAtTurn => misc::retreat_at_turn,
        EndOfTurnHealing => misc::end_of_turn_healing,
        EndOfTurnSelfDamage => misc::end_of_turn_self_damage,
        AntiHealing => misc::anti_healing,

        // Interpreted by presentation and tagging layers.
        BattleCry | SkillTag | StatusVisual => passthrough,

        _ => return None,
    };
    Some(handler)
}

fn passthrough(
    _payload: &Payload<'_>,
    _acc: &mut BattleEffectAccumulator,
    _ctx: &HandlerContext<'_>,
) -> HandlerResult {
    Ok(())
}

// ============================================================================
// Combination Helpers
// ============================================================================

fn keep_max(slot: &mut Option<f64>, value: f64) {
    *slot = Some(slot.map_or(value, |current| current.max(value)));
}

fn keep_min(slot: &mut Option<f64>, value: f64) {
    *slot = Some(slot.map_or(value, |current| current.min(value)));
}

fn keep_min_count(slot: &mut Option<u32>, value: u32) {
    *slot = Some(slot.map_or(value, |current| current.min(value)));
}

fn multiply_into<K: Ord>(map: &mut std::collections::BTreeMap<K, f64>, key: K, factor: f64) {
    *map.entry(key).or_insert(1.0) *= factor;
}
