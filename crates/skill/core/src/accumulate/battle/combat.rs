use std::collections::BTreeMap;

use crate::accumulate::ScaleChannel;
use crate::catalog::{CombatStat, DamageType, ReactionAction, ReactionTarget, ReactionTrigger};

/// Additional actions per turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraActionGrant {
    pub count: u32,
    /// Chance per turn; always granted when absent.
    pub chance_percent: Option<f64>,
}

/// A triggered counter-action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reaction {
    pub trigger: ReactionTrigger,
    pub action: ReactionAction,
    pub target: ReactionTarget,
    pub damage_type: Option<DamageType>,
    pub chance_percent: f64,
    pub damage_multiplier: f64,
    /// Triggers allowed per battle; unlimited when absent.
    pub max_triggers: Option<u32>,
}

/// A chance to replace a normal attack with a special attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttackGrant {
    pub special_attack_id: u16,
    pub chance_percent: f64,
}

/// Parry or shield-block capability.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardBonus {
    pub enabled: bool,
    pub bonus_percent: f64,
}

/// When a timed buff takes effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffSchedule {
    /// Once, starting at the given turn.
    AtTurn(u32),
    /// Stacking every turn.
    PerTurn,
}

/// A buff that depends on the turn counter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedBuff {
    pub schedule: BuffSchedule,
    pub stat: Option<CombatStat>,
    /// Percent bonus (per turn for [`BuffSchedule::PerTurn`]).
    pub value_percent: f64,
    pub multiplier: f64,
    pub duration: Option<u32>,
    /// Ceiling for stacking buffs.
    pub max_percent: Option<f64>,
}

/// Turn-flow and triggered-ability modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEffects {
    pub extra_actions: BTreeMap<String, ExtraActionGrant>,
    pub reactions: BTreeMap<String, Reaction>,
    pub proc: ScaleChannel,
    pub action_order_shuffle: bool,
    pub action_order_multiplier: f64,
    pub counter_evasion_multiplier: f64,
    pub parry: GuardBonus,
    pub shield_block: GuardBonus,
    pub barrier_charges: BTreeMap<DamageType, u32>,
    pub guard_barrier_charges: BTreeMap<DamageType, u32>,
    pub special_attacks: BTreeMap<String, SpecialAttackGrant>,
    pub enemy_action_debuff_chance: f64,
    pub enemy_single_action_skip_chance: f64,
    pub timed_buffs: BTreeMap<String, TimedBuff>,
    pub first_strike: bool,
}

impl CombatEffects {
    pub fn proc_multiplier(&self) -> f64 {
        self.proc.resolve()
    }

    pub fn barrier(&self, damage_type: DamageType) -> u32 {
        self.barrier_charges.get(&damage_type).copied().unwrap_or(0)
    }

    pub fn extra_action_count(&self) -> u32 {
        self.extra_actions
            .values()
            .fold(0u32, |total, grant| total.saturating_add(grant.count))
    }
}

impl Default for CombatEffects {
    fn default() -> Self {
        Self {
            extra_actions: BTreeMap::new(),
            reactions: BTreeMap::new(),
            proc: ScaleChannel::NEUTRAL,
            action_order_shuffle: false,
            action_order_multiplier: 1.0,
            counter_evasion_multiplier: 1.0,
            parry: GuardBonus::default(),
            shield_block: GuardBonus::default(),
            barrier_charges: BTreeMap::new(),
            guard_barrier_charges: BTreeMap::new(),
            special_attacks: BTreeMap::new(),
            enemy_action_debuff_chance: 0.0,
            enemy_single_action_skip_chance: 0.0,
            timed_buffs: BTreeMap::new(),
            first_strike: false,
        }
    }
}
