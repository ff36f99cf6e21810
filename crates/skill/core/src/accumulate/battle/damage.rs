use std::collections::BTreeMap;

use crate::accumulate::{ScaleChannel, ScopedMultipliers, ScopedScale};
use crate::catalog::DamageType;

/// One resolved multiplier per damage type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerDamageType {
    pub physical: f64,
    pub magical: f64,
    pub breath: f64,
}

impl PerDamageType {
    pub const NEUTRAL: Self = Self {
        physical: 1.0,
        magical: 1.0,
        breath: 1.0,
    };

    pub fn get(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Magical => self.magical,
            DamageType::Breath => self.breath,
        }
    }

    fn from_scoped(scoped: &ScopedMultipliers<DamageType>) -> Self {
        Self {
            physical: scoped.get(&DamageType::Physical),
            magical: scoped.get(&DamageType::Magical),
            breath: scoped.get(&DamageType::Breath),
        }
    }
}

impl Default for PerDamageType {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Damage, healing and defense modifiers for the battle simulator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffects {
    pub dealt: PerDamageType,
    pub taken: PerDamageType,
    /// Dealt multipliers against specific races; applied only when the
    /// target's race matches.
    pub dealt_against_race: BTreeMap<u16, f64>,
    pub taken_from_race: BTreeMap<u16, f64>,
    pub critical_damage_multiplier: f64,
    pub critical_damage_taken_multiplier: f64,
    pub martial_multiplier: f64,
    pub additional_damage_score_additive: f64,
    pub additional_damage_score_multiplier: f64,
    /// Floor on the hit-damage scale, if any skill sets one.
    pub min_hit_scale: Option<f64>,
    /// Ceiling on dodge chance, if any skill sets one.
    pub dodge_cap: Option<f64>,
    pub magic_nullify_chance: f64,
    /// Damage percent per level of difference to the target.
    pub level_comparison_percent_per_level: f64,
    pub absorption_percent: f64,
    pub absorption_cap_percent: Option<f64>,
    pub healing_dealt_multiplier: f64,
    pub healing_received_multiplier: f64,
    pub penetration_percent: f64,
}

impl DamageEffects {
    pub fn against_race(&self, race: u16) -> f64 {
        self.dealt_against_race.get(&race).copied().unwrap_or(1.0)
    }

    pub fn from_race(&self, race: u16) -> f64 {
        self.taken_from_race.get(&race).copied().unwrap_or(1.0)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DamageDraft {
    pub dealt: ScopedScale<DamageType>,
    pub taken: ScopedScale<DamageType>,
    pub dealt_against_race: BTreeMap<u16, f64>,
    pub taken_from_race: BTreeMap<u16, f64>,
    pub critical_damage: ScaleChannel,
    pub critical_damage_taken: f64,
    pub martial: ScaleChannel,
    pub additional_damage_score_additive: f64,
    pub additional_damage_score_multiplier: f64,
    pub min_hit_scale: Option<f64>,
    pub dodge_cap: Option<f64>,
    pub magic_nullify_chance: f64,
    pub level_comparison_percent_per_level: f64,
    pub absorption_percent: f64,
    pub absorption_cap_percent: Option<f64>,
    pub healing_dealt: ScaleChannel,
    pub healing_received_multiplier: f64,
    pub penetration_percent: f64,
}

impl DamageDraft {
    pub fn new() -> Self {
        Self {
            dealt: ScopedScale::new(),
            taken: ScopedScale::new(),
            dealt_against_race: BTreeMap::new(),
            taken_from_race: BTreeMap::new(),
            critical_damage: ScaleChannel::NEUTRAL,
            critical_damage_taken: 1.0,
            martial: ScaleChannel::NEUTRAL,
            additional_damage_score_additive: 0.0,
            additional_damage_score_multiplier: 1.0,
            min_hit_scale: None,
            dodge_cap: None,
            magic_nullify_chance: 0.0,
            level_comparison_percent_per_level: 0.0,
            absorption_percent: 0.0,
            absorption_cap_percent: None,
            healing_dealt: ScaleChannel::NEUTRAL,
            healing_received_multiplier: 1.0,
            penetration_percent: 0.0,
        }
    }

    pub fn build(self) -> DamageEffects {
        DamageEffects {
            dealt: PerDamageType::from_scoped(&self.dealt.resolve()),
            taken: PerDamageType::from_scoped(&self.taken.resolve()),
            dealt_against_race: self.dealt_against_race,
            taken_from_race: self.taken_from_race,
            critical_damage_multiplier: self.critical_damage.resolve(),
            critical_damage_taken_multiplier: self.critical_damage_taken,
            martial_multiplier: self.martial.resolve(),
            additional_damage_score_additive: self.additional_damage_score_additive,
            additional_damage_score_multiplier: self.additional_damage_score_multiplier,
            min_hit_scale: self.min_hit_scale,
            dodge_cap: self.dodge_cap,
            magic_nullify_chance: self.magic_nullify_chance,
            level_comparison_percent_per_level: self.level_comparison_percent_per_level,
            absorption_percent: self.absorption_percent,
            absorption_cap_percent: self.absorption_cap_percent,
            healing_dealt_multiplier: self.healing_dealt.resolve(),
            healing_received_multiplier: self.healing_received_multiplier,
            penetration_percent: self.penetration_percent,
        }
    }
}
