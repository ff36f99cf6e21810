//! Combat-Stat accumulator: inputs for the character stat calculator.
//!
//! The calculator applies these in a fixed stack:
//! base stats (× base-stat multiplier, truncated) → derived stat → + additive
//! → × passive → × talent/incompetence → × equipment/item multipliers →
//! conversions → forced-to-one. This module only gathers the inputs.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{BaseStat, CodeTable, CombatStat, EquipmentCategory, ParamKey, ValueKey};
use crate::effect::{EffectType, ModifierKey, Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;

use super::snapshot::ModifierSnapshot;
use super::{Accumulator, ScaleChannel, unhandled};

/// How a conversion reads its source stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionKind {
    /// `ratio` percent of the source value.
    PercentOfSource,
    /// `ratio` per whole unit of the source value.
    LinearPerSourceUnit,
}

/// One stat-to-stat conversion feeding a destination stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatConversion {
    pub source: CombatStat,
    pub ratio: f64,
    pub kind: ConversionKind,
}

impl StatConversion {
    /// Amount this conversion adds given the source stat's value.
    pub fn contribution(&self, source_value: f64) -> f64 {
        match self.kind {
            ConversionKind::PercentOfSource => source_value * self.ratio / 100.0,
            ConversionKind::LinearPerSourceUnit => source_value.trunc() * self.ratio,
        }
    }
}

/// Critical-rate inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalInputs {
    /// Flat points added to the critical rate.
    pub flat_bonus: f64,
    /// Lowest cap any skill imposes.
    pub cap: Option<f64>,
    /// Summed adjustment applied to the cap.
    pub cap_delta: f64,
}

impl CriticalInputs {
    /// Effective cap given the calculator's default cap.
    pub fn effective_cap(&self, default_cap: f64) -> f64 {
        self.cap.unwrap_or(default_cap) + self.cap_delta
    }
}

/// Everything the stat calculator needs from skills.
///
/// Maps only list stats something touched; [`CombatStatInputs::additive`]
/// and the multiplier getters fall back to neutral values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStatInputs {
    pub additive: BTreeMap<CombatStat, f64>,
    pub passive_multipliers: BTreeMap<CombatStat, f64>,
    /// Talent multipliers, already reset to 1.0 where incompetence cancels them.
    pub talent_multipliers: BTreeMap<CombatStat, f64>,
    pub incompetence_multipliers: BTreeMap<CombatStat, f64>,
    pub base_stat_multipliers: BTreeMap<BaseStat, f64>,
    pub critical: CriticalInputs,
    pub martial_bonus: ScaleChannel,
    pub growth_multiplier: f64,
    pub conversions: BTreeMap<CombatStat, Vec<StatConversion>>,
    pub forced_to_one: BTreeSet<CombatStat>,
    pub equipment_multipliers: BTreeMap<EquipmentCategory, f64>,
    pub item_stat_multipliers: BTreeMap<CombatStat, f64>,
}

impl CombatStatInputs {
    pub fn additive(&self, stat: CombatStat) -> f64 {
        self.additive.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn passive_multiplier(&self, stat: CombatStat) -> f64 {
        self.passive_multipliers.get(&stat).copied().unwrap_or(1.0)
    }

    /// Talent × incompetence for one stat.
    pub fn aptitude_multiplier(&self, stat: CombatStat) -> f64 {
        let talent = self.talent_multipliers.get(&stat).copied().unwrap_or(1.0);
        let incompetence = self
            .incompetence_multipliers
            .get(&stat)
            .copied()
            .unwrap_or(1.0);
        talent * incompetence
    }

    pub fn equipment_multiplier(&self, category: EquipmentCategory) -> f64 {
        self.equipment_multipliers
            .get(&category)
            .copied()
            .unwrap_or(1.0)
    }

    pub fn item_stat_multiplier(&self, stat: CombatStat) -> f64 {
        self.item_stat_multipliers.get(&stat).copied().unwrap_or(1.0)
    }

    /// Scales a base stat, truncating toward zero.
    pub fn apply_base_stat(&self, stat: BaseStat, value: i32) -> i32 {
        let multiplier = self.base_stat_multipliers.get(&stat).copied().unwrap_or(1.0);
        (f64::from(value) * multiplier).trunc() as i32
    }

    pub fn is_forced_to_one(&self, stat: CombatStat) -> bool {
        self.forced_to_one.contains(&stat)
    }
}

/// Reducer for [`Routes::COMBAT_STATS`].
#[derive(Clone, Debug)]
pub struct CombatStatAccumulator {
    additive: BTreeMap<CombatStat, f64>,
    passive: BTreeMap<CombatStat, ScaleChannel>,
    talent: BTreeMap<CombatStat, f64>,
    incompetence: BTreeMap<CombatStat, f64>,
    base_stat: BTreeMap<BaseStat, f64>,
    critical: CriticalInputs,
    martial: ScaleChannel,
    growth: f64,
    conversions: BTreeMap<CombatStat, Vec<StatConversion>>,
    forced_to_one: BTreeSet<CombatStat>,
    equipment: BTreeMap<EquipmentCategory, f64>,
    item_stat: BTreeMap<CombatStat, f64>,
    snapshot: ModifierSnapshot,
}

impl CombatStatAccumulator {
    pub fn new() -> Self {
        Self {
            additive: BTreeMap::new(),
            passive: BTreeMap::new(),
            talent: BTreeMap::new(),
            incompetence: BTreeMap::new(),
            base_stat: BTreeMap::new(),
            critical: CriticalInputs {
                flat_bonus: 0.0,
                cap: None,
                cap_delta: 0.0,
            },
            martial: ScaleChannel::NEUTRAL,
            growth: 1.0,
            conversions: BTreeMap::new(),
            forced_to_one: BTreeSet::new(),
            equipment: BTreeMap::new(),
            item_stat: BTreeMap::new(),
            snapshot: ModifierSnapshot::new(),
        }
    }

    /// Hands the key-addressed snapshot to the summary builder.
    pub fn take_snapshot(&mut self) -> ModifierSnapshot {
        std::mem::take(&mut self.snapshot)
    }

    fn multiply_into<K: Ord>(map: &mut BTreeMap<K, f64>, key: K, factor: f64) {
        *map.entry(key).or_insert(1.0) *= factor;
    }

    fn convert(
        &mut self,
        payload: &Payload<'_>,
        ratio_key: ValueKey,
        kind: ConversionKind,
    ) -> Result<(), ConfigError> {
        let source: CombatStat = payload.code(ParamKey::SourceStat)?;
        let target: CombatStat = payload.code(ParamKey::TargetStat)?;
        let ratio = payload.require_value(ratio_key)?;

        self.conversions.entry(target).or_default().push(StatConversion {
            source,
            ratio,
            kind,
        });
        let key = ModifierKey::new(payload.effect_type(), source.code() as u8, target.code());
        self.snapshot.add(key, ratio);
        Ok(())
    }
}

impl Default for CombatStatAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for CombatStatAccumulator {
    type Output = CombatStatInputs;

    const ROUTE: Routes = Routes::COMBAT_STATS;
    const CATEGORY: &'static str = "combatStats";

    fn apply(
        &mut self,
        payload: &Payload<'_>,
        _ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        use EffectType::*;

        let kind = payload.effect_type();
        match kind {
            StatAdditive => {
                let stat: CombatStat = payload.code(ParamKey::Stat)?;
                let value = payload.require_value(ValueKey::Value)?;
                *self.additive.entry(stat).or_insert(0.0) += value;
                self.snapshot.add(ModifierKey::new(kind, 0, stat.code()), value);
            }
            StatPercent => {
                let stat: CombatStat = payload.code(ParamKey::Stat)?;
                let percent = payload.require_value(ValueKey::ValuePercent)?;
                self.passive.entry(stat).or_default().add_percent(percent);
                self.snapshot.add(ModifierKey::new(kind, 0, stat.code()), percent);
            }
            StatMultiplier | StatTalent | StatIncompetence | ItemStatMultiplier => {
                let stat: CombatStat = payload.code(ParamKey::Stat)?;
                let factor = payload.require_value(ValueKey::Multiplier)?;
                match kind {
                    StatMultiplier => self.passive.entry(stat).or_default().multiply(factor),
                    StatTalent => Self::multiply_into(&mut self.talent, stat, factor),
                    StatIncompetence => Self::multiply_into(&mut self.incompetence, stat, factor),
                    _ => Self::multiply_into(&mut self.item_stat, stat, factor),
                }
                self.snapshot
                    .multiply(ModifierKey::new(kind, 0, stat.code()), factor);
            }
            BaseStatMultiplier => {
                let stat: BaseStat = payload.code(ParamKey::BaseStat)?;
                let factor = payload.require_value(ValueKey::Multiplier)?;
                Self::multiply_into(&mut self.base_stat, stat, factor);
                self.snapshot
                    .multiply(ModifierKey::new(kind, 0, stat.code()), factor);
            }
            CriticalRateAdditive => {
                let points = payload.require_value(ValueKey::Points)?;
                self.critical.flat_bonus += points;
                self.snapshot.add(ModifierKey::new(kind, 0, 0), points);
            }
            CriticalRateMax => {
                let cap = payload.require_value(ValueKey::Cap)?;
                self.critical.cap = Some(self.critical.cap.map_or(cap, |current| current.min(cap)));
                self.snapshot.record_min(ModifierKey::new(kind, 0, 0), cap);
            }
            CriticalRateMaxDelta => {
                let delta = payload.require_value(ValueKey::Delta)?;
                self.critical.cap_delta += delta;
                self.snapshot.add(ModifierKey::new(kind, 0, 0), delta);
            }
            MartialBonusPercent => {
                let percent = payload.require_value(ValueKey::ValuePercent)?;
                self.martial.add_percent(percent);
                self.snapshot.add(ModifierKey::new(kind, 0, 0), percent);
            }
            MartialBonusMultiplier => {
                let factor = payload.require_value(ValueKey::Multiplier)?;
                self.martial.multiply(factor);
                self.snapshot.multiply(ModifierKey::new(kind, 0, 0), factor);
            }
            GrowthMultiplier => {
                let factor = payload.require_value(ValueKey::Multiplier)?;
                self.growth *= factor;
                self.snapshot.multiply(ModifierKey::new(kind, 0, 0), factor);
            }
            StatConversionPercent => {
                self.convert(payload, ValueKey::ValuePercent, ConversionKind::PercentOfSource)?;
            }
            StatConversionLinear => {
                self.convert(
                    payload,
                    ValueKey::ValuePerUnit,
                    ConversionKind::LinearPerSourceUnit,
                )?;
            }
            StatFixedToOne => {
                let stat: CombatStat = payload.code(ParamKey::Stat)?;
                self.forced_to_one.insert(stat);
                self.snapshot.set_flag(ModifierKey::new(kind, 0, stat.code()));
            }
            EquipmentStatMultiplier => {
                let category = payload.equipment_category()?;
                let factor = payload.require_value(ValueKey::Multiplier)?;
                Self::multiply_into(&mut self.equipment, category, factor);
                self.snapshot
                    .multiply(ModifierKey::new(kind, 0, category.code()), factor);
            }
            _ => return Err(unhandled(payload, Self::CATEGORY)),
        }
        Ok(())
    }

    fn build(self) -> CombatStatInputs {
        let mut talent = self.talent;
        let mut incompetence = self.incompetence;

        // Talent and incompetence on the same stat cancel out entirely.
        let cancelled: Vec<CombatStat> = talent
            .keys()
            .filter(|stat| incompetence.contains_key(*stat))
            .copied()
            .collect();
        for stat in cancelled {
            talent.insert(stat, 1.0);
            incompetence.insert(stat, 1.0);
        }

        CombatStatInputs {
            additive: self.additive,
            passive_multipliers: self
                .passive
                .iter()
                .map(|(stat, channel)| (*stat, channel.resolve()))
                .collect(),
            talent_multipliers: talent,
            incompetence_multipliers: incompetence,
            base_stat_multipliers: self.base_stat,
            critical: self.critical,
            martial_bonus: self.martial,
            growth_multiplier: self.growth,
            conversions: self.conversions,
            forced_to_one: self.forced_to_one,
            equipment_multipliers: self.equipment,
            item_stat_multipliers: self.item_stat,
        }
    }
}
