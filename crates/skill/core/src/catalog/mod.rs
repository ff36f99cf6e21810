//! Skill content model: definitions, raw effect records and their field keys.
//!
//! Skills are immutable content loaded from the master catalog. An [`Effect`]
//! is the raw, schema-light record designers author; the engine decodes it
//! into a typed [`crate::effect::Payload`] on every aggregation call.

mod actor;
mod codes;
mod spell;

use std::collections::BTreeMap;

pub use actor::ActorStats;
pub use codes::{
    BaseStat, CodeTable, CombatStat, DamageType, EquipmentCategory, HpScale, ReactionAction,
    ReactionTarget, ReactionTrigger, ResurrectionPassiveKind, RowProfile, SpellSchool,
};
pub use spell::SpellDefinition;

use crate::effect::EffectType;

/// Stable numeric identifier of a skill.
pub type SkillId = u32;

// ============================================================================
// Skill Definition
// ============================================================================

/// A data-defined ability attached to a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    /// Effects in authoring order; `Effect::index` defines the total order.
    pub effects: Vec<Effect>,
}

impl SkillDefinition {
    pub fn new(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            effects: Vec::new(),
        }
    }

    /// Appends an effect, assigning it the next index (builder pattern).
    pub fn with_effect(mut self, mut effect: Effect) -> Self {
        effect.index = self.effects.len() as u16;
        self.effects.push(effect);
        self
    }
}

// ============================================================================
// Effect Record
// ============================================================================

/// One typed, parameterized rule inside a skill.
///
/// The three maps mirror the content schema: integer codes (stat ids, damage
/// types, counts), floating point values (percents, multipliers, chances) and
/// integer lists (spell id sets, race id sets).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Effect {
    pub kind: EffectType,

    #[cfg_attr(feature = "serde", serde(default))]
    pub index: u16,

    /// Stable identity of a triggered ability across re-aggregation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub family_id: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub params: BTreeMap<ParamKey, i32>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub values: BTreeMap<ValueKey, f64>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub arrays: BTreeMap<ArrayKey, Vec<i32>>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub texts: BTreeMap<TextKey, String>,
}

impl Effect {
    pub fn new(kind: EffectType) -> Self {
        Self {
            kind,
            index: 0,
            family_id: None,
            params: BTreeMap::new(),
            values: BTreeMap::new(),
            arrays: BTreeMap::new(),
            texts: BTreeMap::new(),
        }
    }

    /// Builder: set the effect index.
    pub fn at(mut self, index: u16) -> Self {
        self.index = index;
        self
    }

    /// Builder: set the family id.
    pub fn family(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    /// Builder: set an integer parameter.
    pub fn param(mut self, key: ParamKey, code: i32) -> Self {
        self.params.insert(key, code);
        self
    }

    /// Builder: set a floating point value.
    pub fn value(mut self, key: ValueKey, value: f64) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Builder: set an integer list.
    pub fn array(mut self, key: ArrayKey, items: impl IntoIterator<Item = i32>) -> Self {
        self.arrays.insert(key, items.into_iter().collect());
        self
    }

    /// Builder: set a text value.
    pub fn text(mut self, key: TextKey, text: impl Into<String>) -> Self {
        self.texts.insert(key, text.into());
        self
    }
}

// ============================================================================
// Field Keys
// ============================================================================

/// Named integer slots of an effect record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ParamKey {
    /// `0` disables the effect; absence means enabled.
    Enabled,
    Stat,
    BaseStat,
    SourceStat,
    TargetStat,
    DamageType,
    /// Preferred spelling of the status discriminator.
    StatusType,
    /// Legacy spelling of `statusType`.
    Status,
    /// Preferred spelling of the equipment discriminator.
    EquipmentType,
    /// Legacy spelling of `equipmentType`.
    EquipmentCategory,
    Race,
    School,
    SpellId,
    Tier,
    SpecialAttackId,
    Trigger,
    Action,
    Target,
    ChanceStat,
    Count,
    Charges,
    InitialBonus,
    MaxBonus,
    ChargesPerTurn,
    TriggerTurn,
    Turn,
    Duration,
    Profile,
    HpScale,
    MinLevel,
    MaxTriggers,
    EveryTurns,
    Interval,
    PassiveKind,
    Instant,
    RemovePenalties,
    RememberSkills,
    DungeonId,
}

impl ParamKey {
    /// Content-schema name of this key.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Named floating point slots of an effect record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ValueKey {
    Value,
    ValuePercent,
    Multiplier,
    Points,
    Cap,
    Delta,
    ValuePerUnit,
    ChancePercent,
    ChanceCoefficient,
    MaxDodge,
    MinHitScale,
    Weight,
    HpPercent,
    BonusPercent,
    CapPercent,
    ValuePercentPerLevel,
    ValuePercentPerTurn,
    MaxPercent,
}

impl ValueKey {
    /// Content-schema name of this key.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Named integer-list slots of an effect record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ArrayKey {
    SpellIds,
    RaceIds,
    StatusIds,
}

impl ArrayKey {
    /// Content-schema name of this key.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Named text slots of an effect record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum TextKey {
    DungeonName,
}

impl TextKey {
    /// Content-schema name of this key.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
