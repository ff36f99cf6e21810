//! Discriminator code tables.
//!
//! Content stores discriminators (which stat, which damage type, ...) as
//! integer codes. Each table below is closed: a code outside it is an
//! authoring defect, reported as an invalid-code configuration error.
//! Codes are append-only; never renumber an existing variant.

/// A closed table of integer codes.
pub trait CodeTable: Sized + Copy {
    /// Looks up the variant for `code`, if it is in range.
    fn from_code(code: i32) -> Option<Self>;

    /// Returns the stable code of this variant.
    fn code(self) -> u16;
}

macro_rules! code_table {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CodeTable for $ty {
                fn from_code(code: i32) -> Option<Self> {
                    u8::try_from(code).ok().and_then(Self::from_repr)
                }

                fn code(self) -> u16 {
                    self as u16
                }
            }
        )*
    };
}

code_table!(
    CombatStat,
    BaseStat,
    DamageType,
    SpellSchool,
    EquipmentCategory,
    RowProfile,
    HpScale,
    ReactionTrigger,
    ReactionAction,
    ReactionTarget,
    ResurrectionPassiveKind,
);

// ============================================================================
// Stats
// ============================================================================

/// Derived combat stats computed by the character stat calculator.
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
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum CombatStat {
    MaxHp,
    PhysicalAttack,
    MagicalAttack,
    MagicalHealing,
    PhysicalDefense,
    MagicalDefense,
    HitRate,
    EvasionRate,
    CriticalRate,
    AttackCount,
    AdditionalDamage,
    BreathDamage,
}

/// The six core character stats.
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
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum BaseStat {
    Strength,
    Wisdom,
    Spirit,
    Vitality,
    Agility,
    Luck,
}

// ============================================================================
// Combat Discriminators
// ============================================================================

/// Damage channels the battle simulator distinguishes.
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
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum DamageType {
    Physical,
    Magical,
    Breath,
}

/// Spell schools with independent tier progression.
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
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum SpellSchool {
    Mage,
    Priest,
}

/// Equipment categories that item multipliers can target.
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
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum EquipmentCategory {
    Sword,
    Katana,
    Bow,
    Wand,
    Rod,
    Grimoire,
    Gem,
    Gauntlet,
    Shield,
    Robe,
    Armor,
    Accessory,
}

/// Formation row preference used by targeting.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum RowProfile {
    #[default]
    Balanced,
    Melee,
    Ranged,
    Mixed,
}

/// Hit points a resurrected actor returns with.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum HpScale {
    /// Scaled by the reviver's magical healing score.
    #[default]
    MagicalHealingScore,
    /// A fixed share of maximum hit points.
    MaxHpPercent,
    /// Full hit points.
    Full,
}

/// Battle events that fire a triggered reaction.
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
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum ReactionTrigger {
    AllyDefeated,
    SelfDamagedPhysical,
    SelfDamagedMagical,
    SelfEvadedPhysical,
    AllyDamagedPhysical,
    SelfAttackNoKill,
    SelfKilledEnemy,
    SelfCastSpell,
}

/// What a triggered reaction does.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum ReactionAction {
    #[default]
    PhysicalAttack,
    MagicalAttack,
    BreathAttack,
    Heal,
}

/// Who a triggered reaction targets.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum ReactionTarget {
    #[default]
    Attacker,
    RandomEnemy,
    Killer,
    WeakestAlly,
}

/// When a passive resurrection fires outside battle.
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
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum ResurrectionPassiveKind {
    BetweenFloors,
    AfterBattle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn codes_round_trip() {
        for stat in CombatStat::iter() {
            assert_eq!(CombatStat::from_code(stat.code() as i32), Some(stat));
        }
        assert_eq!(CombatStat::COUNT, 12);
        assert_eq!(DamageType::from_code(2), Some(DamageType::Breath));
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert_eq!(DamageType::from_code(3), None);
        assert_eq!(DamageType::from_code(-1), None);
        assert_eq!(BaseStat::from_code(300), None);
    }
}
