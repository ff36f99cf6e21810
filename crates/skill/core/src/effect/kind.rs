//! The closed catalog of effect types.
//!
//! Every effect record names exactly one [`EffectType`]. The variant's ordinal
//! is its stable code: it indexes the registry's dense tables and occupies the
//! top byte of a [`super::ModifierKey`]. New variants are appended to the end
//! of their family block and existing ones are never reordered.

use strum::EnumCount;

/// Broad grouping of effect types, mirroring the result bundle layout.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectFamily {
    Stat,
    Damage,
    Spell,
    Combat,
    Resurrection,
    Status,
    Misc,
    Reward,
    Exploration,
    Equipment,
    Spellbook,
    /// Recognised but interpreted outside this engine (presentation, tagging).
    Passthrough,
}

/// Every effect kind the content schema can express.
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
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
#[repr(u8)]
pub enum EffectType {
    // ========================================================================
    // Combat Stats
    // ========================================================================
    StatAdditive,
    StatPercent,
    StatMultiplier,
    StatTalent,
    StatIncompetence,
    BaseStatMultiplier,
    CriticalRateAdditive,
    CriticalRateMax,
    CriticalRateMaxDelta,
    MartialBonusPercent,
    MartialBonusMultiplier,
    GrowthMultiplier,
    StatConversionPercent,
    StatConversionLinear,
    StatFixedToOne,
    EquipmentStatMultiplier,
    ItemStatMultiplier,

    // ========================================================================
    // Damage
    // ========================================================================
    DamageDealtPercent,
    DamageDealtMultiplier,
    DamageTakenPercent,
    DamageTakenMultiplier,
    DamageDealtAgainstRace,
    DamageTakenFromRace,
    CriticalDamagePercent,
    CriticalDamageMultiplier,
    CriticalDamageTakenMultiplier,
    AdditionalDamageScoreAdditive,
    AdditionalDamageScoreMultiplier,
    MinHitScale,
    DodgeCap,
    MagicNullifyChance,
    LevelComparisonDamage,
    Absorption,
    HealingDealtPercent,
    HealingReceivedMultiplier,
    PhysicalPenetration,

    // ========================================================================
    // Spells
    // ========================================================================
    SpellPowerPercent,
    SpellPowerMultiplier,
    SpellSpecificMultiplier,
    SpellSpecificTakenMultiplier,
    SpellChargeModifier,
    SpellChargeRecovery,
    SpellCriticalPercent,
    SpellCriticalMultiplier,
    TacticSpellAmplify,

    // ========================================================================
    // Combat Behavior
    // ========================================================================
    ExtraAction,
    Reaction,
    ProcRate,
    ProcMultiplier,
    ActionOrderShuffle,
    ActionOrderMultiplier,
    CounterEvasionMultiplier,
    Parry,
    ShieldBlock,
    Barrier,
    BarrierOnGuard,
    SpecialAttack,
    EnemyActionDebuffChance,
    EnemySingleActionSkipChance,
    TimedBuffTrigger,
    TimedBuffPerTurn,
    FirstStrike,

    // ========================================================================
    // Resurrection
    // ========================================================================
    ResurrectionRescue,
    ResurrectionActive,
    ResurrectionForced,
    ResurrectionVitalize,
    ResurrectionSummon,
    ResurrectionPassive,
    ResurrectionSacrifice,

    // ========================================================================
    // Status
    // ========================================================================
    StatusResistancePercent,
    StatusResistanceMultiplier,
    StatusInflict,
    StatusInflictMultiplier,
    Berserk,
    AutoStatusCure,
    StatusImmunity,

    // ========================================================================
    // Misc Battle
    // ========================================================================
    RowProfile,
    TargetingWeight,
    CoverRowsBehind,
    PartyHostility,
    PartyProtection,
    DegradationRepair,
    FleeThreshold,
    RetreatAtTurn,
    EndOfTurnHealing,
    EndOfTurnSelfDamage,
    AntiHealing,

    // ========================================================================
    // Rewards
    // ========================================================================
    ExperienceBonus,
    ExperienceMultiplier,
    GoldBonus,
    GoldMultiplier,
    ItemDropBonus,
    ItemDropMultiplier,
    TitleBonus,
    TitleMultiplier,

    // ========================================================================
    // Exploration
    // ========================================================================
    ExplorationTimeMultiplier,
    ExplorationTimePercent,

    // ========================================================================
    // Equipment Slots
    // ========================================================================
    EquipmentSlotAdditive,
    EquipmentSlotMultiplier,
    EquipmentSlotHalving,

    // ========================================================================
    // Spellbook
    // ========================================================================
    SpellLearn,
    SpellForget,
    SpellTierUnlock,

    // ========================================================================
    // Passthrough
    // ========================================================================
    BattleCry,
    SkillTag,
    StatusVisual,
}

// The code must fit the top byte of a modifier key.
const _: () = assert!(EffectType::COUNT <= 256);

impl EffectType {
    /// Stable code of this effect type (its ordinal).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up an effect type by code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }

    /// Content-schema name of this effect type.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Family this effect type belongs to.
    pub const fn family(self) -> EffectFamily {
        use EffectType::*;
        match self {
            StatAdditive | StatPercent | StatMultiplier | StatTalent | StatIncompetence
            | BaseStatMultiplier | CriticalRateAdditive | CriticalRateMax
            | CriticalRateMaxDelta | MartialBonusPercent | MartialBonusMultiplier
            | GrowthMultiplier | StatConversionPercent | StatConversionLinear | StatFixedToOne
            | EquipmentStatMultiplier | ItemStatMultiplier => EffectFamily::Stat,

            DamageDealtPercent | DamageDealtMultiplier | DamageTakenPercent
            | DamageTakenMultiplier | DamageDealtAgainstRace | DamageTakenFromRace
            | CriticalDamagePercent | CriticalDamageMultiplier | CriticalDamageTakenMultiplier
            | AdditionalDamageScoreAdditive | AdditionalDamageScoreMultiplier | MinHitScale
            | DodgeCap | MagicNullifyChance | LevelComparisonDamage | Absorption
            | HealingDealtPercent | HealingReceivedMultiplier | PhysicalPenetration => {
                EffectFamily::Damage
            }

            SpellPowerPercent | SpellPowerMultiplier | SpellSpecificMultiplier
            | SpellSpecificTakenMultiplier | SpellChargeModifier | SpellChargeRecovery
            | SpellCriticalPercent | SpellCriticalMultiplier | TacticSpellAmplify => {
                EffectFamily::Spell
            }

            ExtraAction | Reaction | ProcRate | ProcMultiplier | ActionOrderShuffle
            | ActionOrderMultiplier | CounterEvasionMultiplier | Parry | ShieldBlock | Barrier
            | BarrierOnGuard | SpecialAttack | EnemyActionDebuffChance
            | EnemySingleActionSkipChance | TimedBuffTrigger | TimedBuffPerTurn | FirstStrike => {
                EffectFamily::Combat
            }

            ResurrectionRescue | ResurrectionActive | ResurrectionForced
            | ResurrectionVitalize | ResurrectionSummon | ResurrectionPassive
            | ResurrectionSacrifice => EffectFamily::Resurrection,

            StatusResistancePercent | StatusResistanceMultiplier | StatusInflict
            | StatusInflictMultiplier | Berserk | AutoStatusCure | StatusImmunity => {
                EffectFamily::Status
            }

            RowProfile | TargetingWeight | CoverRowsBehind | PartyHostility | PartyProtection
            | DegradationRepair | FleeThreshold | RetreatAtTurn | EndOfTurnHealing
            | EndOfTurnSelfDamage | AntiHealing => EffectFamily::Misc,

            ExperienceBonus | ExperienceMultiplier | GoldBonus | GoldMultiplier
            | ItemDropBonus | ItemDropMultiplier | TitleBonus | TitleMultiplier => {
                EffectFamily::Reward
            }

            ExplorationTimeMultiplier | ExplorationTimePercent => EffectFamily::Exploration,

            EquipmentSlotAdditive | EquipmentSlotMultiplier | EquipmentSlotHalving => {
                EffectFamily::Equipment
            }

            SpellLearn | SpellForget | SpellTierUnlock => EffectFamily::Spellbook,

            BattleCry | SkillTag | StatusVisual => EffectFamily::Passthrough,
        }
    }

    /// Whether the outcome depends on battle context (enemy race, level gap,
    /// turn number, random triggers), so no static value can be shown.
    pub const fn is_conditional(self) -> bool {
        use EffectType::*;
        matches!(
            self,
            DamageDealtAgainstRace
                | DamageTakenFromRace
                | LevelComparisonDamage
                | TimedBuffTrigger
                | TimedBuffPerTurn
                | StatusInflict
                | Berserk
                | FleeThreshold
                | RetreatAtTurn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_are_dense_and_stable() {
        for (ordinal, kind) in EffectType::iter().enumerate() {
            assert_eq!(kind.code() as usize, ordinal);
            assert_eq!(EffectType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(EffectType::StatAdditive.code(), 0);
        assert_eq!(EffectType::from_code(EffectType::COUNT as u8), None);
    }

    #[test]
    fn names_use_content_schema_spelling() {
        assert_eq!(EffectType::DamageDealtPercent.name(), "damageDealtPercent");
        assert_eq!(
            "spellPowerMultiplier".parse::<EffectType>(),
            Ok(EffectType::SpellPowerMultiplier)
        );
    }

    #[test]
    fn families_cover_spellbook_and_rewards() {
        assert_eq!(EffectType::SpellTierUnlock.family(), EffectFamily::Spellbook);
        assert_eq!(EffectType::GoldMultiplier.family(), EffectFamily::Reward);
        assert_eq!(EffectType::Reaction.family(), EffectFamily::Combat);
    }
}
