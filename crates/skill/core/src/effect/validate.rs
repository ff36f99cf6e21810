//! Per-effect-type required-field table and discriminator range checks.
//!
//! Validation runs before the `enabled` gate, so a disabled effect still
//! has to be well-formed. Every discriminator or id parameter that is
//! present is range-checked here, whatever the effect type; handlers read
//! the same fields again through the typed accessors.

use strum::IntoEnumIterator;

use crate::catalog::{
    ArrayKey, BaseStat, CombatStat, DamageType, EquipmentCategory, HpScale, ParamKey,
    ReactionAction, ReactionTarget, ReactionTrigger, ResurrectionPassiveKind, SpellSchool,
    ValueKey,
};
use crate::error::ConfigError;

use super::kind::EffectType;
use super::payload::Payload;

/// One presence requirement on an effect record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Param(ParamKey),
    Value(ValueKey),
    /// At least one of the listed parameters.
    AnyParam(&'static [ParamKey]),
    /// At least one of the listed values.
    AnyValue(&'static [ValueKey]),
    /// A single id parameter or a non-empty id list.
    ParamOrArray(ParamKey, ArrayKey),
    /// `statusType` or its legacy spelling `status`.
    Status,
    /// `equipmentType` or its legacy spelling `equipmentCategory`.
    Equipment,
    /// A flat `chancePercent` or a stat-scaled `chanceCoefficient`.
    Chance,
}

impl Requirement {
    fn is_met(&self, payload: &Payload<'_>) -> bool {
        match *self {
            Self::Param(key) => payload.param(key).is_some(),
            Self::Value(key) => payload.value(key).is_some(),
            Self::AnyParam(keys) => keys.iter().any(|key| payload.param(*key).is_some()),
            Self::AnyValue(keys) => keys.iter().any(|key| payload.value(*key).is_some()),
            Self::ParamOrArray(single, list) => {
                payload.param(single).is_some()
                    || payload.array(list).is_some_and(|items| !items.is_empty())
            }
            Self::Status => payload.status_param().is_some(),
            Self::Equipment => payload.equipment_param().is_some(),
            Self::Chance => {
                payload.value(ValueKey::ChancePercent).is_some()
                    || payload.value(ValueKey::ChanceCoefficient).is_some()
            }
        }
    }

    /// Field named in the error when the requirement fails.
    pub fn field(&self) -> &'static str {
        match *self {
            Self::Param(key) => key.name(),
            Self::Value(key) => key.name(),
            Self::AnyParam(keys) => keys.first().map_or("", |key| key.name()),
            Self::AnyValue(keys) => keys.first().map_or("", |key| key.name()),
            Self::ParamOrArray(single, _) => single.name(),
            Self::Status => ParamKey::StatusType.name(),
            Self::Equipment => ParamKey::EquipmentType.name(),
            Self::Chance => ValueKey::ChancePercent.name(),
        }
    }
}

/// Checks every required field of `payload`'s effect type, then the range
/// of every discriminator and id it carries.
pub fn validate(payload: &Payload<'_>) -> Result<(), ConfigError> {
    for requirement in requirements(payload.effect_type()) {
        if !requirement.is_met(payload) {
            return Err(payload.missing(requirement.field()));
        }
    }
    for key in ParamKey::iter() {
        check_code(payload, key)?;
    }
    for list in ArrayKey::iter() {
        payload.id_list(list)?;
    }
    Ok(())
}

/// Range check for one parameter; absent parameters pass.
fn check_code(payload: &Payload<'_>, key: ParamKey) -> Result<(), ConfigError> {
    match key {
        ParamKey::Stat | ParamKey::SourceStat | ParamKey::TargetStat => {
            payload.optional_code::<CombatStat>(key).map(drop)
        }
        ParamKey::BaseStat | ParamKey::ChanceStat => {
            payload.optional_code::<BaseStat>(key).map(drop)
        }
        ParamKey::DamageType => payload.optional_code::<DamageType>(key).map(drop),
        ParamKey::EquipmentType | ParamKey::EquipmentCategory => {
            payload.optional_code::<EquipmentCategory>(key).map(drop)
        }
        ParamKey::School => payload.optional_code::<SpellSchool>(key).map(drop),
        ParamKey::Trigger => payload.optional_code::<ReactionTrigger>(key).map(drop),
        ParamKey::Action => payload.optional_code::<ReactionAction>(key).map(drop),
        ParamKey::Target => payload.optional_code::<ReactionTarget>(key).map(drop),
        ParamKey::Profile => payload.optional_code::<crate::catalog::RowProfile>(key).map(drop),
        ParamKey::HpScale => payload.optional_code::<HpScale>(key).map(drop),
        ParamKey::PassiveKind => payload.optional_code::<ResurrectionPassiveKind>(key).map(drop),
        ParamKey::StatusType
        | ParamKey::Status
        | ParamKey::Race
        | ParamKey::SpellId
        | ParamKey::SpecialAttackId
        | ParamKey::DungeonId => payload.optional_id(key).map(drop),
        ParamKey::Tier => payload.optional_tier().map(drop),
        _ => Ok(()),
    }
}

/// Required fields per effect type.
pub fn requirements(kind: EffectType) -> &'static [Requirement] {
    use EffectType::*;
    use Requirement::{Chance, Equipment, Param, ParamOrArray, Status, Value};

    const MULTIPLIER: &[Requirement] = &[Value(ValueKey::Multiplier)];
    const PERCENT: &[Requirement] = &[Value(ValueKey::ValuePercent)];
    const STAT_MULTIPLIER: &[Requirement] =
        &[Param(ParamKey::Stat), Value(ValueKey::Multiplier)];
    const CHANCE: &[Requirement] = &[Chance];
    const NONE: &[Requirement] = &[];

    match kind {
        // Combat stats
        StatAdditive => &[Param(ParamKey::Stat), Value(ValueKey::Value)],
        StatPercent => &[Param(ParamKey::Stat), Value(ValueKey::ValuePercent)],
        StatMultiplier | StatTalent | StatIncompetence | ItemStatMultiplier => STAT_MULTIPLIER,
        BaseStatMultiplier => &[Param(ParamKey::BaseStat), Value(ValueKey::Multiplier)],
        CriticalRateAdditive => &[Value(ValueKey::Points)],
        CriticalRateMax => &[Value(ValueKey::Cap)],
        CriticalRateMaxDelta => &[Value(ValueKey::Delta)],
        MartialBonusPercent => PERCENT,
        MartialBonusMultiplier | GrowthMultiplier => MULTIPLIER,
        StatConversionPercent => &[
            Param(ParamKey::SourceStat),
            Param(ParamKey::TargetStat),
            Value(ValueKey::ValuePercent),
        ],
        StatConversionLinear => &[
            Param(ParamKey::SourceStat),
            Param(ParamKey::TargetStat),
            Value(ValueKey::ValuePerUnit),
        ],
        StatFixedToOne => &[Param(ParamKey::Stat)],
        EquipmentStatMultiplier => &[Equipment, Value(ValueKey::Multiplier)],

        // Damage
        DamageDealtPercent | DamageTakenPercent | CriticalDamagePercent | Absorption
        | HealingDealtPercent | PhysicalPenetration => PERCENT,
        DamageDealtMultiplier | DamageTakenMultiplier | CriticalDamageMultiplier
        | CriticalDamageTakenMultiplier | AdditionalDamageScoreMultiplier
        | HealingReceivedMultiplier => MULTIPLIER,
        DamageDealtAgainstRace | DamageTakenFromRace => &[
            ParamOrArray(ParamKey::Race, ArrayKey::RaceIds),
            Value(ValueKey::Multiplier),
        ],
        AdditionalDamageScoreAdditive => &[Value(ValueKey::Value)],
        MinHitScale => &[Value(ValueKey::MinHitScale)],
        DodgeCap => &[Value(ValueKey::MaxDodge)],
        MagicNullifyChance => CHANCE,
        LevelComparisonDamage => &[Value(ValueKey::ValuePercentPerLevel)],

        // Spells
        SpellPowerPercent | SpellCriticalPercent => PERCENT,
        SpellPowerMultiplier | SpellCriticalMultiplier => MULTIPLIER,
        SpellSpecificMultiplier | SpellSpecificTakenMultiplier | TacticSpellAmplify => {
            &[Param(ParamKey::SpellId), Value(ValueKey::Multiplier)]
        }
        SpellChargeModifier => &[Requirement::AnyParam(&[
            ParamKey::InitialBonus,
            ParamKey::MaxBonus,
        ])],
        SpellChargeRecovery => &[Param(ParamKey::ChargesPerTurn)],

        // Combat behavior
        ExtraAction => &[Param(ParamKey::Count)],
        Reaction => &[Param(ParamKey::Trigger), Chance],
        ProcRate => PERCENT,
        ProcMultiplier | ActionOrderMultiplier | CounterEvasionMultiplier => MULTIPLIER,
        ActionOrderShuffle | Parry | ShieldBlock | FirstStrike => NONE,
        Barrier | BarrierOnGuard => &[Param(ParamKey::Charges)],
        SpecialAttack => &[Param(ParamKey::SpecialAttackId), Chance],
        EnemyActionDebuffChance | EnemySingleActionSkipChance => CHANCE,
        TimedBuffTrigger => &[
            Param(ParamKey::TriggerTurn),
            Requirement::AnyValue(&[ValueKey::ValuePercent, ValueKey::Multiplier]),
        ],
        TimedBuffPerTurn => &[Value(ValueKey::ValuePercentPerTurn)],

        // Resurrection
        ResurrectionRescue | ResurrectionActive => CHANCE,
        ResurrectionForced | ResurrectionVitalize => NONE,
        ResurrectionSummon => &[Param(ParamKey::EveryTurns)],
        ResurrectionPassive => &[Param(ParamKey::PassiveKind)],
        ResurrectionSacrifice => &[Param(ParamKey::Interval)],

        // Status
        StatusResistancePercent => PERCENT,
        StatusResistanceMultiplier | StatusInflictMultiplier => MULTIPLIER,
        StatusInflict => &[Status, Chance],
        Berserk => CHANCE,
        AutoStatusCure => NONE,
        StatusImmunity => &[Status],

        // Misc battle
        RowProfile => &[Param(ParamKey::Profile)],
        TargetingWeight => &[Value(ValueKey::Weight)],
        CoverRowsBehind | PartyHostility | PartyProtection | AntiHealing => NONE,
        DegradationRepair | EndOfTurnHealing | EndOfTurnSelfDamage => PERCENT,
        FleeThreshold => &[Value(ValueKey::HpPercent)],
        RetreatAtTurn => &[Param(ParamKey::Turn)],

        // Rewards
        ExperienceBonus | GoldBonus | ItemDropBonus | TitleBonus => PERCENT,
        ExperienceMultiplier | GoldMultiplier | ItemDropMultiplier | TitleMultiplier => {
            MULTIPLIER
        }

        // Exploration
        ExplorationTimeMultiplier => MULTIPLIER,
        ExplorationTimePercent => PERCENT,

        // Equipment slots
        EquipmentSlotAdditive => &[Param(ParamKey::Count)],
        EquipmentSlotMultiplier => MULTIPLIER,
        EquipmentSlotHalving => NONE,

        // Spellbook
        SpellLearn | SpellForget => &[ParamOrArray(ParamKey::SpellId, ArrayKey::SpellIds)],
        SpellTierUnlock => &[Param(ParamKey::School), Param(ParamKey::Tier)],

        // Passthrough
        BattleCry | SkillTag | StatusVisual => NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Effect;
    use crate::effect::payload::decode;
    use crate::error::ConfigErrorKind;

    #[test]
    fn status_inflict_requires_chance() {
        let effect = Effect::new(EffectType::StatusInflict)
            .at(4)
            .param(ParamKey::StatusType, 2);
        let err = validate(&decode(&effect, 55)).unwrap_err();

        assert_eq!(err.skill_id, 55);
        assert_eq!(err.effect_index, 4);
        assert_eq!(err.field, "chancePercent");
        assert_eq!(err.kind, ConfigErrorKind::MissingField);
    }

    #[test]
    fn either_chance_form_satisfies_requirement() {
        let scaled = Effect::new(EffectType::Berserk).value(ValueKey::ChanceCoefficient, 0.2);
        assert!(validate(&decode(&scaled, 1)).is_ok());

        let flat = Effect::new(EffectType::Berserk).value(ValueKey::ChancePercent, 5.0);
        assert!(validate(&decode(&flat, 1)).is_ok());
    }

    #[test]
    fn legacy_status_spelling_satisfies_requirement() {
        let effect = Effect::new(EffectType::StatusImmunity).param(ParamKey::Status, 3);
        assert!(validate(&decode(&effect, 1)).is_ok());
    }

    #[test]
    fn any_of_requirement_accepts_either_field() {
        let initial = Effect::new(EffectType::SpellChargeModifier).param(ParamKey::InitialBonus, 1);
        let max = Effect::new(EffectType::SpellChargeModifier).param(ParamKey::MaxBonus, 1);
        let neither = Effect::new(EffectType::SpellChargeModifier);

        assert!(validate(&decode(&initial, 1)).is_ok());
        assert!(validate(&decode(&max, 1)).is_ok());
        assert_eq!(
            validate(&decode(&neither, 1)).unwrap_err().field,
            "initialBonus"
        );
    }

    #[test]
    fn out_of_range_codes_fail_even_when_optional() {
        let effect = Effect::new(EffectType::DamageDealtPercent)
            .param(ParamKey::DamageType, 12)
            .value(ValueKey::ValuePercent, 5.0);
        let err = validate(&decode(&effect, 8)).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidCode(12));
        assert_eq!(err.field, "damageType");

        let profile = Effect::new(EffectType::RowProfile).param(ParamKey::Profile, -1);
        assert_eq!(
            validate(&decode(&profile, 8)).unwrap_err().kind,
            ConfigErrorKind::InvalidCode(-1)
        );
    }

    #[test]
    fn reserved_ids_in_lists_are_rejected() {
        let effect = Effect::new(EffectType::DamageDealtAgainstRace)
            .array(ArrayKey::RaceIds, [3, 0xFFFF])
            .value(ValueKey::Multiplier, 1.2);
        let err = validate(&decode(&effect, 8)).unwrap_err();
        assert_eq!(err.field, "raceIds");
        assert_eq!(err.kind, ConfigErrorKind::InvalidCode(0xFFFF));
    }

    #[test]
    fn tier_range_is_checked() {
        let effect = Effect::new(EffectType::SpellTierUnlock)
            .param(ParamKey::School, SpellSchool::Priest as i32)
            .param(ParamKey::Tier, 9);
        assert_eq!(validate(&decode(&effect, 8)).unwrap_err().field, "tier");
    }

    #[test]
    fn empty_id_list_does_not_count() {
        let effect = Effect::new(EffectType::SpellLearn).array(ArrayKey::SpellIds, []);
        assert_eq!(validate(&decode(&effect, 1)).unwrap_err().field, "spellId");
    }
}
