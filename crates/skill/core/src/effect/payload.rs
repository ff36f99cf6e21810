//! Decoded effect payloads.
//!
//! [`decode`] is total: it only pairs an effect record with the id of the
//! skill that owns it. All typing happens in the accessors, which report a
//! [`ConfigError`] pointing at the exact record and field when content is
//! malformed. A payload borrows its effect, so it cannot be cached beyond
//! the aggregation call that produced it.

use crate::catalog::{
    ActorStats, ArrayKey, BaseStat, CodeTable, Effect, EquipmentCategory, ParamKey, SkillId,
    TextKey, ValueKey,
};
use crate::config::EngineConfig;
use crate::error::{ConfigError, ConfigErrorKind};

use super::key::ModifierKey;
use super::kind::EffectType;

/// Largest free identifier (status, spell, race, dungeon ids);
/// `0xFFFF` is reserved for "all variants".
const MAX_FREE_ID: i32 = ModifierKey::ALL_VARIANTS as i32 - 1;

/// Typed, read-only view of one effect record.
#[derive(Clone, Copy, Debug)]
pub struct Payload<'a> {
    skill_id: SkillId,
    effect: &'a Effect,
}

/// Decodes one effect record. Never fails.
pub fn decode(effect: &Effect, skill_id: SkillId) -> Payload<'_> {
    Payload { skill_id, effect }
}

impl<'a> Payload<'a> {
    pub fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    pub fn effect_index(&self) -> u16 {
        self.effect.index
    }

    pub fn effect_type(&self) -> EffectType {
        self.effect.kind
    }

    pub fn family_id(&self) -> Option<&'a str> {
        self.effect.family_id.as_deref()
    }

    /// Explicit `enabled: 0` disables the effect; absence means enabled.
    pub fn is_enabled(&self) -> bool {
        self.param(ParamKey::Enabled) != Some(0)
    }

    /// Identity of a triggered or timed ability.
    ///
    /// The family id when present, so re-aggregation keeps the same identity;
    /// otherwise `"{skillId}#{effectIndex}"`, which never collides between two
    /// instances of the same ability.
    pub fn identity(&self) -> String {
        match self.family_id() {
            Some(family) => family.to_owned(),
            None => format!("{}#{}", self.skill_id, self.effect.index),
        }
    }

    // ========================================================================
    // Raw Access
    // ========================================================================

    pub fn param(&self, key: ParamKey) -> Option<i32> {
        self.effect.params.get(&key).copied()
    }

    pub fn value(&self, key: ValueKey) -> Option<f64> {
        self.effect.values.get(&key).copied()
    }

    pub fn array(&self, key: ArrayKey) -> Option<&'a [i32]> {
        self.effect.arrays.get(&key).map(Vec::as_slice)
    }

    pub fn text(&self, key: TextKey) -> Option<&'a str> {
        self.effect.texts.get(&key).map(String::as_str)
    }

    /// Status discriminator, preferring `statusType` over legacy `status`.
    pub fn status_param(&self) -> Option<(ParamKey, i32)> {
        self.first_param(&[ParamKey::StatusType, ParamKey::Status])
    }

    /// Equipment discriminator, preferring `equipmentType` over legacy
    /// `equipmentCategory`.
    pub fn equipment_param(&self) -> Option<(ParamKey, i32)> {
        self.first_param(&[ParamKey::EquipmentType, ParamKey::EquipmentCategory])
    }

    fn first_param(&self, keys: &[ParamKey]) -> Option<(ParamKey, i32)> {
        keys.iter()
            .find_map(|key| self.param(*key).map(|code| (*key, code)))
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Builds a configuration error for this record.
    pub fn error(&self, field: &'static str, kind: ConfigErrorKind) -> ConfigError {
        ConfigError {
            skill_id: self.skill_id,
            effect_index: self.effect.index,
            effect_type: self.effect.kind,
            field,
            kind,
        }
    }

    pub fn missing(&self, field: &'static str) -> ConfigError {
        self.error(field, ConfigErrorKind::MissingField)
    }

    pub fn invalid(&self, field: &'static str, code: i64) -> ConfigError {
        self.error(field, ConfigErrorKind::InvalidCode(code))
    }

    // ========================================================================
    // Typed Access
    // ========================================================================

    pub fn require_param(&self, key: ParamKey) -> Result<i32, ConfigError> {
        self.param(key).ok_or_else(|| self.missing(key.name()))
    }

    pub fn require_value(&self, key: ValueKey) -> Result<f64, ConfigError> {
        self.value(key).ok_or_else(|| self.missing(key.name()))
    }

    pub fn value_or(&self, key: ValueKey, default: f64) -> f64 {
        self.value(key).unwrap_or(default)
    }

    /// Integer flag: any non-zero value is true.
    pub fn flag(&self, key: ParamKey, default: bool) -> bool {
        self.param(key).map_or(default, |v| v != 0)
    }

    /// Required non-negative count.
    pub fn count(&self, key: ParamKey) -> Result<u32, ConfigError> {
        let raw = self.require_param(key)?;
        u32::try_from(raw).map_err(|_| self.invalid(key.name(), raw.into()))
    }

    /// Optional non-negative count.
    pub fn optional_count(&self, key: ParamKey) -> Result<Option<u32>, ConfigError> {
        match self.param(key) {
            Some(raw) => u32::try_from(raw)
                .map(Some)
                .map_err(|_| self.invalid(key.name(), raw.into())),
            None => Ok(None),
        }
    }

    /// Required discriminator from a closed code table.
    pub fn code<T: CodeTable>(&self, key: ParamKey) -> Result<T, ConfigError> {
        let raw = self.require_param(key)?;
        self.lookup(key.name(), raw)
    }

    /// Optional discriminator from a closed code table.
    pub fn optional_code<T: CodeTable>(&self, key: ParamKey) -> Result<Option<T>, ConfigError> {
        self.param(key)
            .map(|raw| self.lookup(key.name(), raw))
            .transpose()
    }

    fn lookup<T: CodeTable>(&self, field: &'static str, raw: i32) -> Result<T, ConfigError> {
        T::from_code(raw).ok_or_else(|| self.invalid(field, raw.into()))
    }

    /// Optional discriminator packed as a key parameter; absent means
    /// [`ModifierKey::ALL_VARIANTS`].
    pub fn code_param<T: CodeTable>(&self, key: ParamKey) -> Result<u16, ConfigError> {
        Ok(self
            .optional_code::<T>(key)?
            .map_or(ModifierKey::ALL_VARIANTS, T::code))
    }

    /// Required free identifier (spell, race, special attack, dungeon).
    pub fn id(&self, key: ParamKey) -> Result<u16, ConfigError> {
        let raw = self.require_param(key)?;
        self.free_id(key.name(), raw)
    }

    /// Optional free identifier.
    pub fn optional_id(&self, key: ParamKey) -> Result<Option<u16>, ConfigError> {
        self.param(key)
            .map(|raw| self.free_id(key.name(), raw))
            .transpose()
    }

    fn free_id(&self, field: &'static str, raw: i32) -> Result<u16, ConfigError> {
        if (0..=MAX_FREE_ID).contains(&raw) {
            Ok(raw as u16)
        } else {
            Err(self.invalid(field, raw.into()))
        }
    }

    /// Ids from a single-id parameter and/or a list; at least one required.
    pub fn ids(&self, single: ParamKey, list: ArrayKey) -> Result<Vec<u16>, ConfigError> {
        let mut ids = Vec::new();
        if let Some(raw) = self.param(single) {
            ids.push(self.free_id(single.name(), raw)?);
        }
        ids.extend(self.id_list(list)?);
        if ids.is_empty() {
            return Err(self.missing(single.name()));
        }
        Ok(ids)
    }

    /// Free identifiers of an id list; absent means empty.
    pub fn id_list(&self, list: ArrayKey) -> Result<Vec<u16>, ConfigError> {
        self.array(list)
            .unwrap_or_default()
            .iter()
            .map(|raw| self.free_id(list.name(), *raw))
            .collect()
    }

    /// Optional spell tier, `1..=MAX_SPELL_TIER`.
    pub fn optional_tier(&self) -> Result<Option<u8>, ConfigError> {
        let Some(raw) = self.param(ParamKey::Tier) else {
            return Ok(None);
        };
        u8::try_from(raw)
            .ok()
            .filter(|tier| (1..=EngineConfig::MAX_SPELL_TIER).contains(tier))
            .map(Some)
            .ok_or_else(|| self.invalid(ParamKey::Tier.name(), raw.into()))
    }

    /// Status id, reading both spellings; absent means all statuses.
    pub fn status_id(&self) -> Result<Option<u16>, ConfigError> {
        self.status_param()
            .map(|(key, raw)| self.free_id(key.name(), raw))
            .transpose()
    }

    /// Required equipment category, reading both spellings.
    pub fn equipment_category(&self) -> Result<EquipmentCategory, ConfigError> {
        let (key, raw) = self
            .equipment_param()
            .ok_or_else(|| self.missing(ParamKey::EquipmentType.name()))?;
        self.lookup(key.name(), raw)
    }

    // ========================================================================
    // Chances
    // ========================================================================

    /// Resolves a chance in percent.
    ///
    /// A flat `chancePercent` wins; otherwise `chanceCoefficient` scales the
    /// actor stat named by `chanceStat`. Returns `None` when neither is set.
    pub fn chance(&self, stats: Option<&ActorStats>) -> Result<Option<f64>, ConfigError> {
        if let Some(flat) = self.value(ValueKey::ChancePercent) {
            return Ok(Some(flat));
        }
        let Some(coefficient) = self.value(ValueKey::ChanceCoefficient) else {
            return Ok(None);
        };
        let stat: BaseStat = self.code(ParamKey::ChanceStat)?;
        let stats = stats.ok_or_else(|| {
            self.error(
                ValueKey::ChanceCoefficient.name(),
                ConfigErrorKind::ActorStatsRequired,
            )
        })?;
        Ok(Some(coefficient * f64::from(stats.get(stat))))
    }

    /// Like [`Payload::chance`], but a missing chance is an error.
    pub fn require_chance(&self, stats: Option<&ActorStats>) -> Result<f64, ConfigError> {
        self.chance(stats)?
            .ok_or_else(|| self.missing(ValueKey::ChancePercent.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect() -> Effect {
        Effect::new(EffectType::StatusResistancePercent).at(2)
    }

    #[test]
    fn identity_prefers_family_id() {
        let plain = effect();
        assert_eq!(decode(&plain, 17).identity(), "17#2");

        let family = effect().family("counter.basic");
        assert_eq!(decode(&family, 17).identity(), "counter.basic");
    }

    #[test]
    fn enabled_gate_only_disables_on_explicit_zero() {
        assert!(decode(&effect(), 1).is_enabled());
        assert!(decode(&effect().param(ParamKey::Enabled, 1), 1).is_enabled());
        assert!(!decode(&effect().param(ParamKey::Enabled, 0), 1).is_enabled());
    }

    #[test]
    fn status_reads_both_spellings_preferring_status_type() {
        let legacy = effect().param(ParamKey::Status, 4);
        assert_eq!(decode(&legacy, 1).status_id(), Ok(Some(4)));

        let both = effect()
            .param(ParamKey::Status, 4)
            .param(ParamKey::StatusType, 9);
        assert_eq!(decode(&both, 1).status_id(), Ok(Some(9)));

        assert_eq!(decode(&effect(), 1).status_id(), Ok(None));
    }

    #[test]
    fn equipment_reads_both_spellings() {
        let legacy = Effect::new(EffectType::EquipmentStatMultiplier)
            .param(ParamKey::EquipmentCategory, 1);
        assert_eq!(
            decode(&legacy, 1).equipment_category(),
            Ok(EquipmentCategory::Katana)
        );

        let missing = Effect::new(EffectType::EquipmentStatMultiplier);
        let err = decode(&missing, 1).equipment_category().unwrap_err();
        assert_eq!(err.field, "equipmentType");
    }

    #[test]
    fn invalid_codes_name_the_field() {
        let bad = Effect::new(EffectType::DamageDealtPercent).param(ParamKey::DamageType, 7);
        let err = decode(&bad, 3)
            .code_param::<crate::catalog::DamageType>(ParamKey::DamageType)
            .unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidCode(7));
        assert_eq!(err.field, "damageType");
    }

    #[test]
    fn flat_chance_wins_over_scaled() {
        let both = Effect::new(EffectType::StatusInflict)
            .value(ValueKey::ChancePercent, 12.0)
            .value(ValueKey::ChanceCoefficient, 2.0)
            .param(ParamKey::ChanceStat, BaseStat::Luck as i32);
        assert_eq!(decode(&both, 1).chance(None), Ok(Some(12.0)));
    }

    #[test]
    fn scaled_chance_uses_actor_stat() {
        let scaled = Effect::new(EffectType::StatusInflict)
            .value(ValueKey::ChanceCoefficient, 0.5)
            .param(ParamKey::ChanceStat, BaseStat::Luck as i32);
        let stats = ActorStats::new(10, 10, 10, 10, 10, 30);
        assert_eq!(decode(&scaled, 1).chance(Some(&stats)), Ok(Some(15.0)));

        let err = decode(&scaled, 1).chance(None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::ActorStatsRequired);
    }

    #[test]
    fn ids_merge_single_and_list() {
        let both = Effect::new(EffectType::SpellLearn)
            .param(ParamKey::SpellId, 3)
            .array(ArrayKey::SpellIds, [4, 5]);
        assert_eq!(decode(&both, 1).ids(ParamKey::SpellId, ArrayKey::SpellIds), Ok(vec![3, 4, 5]));

        let reserved = Effect::new(EffectType::SpellLearn).param(ParamKey::SpellId, 0xFFFF);
        assert!(decode(&reserved, 1).ids(ParamKey::SpellId, ArrayKey::SpellIds).is_err());
    }
}
