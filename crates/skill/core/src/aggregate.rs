//! Aggregation service: one pass over a character's skills.
//!
//! Skills are visited in ascending id and effects in ascending index. Each
//! effect is decoded, validated, gated on `enabled`, then folded into every
//! accumulator its routes name. The first configuration error aborts the
//! call and no partial bundle is returned.

use crate::accumulate::{
    Accumulator, BattleEffectAccumulator, BattleEffects, CombatStatAccumulator, CombatStatInputs,
    EquipmentSlotAccumulator, EquipmentSlots, ExplorationAccumulator, ExplorationModifiers,
    RewardAccumulator, RewardComponents, Spellbook, SpellbookAccumulator,
};
use crate::catalog::{ActorStats, SkillDefinition};
use crate::config::EngineConfig;
use crate::effect::{self, Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;
use crate::registry::EffectRegistry;
use crate::summary::ModifierSummary;

/// Per-call switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregationOptions {
    pub include_summary: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for AggregationOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            include_summary: config.include_summary,
        }
    }
}

/// The six category results plus the optional summary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBundle {
    pub combat_stats: CombatStatInputs,
    pub battle_effects: BattleEffects,
    pub rewards: RewardComponents,
    pub exploration: ExplorationModifiers,
    pub equipment_slots: EquipmentSlots,
    pub spellbook: Spellbook,
    pub summary: Option<ModifierSummary>,
}

/// Aggregates skill effects against a borrowed registry.
#[derive(Clone, Copy, Debug)]
pub struct SkillAggregator<'r> {
    registry: &'r EffectRegistry,
    options: AggregationOptions,
}

/// Running state of one aggregation call.
struct Accumulators {
    combat_stats: CombatStatAccumulator,
    battle_effects: BattleEffectAccumulator,
    rewards: RewardAccumulator,
    exploration: ExplorationAccumulator,
    equipment_slots: EquipmentSlotAccumulator,
    spellbook: SpellbookAccumulator,
}

impl Accumulators {
    fn new() -> Self {
        Self {
            combat_stats: CombatStatAccumulator::new(),
            battle_effects: BattleEffectAccumulator::new(),
            rewards: RewardAccumulator::new(),
            exploration: ExplorationAccumulator::new(),
            equipment_slots: EquipmentSlotAccumulator::new(),
            spellbook: SpellbookAccumulator::new(),
        }
    }

    fn route(
        &mut self,
        routes: Routes,
        payload: &Payload<'_>,
        ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        fn feed<A: Accumulator>(
            acc: &mut A,
            routes: Routes,
            payload: &Payload<'_>,
            ctx: &HandlerContext<'_>,
        ) -> Result<(), ConfigError> {
            if routes.contains(A::ROUTE) {
                acc.apply(payload, ctx)?;
            }
            Ok(())
        }

        feed(&mut self.combat_stats, routes, payload, ctx)?;
        feed(&mut self.battle_effects, routes, payload, ctx)?;
        feed(&mut self.rewards, routes, payload, ctx)?;
        feed(&mut self.exploration, routes, payload, ctx)?;
        feed(&mut self.equipment_slots, routes, payload, ctx)?;
        feed(&mut self.spellbook, routes, payload, ctx)
    }
}

impl<'r> SkillAggregator<'r> {
    pub fn new(registry: &'r EffectRegistry, options: AggregationOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> AggregationOptions {
        self.options
    }

    /// Aggregates every effect of `skills` into a [`SkillBundle`].
    ///
    /// `stats` is only needed when an effect scales a chance with an actor
    /// stat; such an effect fails with
    /// [`crate::ConfigErrorKind::ActorStatsRequired`] without it.
    pub fn aggregate(
        &self,
        skills: &[SkillDefinition],
        stats: Option<&ActorStats>,
    ) -> Result<SkillBundle, ConfigError> {
        let mut ordered: Vec<&SkillDefinition> = skills.iter().collect();
        ordered.sort_by_key(|skill| skill.id);

        tracing::debug!(
            skills = ordered.len(),
            with_stats = stats.is_some(),
            "aggregating skill effects"
        );

        let ctx = HandlerContext::new(self.registry, stats);
        let mut accumulators = Accumulators::new();
        let mut applied = 0usize;

        for skill in ordered {
            let mut effects: Vec<_> = skill.effects.iter().collect();
            effects.sort_by_key(|effect| effect.index);

            for effect in effects {
                let payload = effect::decode(effect, skill.id);
                effect::validate(&payload)?;

                if !payload.is_enabled() {
                    tracing::debug!(
                        skill_id = skill.id,
                        effect_index = effect.index,
                        effect_type = %effect.kind,
                        "skipping disabled effect"
                    );
                    continue;
                }

                let routes = self.registry.routes(effect.kind);
                tracing::trace!(
                    skill_id = skill.id,
                    effect_index = effect.index,
                    effect_type = %effect.kind,
                    ?routes,
                    "routing effect"
                );
                accumulators.route(routes, &payload, &ctx)?;
                applied += 1;
            }
        }

        let bundle = self.finish(accumulators);
        tracing::debug!(
            effects = applied,
            summary_entries = bundle.summary.as_ref().map_or(0, ModifierSummary::len),
            "aggregation finished"
        );
        Ok(bundle)
    }

    fn finish(&self, mut accumulators: Accumulators) -> SkillBundle {
        let stat_snapshot = accumulators.combat_stats.take_snapshot();
        let battle_snapshot = accumulators.battle_effects.take_snapshot();

        let mut bundle = SkillBundle {
            combat_stats: accumulators.combat_stats.build(),
            battle_effects: accumulators.battle_effects.build(),
            rewards: accumulators.rewards.build(),
            exploration: accumulators.exploration.build(),
            equipment_slots: accumulators.equipment_slots.build(),
            spellbook: accumulators.spellbook.build(),
            summary: None,
        };

        if self.options.include_summary {
            bundle.summary = Some(ModifierSummary::build(
                self.registry,
                &stat_snapshot,
                &battle_snapshot,
            ));
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Effect, ParamKey, ValueKey};
    use crate::effect::EffectType;
    use crate::error::ConfigErrorKind;

    fn parry_skill() -> SkillDefinition {
        SkillDefinition::new(5, "Deflect").with_effect(Effect::new(EffectType::Parry))
    }

    #[test]
    fn missing_handler_aborts_aggregation() {
        let registry = EffectRegistry::build().without_handler(EffectType::Parry);
        let aggregator = SkillAggregator::new(&registry, AggregationOptions::default());

        let err = aggregator.aggregate(&[parry_skill()], None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::UnregisteredHandler);
        assert_eq!(err.field, "battleEffects");
        assert_eq!(err.skill_id, 5);
        assert_eq!(err.error_code(), "CONFIG_UNREGISTERED_HANDLER");
    }

    #[test]
    fn disabled_effects_are_skipped_after_validation() {
        let registry = EffectRegistry::build();
        let aggregator = SkillAggregator::new(&registry, AggregationOptions::default());

        let disabled = SkillDefinition::new(1, "Dormant").with_effect(
            Effect::new(EffectType::GoldMultiplier)
                .param(ParamKey::Enabled, 0)
                .value(ValueKey::Multiplier, 3.0),
        );
        let bundle = aggregator.aggregate(&[disabled], None).unwrap();
        assert_eq!(bundle.rewards.gold.product, 1.0);

        let invalid = SkillDefinition::new(2, "Broken")
            .with_effect(Effect::new(EffectType::GoldMultiplier).param(ParamKey::Enabled, 0));
        let err = aggregator.aggregate(&[invalid], None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::MissingField);
    }

    #[test]
    fn disabled_effects_still_reject_invalid_codes() {
        let registry = EffectRegistry::build();
        let aggregator = SkillAggregator::new(&registry, AggregationOptions::default());

        let skill = SkillDefinition::new(4, "Dormant Edge").with_effect(
            Effect::new(EffectType::DamageDealtPercent)
                .param(ParamKey::Enabled, 0)
                .param(ParamKey::DamageType, 12)
                .value(ValueKey::ValuePercent, 5.0),
        );
        let err = aggregator.aggregate(&[skill], None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidCode(12));
        assert_eq!(err.field, "damageType");
        assert_eq!(err.skill_id, 4);
    }

    #[test]
    fn summary_is_optional() {
        let registry = EffectRegistry::build();
        let config = EngineConfig::without_summary();
        let aggregator = SkillAggregator::new(&registry, AggregationOptions::from(&config));

        let bundle = aggregator.aggregate(&[parry_skill()], None).unwrap();
        assert!(bundle.summary.is_none());
        assert!(bundle.battle_effects.combat.parry.enabled);
    }

    #[test]
    fn martial_bonus_reaches_both_consumers() {
        let registry = EffectRegistry::build();
        let aggregator = SkillAggregator::new(&registry, AggregationOptions::default());
        let skill = SkillDefinition::new(3, "Discipline").with_effect(
            Effect::new(EffectType::MartialBonusPercent).value(ValueKey::ValuePercent, 20.0),
        );

        let bundle = aggregator.aggregate(&[skill], None).unwrap();
        assert!((bundle.combat_stats.martial_bonus.resolve() - 1.2).abs() < 1e-9);
        assert!((bundle.battle_effects.damage.martial_multiplier - 1.2).abs() < 1e-9);

        let summary = bundle.summary.unwrap();
        assert_eq!(summary.len(), 1);
    }
}
