//! End-to-end aggregation properties.

use proptest::prelude::*;

use skill_core::{
    ActorStats, AggregationOptions, ArrayKey, BaseStat, CombatStat, ConfigErrorKind, DamageType,
    Effect, EffectRegistry, EffectType, ModifierKey, ParamKey, RewardChannel, SkillAggregator,
    SkillBundle, SkillDefinition, SpellDefinition, SpellSchool, SummaryValue, ValueKey,
};

fn aggregate(skills: &[SkillDefinition], stats: Option<&ActorStats>) -> SkillBundle {
    SkillAggregator::new(EffectRegistry::shared(), AggregationOptions::default())
        .aggregate(skills, stats)
        .expect("skills aggregate cleanly")
}

fn stat_effect(kind: EffectType, stat: CombatStat) -> Effect {
    Effect::new(kind).param(ParamKey::Stat, stat as i32)
}

fn sample_skills() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition::new(10, "Berserker Blood")
            .with_effect(
                stat_effect(EffectType::StatPercent, CombatStat::PhysicalAttack)
                    .value(ValueKey::ValuePercent, 20.0),
            )
            .with_effect(
                Effect::new(EffectType::DamageTakenPercent).value(ValueKey::ValuePercent, 15.0),
            )
            .with_effect(
                Effect::new(EffectType::Berserk)
                    .param(ParamKey::ChanceStat, BaseStat::Vitality as i32)
                    .value(ValueKey::ChanceCoefficient, 0.5),
            ),
        SkillDefinition::new(3, "Treasure Sense")
            .with_effect(Effect::new(EffectType::GoldBonus).value(ValueKey::ValuePercent, 15.0))
            .with_effect(Effect::new(EffectType::GoldMultiplier).value(ValueKey::Multiplier, 1.2))
            .with_effect(
                Effect::new(EffectType::ExplorationTimePercent)
                    .value(ValueKey::ValuePercent, -20.0),
            ),
        SkillDefinition::new(7, "Weapon Focus")
            .with_effect(
                stat_effect(EffectType::StatPercent, CombatStat::PhysicalAttack)
                    .value(ValueKey::ValuePercent, 10.0),
            )
            .with_effect(
                stat_effect(EffectType::StatMultiplier, CombatStat::PhysicalAttack)
                    .value(ValueKey::Multiplier, 1.5),
            )
            .with_effect(
                Effect::new(EffectType::Reaction)
                    .family("riposte")
                    .param(ParamKey::Trigger, 1)
                    .param(ParamKey::DamageType, DamageType::Physical as i32)
                    .value(ValueKey::ChancePercent, 25.0),
            ),
        SkillDefinition::new(21, "Arcane Study")
            .with_effect(
                Effect::new(EffectType::SpellTierUnlock)
                    .param(ParamKey::School, SpellSchool::Mage as i32)
                    .param(ParamKey::Tier, 2),
            )
            .with_effect(
                Effect::new(EffectType::SpellLearn).array(ArrayKey::SpellIds, [40]),
            )
            .with_effect(Effect::new(EffectType::EquipmentSlotAdditive).param(ParamKey::Count, 1)),
    ]
}

fn stats() -> ActorStats {
    ActorStats::new(12, 8, 9, 30, 11, 7)
}

#[test]
fn identical_input_gives_identical_bundle() {
    let skills = sample_skills();
    let first = aggregate(&skills, Some(&stats()));
    let second = aggregate(&skills, Some(&stats()));
    assert_eq!(first, second);
}

#[test]
fn passive_multiplier_composition() {
    let bundle = aggregate(&sample_skills(), Some(&stats()));
    let attack = bundle
        .combat_stats
        .passive_multiplier(CombatStat::PhysicalAttack);
    assert!((attack - 1.95).abs() < 1e-9);
}

#[test]
fn reward_scaling() {
    let bundle = aggregate(&sample_skills(), Some(&stats()));
    assert!((bundle.rewards.scale(RewardChannel::Gold) - 1.38).abs() < 1e-9);
    assert_eq!(bundle.rewards.scale(RewardChannel::Experience), 1.0);
}

#[test]
fn every_category_is_filled() {
    let bundle = aggregate(&sample_skills(), Some(&stats()));

    assert!((bundle.battle_effects.damage.taken.physical - 1.15).abs() < 1e-9);
    assert_eq!(bundle.battle_effects.status.berserk_chance, Some(15.0));
    assert_eq!(bundle.battle_effects.combat.reactions["riposte"].chance_percent, 25.0);
    assert!((bundle.exploration.time_multiplier(&Default::default()) - 0.8).abs() < 1e-9);
    assert_eq!(bundle.equipment_slots.capacity(4), 5);
    assert_eq!(bundle.spellbook.unlocked_tier(SpellSchool::Mage), 2);
    assert!(bundle.spellbook.learned.contains(&40));
}

#[test]
fn talent_and_incompetence_cancel() {
    let skill = SkillDefinition::new(1, "Mixed Gifts")
        .with_effect(
            stat_effect(EffectType::StatTalent, CombatStat::EvasionRate)
                .value(ValueKey::Multiplier, 1.5),
        )
        .with_effect(
            stat_effect(EffectType::StatIncompetence, CombatStat::EvasionRate)
                .value(ValueKey::Multiplier, 0.6),
        );

    let bundle = aggregate(&[skill], None);
    assert_eq!(
        bundle
            .combat_stats
            .aptitude_multiplier(CombatStat::EvasionRate),
        1.0
    );

    let summary = bundle.summary.expect("summary enabled by default");
    let param = CombatStat::EvasionRate as u16;
    let talent = summary
        .get(ModifierKey::new(EffectType::StatTalent, 0, param))
        .expect("talent listed");
    let incompetence = summary
        .get(ModifierKey::new(EffectType::StatIncompetence, 0, param))
        .expect("incompetence listed");
    assert_eq!(talent.value, Some(SummaryValue::Multiplier(1.5)));
    assert_eq!(incompetence.value, Some(SummaryValue::Multiplier(0.6)));
}

#[test]
fn status_inflict_without_chance_fails() {
    let skill = SkillDefinition::new(42, "Venom Edge")
        .with_effect(Effect::new(EffectType::DamageDealtPercent).value(ValueKey::ValuePercent, 5.0))
        .with_effect(Effect::new(EffectType::StatusInflict).param(ParamKey::StatusType, 3));

    let err = SkillAggregator::new(EffectRegistry::shared(), AggregationOptions::default())
        .aggregate(&[skill], None)
        .unwrap_err();

    assert_eq!(err.skill_id, 42);
    assert_eq!(err.effect_index, 1);
    assert_eq!(err.effect_type, EffectType::StatusInflict);
    assert_eq!(err.kind, ConfigErrorKind::MissingField);
}

#[test]
fn stat_scaled_chance_needs_actor_stats() {
    let err = SkillAggregator::new(EffectRegistry::shared(), AggregationOptions::default())
        .aggregate(&sample_skills(), None)
        .unwrap_err();

    assert_eq!(err.kind, ConfigErrorKind::ActorStatsRequired);
    assert_eq!(err.skill_id, 10);
    assert_eq!(err.error_code(), "CONFIG_ACTOR_STATS_REQUIRED");
}

#[test]
fn spellbook_resolution() {
    let skill = SkillDefinition::new(1, "Apprentice").with_effect(
        Effect::new(EffectType::SpellTierUnlock)
            .param(ParamKey::School, SpellSchool::Mage as i32)
            .param(ParamKey::Tier, 2),
    );
    let spells = [
        SpellDefinition::new(1, "Spark", SpellSchool::Mage, 1, 1),
        SpellDefinition::new(2, "Flame Lance", SpellSchool::Mage, 2, 10),
        SpellDefinition::new(3, "Meteor", SpellSchool::Mage, 3, 20),
    ];

    let bundle = aggregate(&[skill], None);
    let loadout = bundle.spellbook.loadout(&spells, 15);
    assert_eq!(loadout.spell_ids, vec![1, 2]);
}

#[test]
fn registry_is_complete() {
    assert!(EffectRegistry::build().missing_handlers().is_empty());
}

#[test]
fn summary_lists_conditionals_without_value() {
    let bundle = aggregate(&sample_skills(), Some(&stats()));
    let summary = bundle.summary.expect("summary enabled by default");

    let berserk = summary
        .get(ModifierKey::new(EffectType::Berserk, 0, 0))
        .expect("berserk listed");
    assert!(berserk.conditional);
    assert_eq!(berserk.value, None);

    assert!(summary.iter().all(|entry| entry.effect_type != EffectType::Reaction));
    assert!(
        summary
            .entries()
            .windows(2)
            .all(|pair| pair[0].key < pair[1].key)
    );
}

#[test]
fn reward_scale_floors_at_zero() {
    let skill = SkillDefinition::new(60, "Cursed Purse")
        .with_effect(Effect::new(EffectType::GoldBonus).value(ValueKey::ValuePercent, -200.0))
        .with_effect(Effect::new(EffectType::GoldMultiplier).value(ValueKey::Multiplier, 1.5))
        .with_effect(
            Effect::new(EffectType::ExperienceMultiplier).value(ValueKey::Multiplier, -0.5),
        )
        .with_effect(
            Effect::new(EffectType::ExperienceBonus).value(ValueKey::ValuePercent, 50.0),
        );

    let bundle = aggregate(&[skill], None);
    assert_eq!(bundle.rewards.scale(RewardChannel::Gold), 0.0);
    assert_eq!(bundle.rewards.scale(RewardChannel::Experience), 0.0);
    assert_eq!(bundle.rewards.scale(RewardChannel::ItemDrop), 1.0);
}

#[test]
fn restrictive_caps_keep_minimum_and_chances_keep_maximum() {
    let first = SkillDefinition::new(61, "Slippery")
        .with_effect(Effect::new(EffectType::DodgeCap).value(ValueKey::MaxDodge, 60.0))
        .with_effect(
            Effect::new(EffectType::MagicNullifyChance).value(ValueKey::ChancePercent, 10.0),
        )
        .with_effect(
            Effect::new(EffectType::EnemyActionDebuffChance)
                .value(ValueKey::ChancePercent, 30.0),
        );
    let second = SkillDefinition::new(62, "Heavy Armor")
        .with_effect(Effect::new(EffectType::DodgeCap).value(ValueKey::MaxDodge, 40.0))
        .with_effect(
            Effect::new(EffectType::MagicNullifyChance).value(ValueKey::ChancePercent, 25.0),
        )
        .with_effect(
            Effect::new(EffectType::EnemyActionDebuffChance)
                .value(ValueKey::ChancePercent, 5.0),
        );

    let bundle = aggregate(&[second, first], None);
    let battle = &bundle.battle_effects;
    assert_eq!(battle.damage.dodge_cap, Some(40.0));
    assert_eq!(battle.damage.magic_nullify_chance, 25.0);
    assert_eq!(battle.combat.enemy_action_debuff_chance, 30.0);

    let summary = bundle.summary.expect("summary enabled by default");
    let dodge = summary
        .get(ModifierKey::new(EffectType::DodgeCap, 0, 0))
        .expect("dodge cap listed");
    assert_eq!(dodge.value, Some(SummaryValue::Min(40.0)));
}

proptest! {
    #[test]
    fn input_order_does_not_matter(
        skills in Just(sample_skills()).prop_shuffle(),
        reverse_effects in any::<bool>(),
    ) {
        let mut skills = skills;
        if reverse_effects {
            for skill in &mut skills {
                skill.effects.reverse();
            }
        }

        let expected = aggregate(&sample_skills(), Some(&stats()));
        prop_assert_eq!(aggregate(&skills, Some(&stats())), expected);
    }
}
