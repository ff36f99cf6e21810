//! Spell power, charge and spell-specific handlers.

use crate::accumulate::BattleEffectAccumulator;
use crate::catalog::{CodeTable, ParamKey, SpellSchool, ValueKey};
use crate::effect::{ModifierKey, Payload};

use super::{HandlerContext, HandlerResult, multiply_into};

fn school_key(p: &Payload<'_>, school: Option<SpellSchool>) -> ModifierKey {
    ModifierKey::new(
        p.effect_type(),
        0,
        school.map_or(ModifierKey::ALL_VARIANTS, SpellSchool::code),
    )
}

pub(super) fn power_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let school: Option<SpellSchool> = p.optional_code(ParamKey::School)?;
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.spell.power.channel(school).add_percent(percent);
    acc.snapshot.add(school_key(p, school), percent);
    Ok(())
}

pub(super) fn power_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let school: Option<SpellSchool> = p.optional_code(ParamKey::School)?;
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.spell.power.channel(school).multiply(factor);
    acc.snapshot.multiply(school_key(p, school), factor);
    Ok(())
}

pub(super) fn specific_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let spell = p.id(ParamKey::SpellId)?;
    let factor = p.require_value(ValueKey::Multiplier)?;
    multiply_into(&mut acc.spell.spell_multipliers, spell, factor);
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, spell), factor);
    Ok(())
}

pub(super) fn specific_taken_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let spell = p.id(ParamKey::SpellId)?;
    let factor = p.require_value(ValueKey::Multiplier)?;
    multiply_into(&mut acc.spell.spell_taken_multipliers, spell, factor);
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, spell), factor);
    Ok(())
}

pub(super) fn tactic_amplify(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let spell = p.id(ParamKey::SpellId)?;
    let factor = p.require_value(ValueKey::Multiplier)?;
    multiply_into(&mut acc.spell.tactic_amplify, spell, factor);
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, spell), factor);
    Ok(())
}

pub(super) fn charge_modifier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let spell = p.optional_id(ParamKey::SpellId)?;
    let initial = p.param(ParamKey::InitialBonus).unwrap_or(0);
    let max = p.param(ParamKey::MaxBonus).unwrap_or(0);

    let charges = acc.spell.charges_for(spell);
    charges.initial_bonus = charges.initial_bonus.saturating_add(initial);
    charges.max_bonus = charges.max_bonus.saturating_add(max);

    let param = spell.unwrap_or(ModifierKey::ALL_VARIANTS);
    for (slot, delta) in [(0, initial), (1, max)] {
        if delta != 0 {
            acc.snapshot
                .add_integer(ModifierKey::new(p.effect_type(), slot, param), delta.into());
        }
    }
    Ok(())
}

pub(super) fn charge_recovery(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let spell = p.optional_id(ParamKey::SpellId)?;
    let per_turn = p.require_param(ParamKey::ChargesPerTurn)?;

    let charges = acc.spell.charges_for(spell);
    charges.recovery_per_turn = charges.recovery_per_turn.saturating_add(per_turn);

    let param = spell.unwrap_or(ModifierKey::ALL_VARIANTS);
    acc.snapshot
        .add_integer(ModifierKey::new(p.effect_type(), 0, param), per_turn.into());
    Ok(())
}

pub(super) fn critical_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.spell.critical_chance_percent += percent;
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn critical_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.spell.critical_multiplier *= factor;
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Effect, ParamKey, SpellSchool, ValueKey};
    use crate::effect::{EffectType, ModifierKey};
    use crate::handlers::testing::fold;

    #[test]
    fn school_power_includes_shared_bonus() {
        let (battle, _) = fold(
            &[
                Effect::new(EffectType::SpellPowerPercent).value(ValueKey::ValuePercent, 10.0),
                Effect::new(EffectType::SpellPowerMultiplier)
                    .param(ParamKey::School, SpellSchool::Priest as i32)
                    .value(ValueKey::Multiplier, 2.0),
            ],
            None,
        )
        .unwrap();

        assert!((battle.spell.power(SpellSchool::Mage) - 1.1).abs() < 1e-9);
        assert!((battle.spell.power(SpellSchool::Priest) - 2.2).abs() < 1e-9);
    }

    #[test]
    fn charge_modifiers_stack_per_spell_on_top_of_all() {
        let (battle, snapshot) = fold(
            &[
                Effect::new(EffectType::SpellChargeModifier).param(ParamKey::MaxBonus, 1),
                Effect::new(EffectType::SpellChargeModifier)
                    .param(ParamKey::SpellId, 7)
                    .param(ParamKey::InitialBonus, 2)
                    .param(ParamKey::MaxBonus, 1),
                Effect::new(EffectType::SpellChargeRecovery)
                    .param(ParamKey::SpellId, 7)
                    .param(ParamKey::ChargesPerTurn, 1),
            ],
            None,
        )
        .unwrap();

        let fire = battle.spell.charge_modifier(7);
        assert_eq!((fire.initial_bonus, fire.max_bonus, fire.recovery_per_turn), (2, 2, 1));

        let other = battle.spell.charge_modifier(3);
        assert_eq!((other.initial_bonus, other.max_bonus, other.recovery_per_turn), (0, 1, 0));

        let max_all = ModifierKey::all(EffectType::SpellChargeModifier, 1);
        assert_eq!(snapshot.integers[&max_all], 1);

        let initial_all = ModifierKey::all(EffectType::SpellChargeModifier, 0);
        assert!(!snapshot.integers.contains_key(&initial_all));
    }

    #[test]
    fn spell_specific_multipliers_compound() {
        let (battle, _) = fold(
            &[
                Effect::new(EffectType::SpellSpecificMultiplier)
                    .param(ParamKey::SpellId, 4)
                    .value(ValueKey::Multiplier, 1.5),
                Effect::new(EffectType::SpellSpecificMultiplier)
                    .param(ParamKey::SpellId, 4)
                    .value(ValueKey::Multiplier, 2.0),
            ],
            None,
        )
        .unwrap();

        assert_eq!(battle.spell.spell_multiplier(4), 3.0);
        assert_eq!(battle.spell.spell_multiplier(5), 1.0);
    }
}
