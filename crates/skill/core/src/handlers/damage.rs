//! Damage, healing and defense handlers.

use crate::accumulate::{BattleEffectAccumulator, ScopedScale};
use crate::catalog::{ArrayKey, CodeTable, DamageType, ParamKey, ValueKey};
use crate::effect::{ModifierKey, Payload};

use super::{HandlerContext, HandlerResult, keep_max, keep_min, multiply_into};

enum Channel {
    Percent,
    Multiplier,
}

/// Feeds the dealt or taken scale of one damage type (or all of them).
fn damage_scale(
    payload: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    pick: fn(&mut BattleEffectAccumulator) -> &mut ScopedScale<DamageType>,
    channel: Channel,
) -> HandlerResult {
    let scope: Option<DamageType> = payload.optional_code(ParamKey::DamageType)?;
    let key = ModifierKey::new(
        payload.effect_type(),
        0,
        scope.map_or(ModifierKey::ALL_VARIANTS, DamageType::code),
    );

    match channel {
        Channel::Percent => {
            let percent = payload.require_value(ValueKey::ValuePercent)?;
            pick(acc).channel(scope).add_percent(percent);
            acc.snapshot.add(key, percent);
        }
        Channel::Multiplier => {
            let factor = payload.require_value(ValueKey::Multiplier)?;
            pick(acc).channel(scope).multiply(factor);
            acc.snapshot.multiply(key, factor);
        }
    }
    Ok(())
}

fn dealt(acc: &mut BattleEffectAccumulator) -> &mut ScopedScale<DamageType> {
    &mut acc.damage.dealt
}

fn taken(acc: &mut BattleEffectAccumulator) -> &mut ScopedScale<DamageType> {
    &mut acc.damage.taken
}

pub(super) fn dealt_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    damage_scale(p, acc, dealt, Channel::Percent)
}

pub(super) fn dealt_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    damage_scale(p, acc, dealt, Channel::Multiplier)
}

pub(super) fn taken_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    damage_scale(p, acc, taken, Channel::Percent)
}

pub(super) fn taken_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    damage_scale(p, acc, taken, Channel::Multiplier)
}

pub(super) fn dealt_against_race(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    for race in p.ids(ParamKey::Race, ArrayKey::RaceIds)? {
        multiply_into(&mut acc.damage.dealt_against_race, race, factor);
        acc.snapshot
            .multiply(ModifierKey::new(p.effect_type(), 0, race), factor);
    }
    Ok(())
}

pub(super) fn taken_from_race(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    for race in p.ids(ParamKey::Race, ArrayKey::RaceIds)? {
        multiply_into(&mut acc.damage.taken_from_race, race, factor);
        acc.snapshot
            .multiply(ModifierKey::new(p.effect_type(), 0, race), factor);
    }
    Ok(())
}

pub(super) fn critical_damage_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.damage.critical_damage.add_percent(percent);
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn critical_damage_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.damage.critical_damage.multiply(factor);
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

pub(super) fn critical_damage_taken_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.damage.critical_damage_taken *= factor;
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

pub(super) fn additional_score_additive(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let value = p.require_value(ValueKey::Value)?;
    acc.damage.additional_damage_score_additive += value;
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), value);
    Ok(())
}

pub(super) fn additional_score_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.damage.additional_damage_score_multiplier *= factor;
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

pub(super) fn min_hit_scale(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let scale = p.require_value(ValueKey::MinHitScale)?;
    keep_max(&mut acc.damage.min_hit_scale, scale);
    acc.snapshot.record_max(ModifierKey::new(p.effect_type(), 0, 0), scale);
    Ok(())
}

pub(super) fn dodge_cap(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let cap = p.require_value(ValueKey::MaxDodge)?;
    keep_min(&mut acc.damage.dodge_cap, cap);
    acc.snapshot.record_min(ModifierKey::new(p.effect_type(), 0, 0), cap);
    Ok(())
}

pub(super) fn magic_nullify_chance(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let chance = p.require_chance(ctx.stats())?;
    acc.damage.magic_nullify_chance = acc.damage.magic_nullify_chance.max(chance);
    acc.snapshot.record_max(ModifierKey::new(p.effect_type(), 0, 0), chance);
    Ok(())
}

pub(super) fn level_comparison(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercentPerLevel)?;
    acc.damage.level_comparison_percent_per_level += percent;
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn absorption(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.damage.absorption_percent += percent;
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);

    if let Some(cap) = p.value(ValueKey::CapPercent) {
        keep_max(&mut acc.damage.absorption_cap_percent, cap);
        acc.snapshot.record_max(ModifierKey::new(p.effect_type(), 1, 0), cap);
    }
    Ok(())
}

pub(super) fn healing_dealt_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.damage.healing_dealt.add_percent(percent);
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn healing_received_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.damage.healing_received_multiplier *= factor;
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

pub(super) fn physical_penetration(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.damage.penetration_percent += percent;
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn martial_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.damage.martial.add_percent(percent);
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn martial_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.damage.martial.multiply(factor);
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}
