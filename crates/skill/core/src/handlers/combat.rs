//! Turn-flow, guard and triggered-ability handlers.

use crate::accumulate::BattleEffectAccumulator;
use crate::accumulate::battle::{
    BuffSchedule, ExtraActionGrant, GuardBonus, Reaction, SpecialAttackGrant, TimedBuff,
};
use crate::catalog::{CodeTable, CombatStat, DamageType, ParamKey, ValueKey};
use crate::effect::{ModifierKey, Payload};

use super::{HandlerContext, HandlerResult};

/// Damage type a barrier absorbs when the effect names none.
const DEFAULT_BARRIER_DAMAGE_TYPE: DamageType = DamageType::Physical;

pub(super) fn extra_action(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let grant = ExtraActionGrant {
        count: p.count(ParamKey::Count)?,
        chance_percent: p.chance(ctx.stats())?,
    };
    acc.combat.extra_actions.insert(p.identity(), grant);
    Ok(())
}

pub(super) fn reaction(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let reaction = Reaction {
        trigger: p.code(ParamKey::Trigger)?,
        action: p.optional_code(ParamKey::Action)?.unwrap_or_default(),
        target: p.optional_code(ParamKey::Target)?.unwrap_or_default(),
        damage_type: p.optional_code(ParamKey::DamageType)?,
        chance_percent: p.require_chance(ctx.stats())?,
        damage_multiplier: p.value_or(ValueKey::Multiplier, 1.0),
        max_triggers: p.optional_count(ParamKey::MaxTriggers)?,
    };
    acc.combat.reactions.insert(p.identity(), reaction);
    Ok(())
}

pub(super) fn proc_rate(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.combat.proc.add_percent(percent);
    acc.snapshot.add(ModifierKey::new(p.effect_type(), 0, 0), percent);
    Ok(())
}

pub(super) fn proc_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.combat.proc.multiply(factor);
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

pub(super) fn action_order_shuffle(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    acc.combat.action_order_shuffle = true;
    acc.snapshot.set_flag(ModifierKey::new(p.effect_type(), 0, 0));
    Ok(())
}

pub(super) fn action_order_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.combat.action_order_multiplier *= factor;
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

pub(super) fn counter_evasion_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.combat.counter_evasion_multiplier *= factor;
    acc.snapshot.multiply(ModifierKey::new(p.effect_type(), 0, 0), factor);
    Ok(())
}

/// Slot 0 flags the capability, slot 1 sums the bonus.
fn guard(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    pick: fn(&mut BattleEffectAccumulator) -> &mut GuardBonus,
) -> HandlerResult {
    let bonus = p.value_or(ValueKey::BonusPercent, 0.0);
    let slot = pick(acc);
    slot.enabled = true;
    slot.bonus_percent += bonus;

    acc.snapshot.set_flag(ModifierKey::new(p.effect_type(), 0, 0));
    if bonus != 0.0 {
        acc.snapshot.add(ModifierKey::new(p.effect_type(), 1, 0), bonus);
    }
    Ok(())
}

pub(super) fn parry(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    guard(p, acc, |acc| &mut acc.combat.parry)
}

pub(super) fn shield_block(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    guard(p, acc, |acc| &mut acc.combat.shield_block)
}

fn add_barrier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    on_guard: bool,
) -> HandlerResult {
    let charges = p.count(ParamKey::Charges)?;
    let damage_type = p
        .optional_code::<DamageType>(ParamKey::DamageType)?
        .unwrap_or(DEFAULT_BARRIER_DAMAGE_TYPE);

    let pool = if on_guard {
        &mut acc.combat.guard_barrier_charges
    } else {
        &mut acc.combat.barrier_charges
    };
    let total = pool.entry(damage_type).or_insert(0);
    *total = total.saturating_add(charges);

    acc.snapshot.add_integer(
        ModifierKey::new(p.effect_type(), 0, damage_type.code()),
        charges.into(),
    );
    Ok(())
}

pub(super) fn barrier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    add_barrier(p, acc, false)
}

pub(super) fn barrier_on_guard(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    add_barrier(p, acc, true)
}

pub(super) fn special_attack(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let grant = SpecialAttackGrant {
        special_attack_id: p.id(ParamKey::SpecialAttackId)?,
        chance_percent: p.require_chance(ctx.stats())?,
    };
    acc.combat.special_attacks.insert(p.identity(), grant);
    Ok(())
}

pub(super) fn enemy_action_debuff(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let chance = p.require_chance(ctx.stats())?;
    acc.combat.enemy_action_debuff_chance = acc.combat.enemy_action_debuff_chance.max(chance);
    acc.snapshot.record_max(ModifierKey::new(p.effect_type(), 0, 0), chance);
    Ok(())
}

pub(super) fn enemy_single_action_skip(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let chance = p.require_chance(ctx.stats())?;
    acc.combat.enemy_single_action_skip_chance =
        acc.combat.enemy_single_action_skip_chance.max(chance);
    acc.snapshot.record_max(ModifierKey::new(p.effect_type(), 0, 0), chance);
    Ok(())
}

fn timed_buff(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    schedule: BuffSchedule,
    value_key: ValueKey,
) -> HandlerResult {
    let stat: Option<CombatStat> = p.optional_code(ParamKey::Stat)?;
    let buff = TimedBuff {
        schedule,
        stat,
        value_percent: p.value_or(value_key, 0.0),
        multiplier: p.value_or(ValueKey::Multiplier, 1.0),
        duration: p.optional_count(ParamKey::Duration)?,
        max_percent: p.value(ValueKey::MaxPercent),
    };
    acc.combat.timed_buffs.insert(p.identity(), buff);

    let param = stat.map_or(ModifierKey::ALL_VARIANTS, CombatStat::code);
    acc.snapshot.set_flag(ModifierKey::new(p.effect_type(), 0, param));
    Ok(())
}

pub(super) fn timed_buff_trigger(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let turn = p.count(ParamKey::TriggerTurn)?;
    timed_buff(p, acc, BuffSchedule::AtTurn(turn), ValueKey::ValuePercent)
}

pub(super) fn timed_buff_per_turn(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    timed_buff(p, acc, BuffSchedule::PerTurn, ValueKey::ValuePercentPerTurn)
}

pub(super) fn first_strike(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    acc.combat.first_strike = true;
    acc.snapshot.set_flag(ModifierKey::new(p.effect_type(), 0, 0));
    Ok(())
}
