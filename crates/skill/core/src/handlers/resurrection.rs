//! Resurrection handlers.
//!
//! Rescue and active rules are identity-keyed entries; the remaining kinds
//! fold into single values.

use crate::accumulate::BattleEffectAccumulator;
use crate::accumulate::battle::{ActiveResurrection, RescueRule, Vitalize};
use crate::catalog::{HpScale, ParamKey, ResurrectionPassiveKind, ValueKey};
use crate::effect::Payload;
use crate::error::ConfigError;

use super::{HandlerContext, HandlerResult, keep_min_count};

/// Revivals happen at end of turn unless the effect says otherwise.
const DEFAULT_INSTANT: bool = false;

/// Forced resurrection without `maxTriggers` fires once per battle.
const DEFAULT_FORCED_TRIGGERS: u32 = 1;

fn hp_scale(p: &Payload<'_>) -> Result<HpScale, ConfigError> {
    Ok(p.optional_code(ParamKey::HpScale)?.unwrap_or_default())
}

pub(super) fn rescue(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let rule = RescueRule {
        chance_percent: p.require_chance(ctx.stats())?,
        hp_scale: hp_scale(p)?,
        hp_percent: p.value(ValueKey::HpPercent),
        min_level: p.optional_count(ParamKey::MinLevel)?,
        instant: p.flag(ParamKey::Instant, DEFAULT_INSTANT),
    };
    acc.resurrection.rescue.insert(p.identity(), rule);
    Ok(())
}

pub(super) fn active(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let rule = ActiveResurrection {
        chance_percent: p.require_chance(ctx.stats())?,
        hp_scale: hp_scale(p)?,
        hp_percent: p.value(ValueKey::HpPercent),
        max_triggers: p.optional_count(ParamKey::MaxTriggers)?,
        instant: p.flag(ParamKey::Instant, DEFAULT_INSTANT),
    };
    acc.resurrection.active.insert(p.identity(), rule);
    Ok(())
}

pub(super) fn forced(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let triggers = p
        .optional_count(ParamKey::MaxTriggers)?
        .unwrap_or(DEFAULT_FORCED_TRIGGERS);
    let current = &mut acc.resurrection.forced_max_triggers;
    *current = Some(current.map_or(triggers, |existing| existing.max(triggers)));
    Ok(())
}

pub(super) fn vitalize(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let incoming = Vitalize {
        remove_penalties: p.flag(ParamKey::RemovePenalties, true),
        remember_skills: p.flag(ParamKey::RememberSkills, false),
    };
    let merged = acc.resurrection.vitalize.get_or_insert_with(Vitalize::default);
    merged.remove_penalties |= incoming.remove_penalties;
    merged.remember_skills |= incoming.remember_skills;
    Ok(())
}

pub(super) fn summon(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let every = p.count(ParamKey::EveryTurns)?;
    keep_min_count(&mut acc.resurrection.summon_every_turns, every);
    Ok(())
}

pub(super) fn passive(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let kind: ResurrectionPassiveKind = p.code(ParamKey::PassiveKind)?;
    acc.resurrection.passive.insert(kind);
    acc.resurrection.passive_instant |= p.flag(ParamKey::Instant, DEFAULT_INSTANT);
    Ok(())
}

pub(super) fn sacrifice(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let interval = p.count(ParamKey::Interval)?;
    keep_min_count(&mut acc.resurrection.sacrifice_interval, interval);
    Ok(())
}
