//! Status resistance, infliction and immunity handlers.

use crate::accumulate::BattleEffectAccumulator;
use crate::accumulate::battle::StatusInfliction;
use crate::catalog::{ParamKey, ValueKey};
use crate::effect::{ModifierKey, Payload};
use crate::error::ConfigError;

use super::{HandlerContext, HandlerResult, keep_max};

fn status_key(p: &Payload<'_>, status: Option<u16>) -> ModifierKey {
    ModifierKey::new(
        p.effect_type(),
        0,
        status.unwrap_or(ModifierKey::ALL_VARIANTS),
    )
}

fn required_status(p: &Payload<'_>) -> Result<u16, ConfigError> {
    p.status_id()?
        .ok_or_else(|| p.missing(ParamKey::StatusType.name()))
}

pub(super) fn resistance_percent(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let status = p.status_id()?;
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.status.resistance.channel(status).add_percent(percent);
    acc.snapshot.add(status_key(p, status), percent);
    Ok(())
}

pub(super) fn resistance_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let status = p.status_id()?;
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.status.resistance.channel(status).multiply(factor);
    acc.snapshot.multiply(status_key(p, status), factor);
    Ok(())
}

pub(super) fn inflict(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let infliction = StatusInfliction {
        status: required_status(p)?,
        chance_percent: p.require_chance(ctx.stats())?,
        duration: p.optional_count(ParamKey::Duration)?,
    };
    acc.snapshot
        .set_flag(status_key(p, Some(infliction.status)));
    acc.status.inflictions.insert(p.identity(), infliction);
    Ok(())
}

pub(super) fn inflict_multiplier(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let status = p.status_id()?;
    let factor = p.require_value(ValueKey::Multiplier)?;
    acc.status.inflict_multiplier.channel(status).multiply(factor);
    acc.snapshot.multiply(status_key(p, status), factor);
    Ok(())
}

pub(super) fn berserk(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let chance = p.require_chance(ctx.stats())?;
    keep_max(&mut acc.status.berserk_chance, chance);
    acc.snapshot
        .record_max(ModifierKey::new(p.effect_type(), 0, 0), chance);
    Ok(())
}

pub(super) fn auto_cure(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let status = p.status_id()?;
    match status {
        Some(id) => {
            acc.status.auto_cure.statuses.insert(id);
        }
        None => acc.status.auto_cure.all = true,
    }
    acc.snapshot.set_flag(status_key(p, status));
    Ok(())
}

pub(super) fn immunity(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let status = required_status(p)?;
    acc.status.immunities.insert(status);
    acc.snapshot.set_flag(status_key(p, Some(status)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::catalog::{ActorStats, BaseStat, Effect, ParamKey, ValueKey};
    use crate::effect::EffectType;
    use crate::error::ConfigErrorKind;
    use crate::handlers::testing::fold;

    #[test]
    fn resistance_resolves_per_status_with_shared_channel() {
        let (battle, _) = fold(
            &[
                Effect::new(EffectType::StatusResistancePercent)
                    .value(ValueKey::ValuePercent, 50.0),
                Effect::new(EffectType::StatusResistanceMultiplier)
                    .param(ParamKey::Status, 4)
                    .value(ValueKey::Multiplier, 2.0),
            ],
            None,
        )
        .unwrap();

        assert_eq!(battle.status.resistance.get(&4), 3.0);
        assert_eq!(battle.status.resistance.get(&5), 1.5);
    }

    #[test]
    fn inflictions_use_stat_scaled_chance() {
        let stats = ActorStats::new(0, 0, 0, 0, 0, 24);
        let (battle, _) = fold(
            &[Effect::new(EffectType::StatusInflict)
                .family("venom")
                .param(ParamKey::StatusType, 2)
                .param(ParamKey::ChanceStat, BaseStat::Luck as i32)
                .value(ValueKey::ChanceCoefficient, 0.5)],
            Some(&stats),
        )
        .unwrap();

        let venom = battle.status.inflictions["venom"];
        assert_eq!(venom.status, 2);
        assert_eq!(venom.chance_percent, 12.0);
    }

    #[test]
    fn auto_cure_without_status_cures_everything() {
        let (battle, _) = fold(
            &[
                Effect::new(EffectType::AutoStatusCure),
                Effect::new(EffectType::StatusImmunity).param(ParamKey::StatusType, 9),
            ],
            None,
        )
        .unwrap();

        assert!(battle.status.auto_cure.cures(77));
        assert!(battle.status.is_immune(9));
        assert!(!battle.status.is_immune(8));
    }

    #[test]
    fn immunity_requires_a_status() {
        let err = fold(&[Effect::new(EffectType::StatusImmunity)], None).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::MissingField);
        assert_eq!(err.field, "statusType");
    }
}
