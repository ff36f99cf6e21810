//! Formation, party and end-of-turn handlers.

use crate::accumulate::BattleEffectAccumulator;
use crate::accumulate::battle::Retreat;
use crate::catalog::{CodeTable, ParamKey, RowProfile, ValueKey};
use crate::effect::{ModifierKey, Payload};

use super::{HandlerContext, HandlerResult, keep_max};

/// Retreat chance when the effect gives none.
const DEFAULT_RETREAT_CHANCE: f64 = 100.0;

fn key(p: &Payload<'_>) -> ModifierKey {
    ModifierKey::new(p.effect_type(), 0, 0)
}

pub(super) fn row_profile(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let profile: RowProfile = p.code(ParamKey::Profile)?;
    acc.misc.row_profile = Some(profile);
    acc.snapshot.set_integer(key(p), profile.code().into());
    Ok(())
}

pub(super) fn targeting_weight(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let weight = p.require_value(ValueKey::Weight)?;
    acc.misc.targeting_weight *= weight;
    acc.snapshot.multiply(key(p), weight);
    Ok(())
}

pub(super) fn cover_rows_behind(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    acc.misc.cover_rows_behind = true;
    acc.snapshot.set_flag(key(p));
    Ok(())
}

pub(super) fn party_hostility(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    acc.misc.party_hostility = true;
    acc.snapshot.set_flag(key(p));
    Ok(())
}

pub(super) fn party_protection(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    acc.misc.party_protection = true;
    acc.snapshot.set_flag(key(p));
    Ok(())
}

pub(super) fn anti_healing(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    acc.misc.anti_healing = true;
    acc.snapshot.set_flag(key(p));
    Ok(())
}

pub(super) fn degradation_repair(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.misc.degradation_repair_percent += percent;
    acc.snapshot.add(key(p), percent);
    Ok(())
}

pub(super) fn flee_threshold(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let hp_percent = p.require_value(ValueKey::HpPercent)?;
    keep_max(&mut acc.misc.flee_threshold_hp_percent, hp_percent);
    acc.snapshot.record_max(key(p), hp_percent);
    Ok(())
}

/// Earliest turn wins; on the same turn the higher chance is kept.
pub(super) fn retreat_at_turn(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    ctx: &HandlerContext<'_>,
) -> HandlerResult {
    let candidate = Retreat {
        turn: p.count(ParamKey::Turn)?,
        chance_percent: p.chance(ctx.stats())?.unwrap_or(DEFAULT_RETREAT_CHANCE),
    };

    let replace = match acc.misc.retreat {
        None => true,
        Some(current) => {
            candidate.turn < current.turn
                || (candidate.turn == current.turn
                    && candidate.chance_percent > current.chance_percent)
        }
    };
    if replace {
        acc.misc.retreat = Some(candidate);
    }
    acc.snapshot.set_flag(key(p));
    Ok(())
}

pub(super) fn end_of_turn_healing(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.misc.end_of_turn_healing_percent += percent;
    acc.snapshot.add(key(p), percent);
    Ok(())
}

pub(super) fn end_of_turn_self_damage(
    p: &Payload<'_>,
    acc: &mut BattleEffectAccumulator,
    _: &HandlerContext<'_>,
) -> HandlerResult {
    let percent = p.require_value(ValueKey::ValuePercent)?;
    acc.misc.end_of_turn_self_damage_percent += percent;
    acc.snapshot.add(key(p), percent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Effect, ParamKey, RowProfile, ValueKey};
    use crate::effect::EffectType;
    use crate::handlers::testing::fold;

    fn retreat(turn: i32, chance: f64) -> Effect {
        Effect::new(EffectType::RetreatAtTurn)
            .param(ParamKey::Turn, turn)
            .value(ValueKey::ChancePercent, chance)
    }

    #[test]
    fn retreat_prefers_earliest_turn_then_higher_chance() {
        let (battle, _) =
            fold(&[retreat(5, 90.0), retreat(3, 20.0), retreat(3, 60.0), retreat(3, 40.0)], None)
                .unwrap();

        let chosen = battle.misc.retreat.unwrap();
        assert_eq!((chosen.turn, chosen.chance_percent), (3, 60.0));
    }

    #[test]
    fn row_profile_is_last_write_wins() {
        let profile = |code: RowProfile| {
            Effect::new(EffectType::RowProfile).param(ParamKey::Profile, code as i32)
        };
        let (battle, _) = fold(&[profile(RowProfile::Melee), profile(RowProfile::Ranged)], None)
            .unwrap();
        assert_eq!(battle.misc.row_profile(), RowProfile::Ranged);

        let (neutral, _) = fold(&[], None).unwrap();
        assert_eq!(neutral.misc.row_profile(), RowProfile::Balanced);
        assert_eq!(neutral.misc.targeting_weight, 1.0);
    }

    #[test]
    fn flags_and_sums() {
        let (battle, _) = fold(
            &[
                Effect::new(EffectType::CoverRowsBehind),
                Effect::new(EffectType::AntiHealing),
                Effect::new(EffectType::EndOfTurnHealing).value(ValueKey::ValuePercent, 3.0),
                Effect::new(EffectType::EndOfTurnHealing).value(ValueKey::ValuePercent, 2.0),
                Effect::new(EffectType::FleeThreshold).value(ValueKey::HpPercent, 20.0),
                Effect::new(EffectType::FleeThreshold).value(ValueKey::HpPercent, 35.0),
            ],
            None,
        )
        .unwrap();

        assert!(battle.misc.cover_rows_behind && battle.misc.anti_healing);
        assert!(!battle.misc.party_hostility);
        assert_eq!(battle.misc.end_of_turn_healing_percent, 5.0);
        assert_eq!(battle.misc.flee_threshold_hp_percent, Some(35.0));
    }
}
