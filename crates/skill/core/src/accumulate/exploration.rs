//! Exploration accumulator: dungeon-time multipliers.

use crate::catalog::{ParamKey, TextKey, ValueKey};
use crate::effect::{EffectType, Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;

use super::{Accumulator, unhandled};

/// One exploration-time multiplier, optionally scoped to a dungeon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationEntry {
    pub multiplier: f64,
    pub dungeon_id: Option<u16>,
    pub dungeon_name: Option<String>,
}

impl ExplorationEntry {
    /// An unscoped entry matches every context; a scoped one only matches a
    /// context naming the same dungeon.
    pub fn matches(&self, context: &ExplorationContext<'_>) -> bool {
        let id_matches = self
            .dungeon_id
            .is_none_or(|id| context.dungeon_id == Some(id));
        let name_matches = self
            .dungeon_name
            .as_deref()
            .is_none_or(|name| context.dungeon_name == Some(name));
        id_matches && name_matches
    }
}

/// Where an exploration is taking place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExplorationContext<'a> {
    pub dungeon_id: Option<u16>,
    pub dungeon_name: Option<&'a str>,
}

impl<'a> ExplorationContext<'a> {
    pub fn dungeon(dungeon_id: u16, dungeon_name: &'a str) -> Self {
        Self {
            dungeon_id: Some(dungeon_id),
            dungeon_name: Some(dungeon_name),
        }
    }
}

/// Every non-neutral exploration multiplier, in aggregation order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationModifiers {
    pub entries: Vec<ExplorationEntry>,
}

impl ExplorationModifiers {
    /// Product of all entries matching `context`.
    pub fn time_multiplier(&self, context: &ExplorationContext<'_>) -> f64 {
        self.entries
            .iter()
            .filter(|entry| entry.matches(context))
            .map(|entry| entry.multiplier)
            .product()
    }
}

/// Reducer for [`Routes::EXPLORATION`].
#[derive(Clone, Debug, Default)]
pub struct ExplorationAccumulator {
    entries: Vec<ExplorationEntry>,
}

impl ExplorationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for ExplorationAccumulator {
    type Output = ExplorationModifiers;

    const ROUTE: Routes = Routes::EXPLORATION;
    const CATEGORY: &'static str = "exploration";

    fn apply(
        &mut self,
        payload: &Payload<'_>,
        _ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        let multiplier = match payload.effect_type() {
            EffectType::ExplorationTimeMultiplier => {
                payload.require_value(ValueKey::Multiplier)?
            }
            EffectType::ExplorationTimePercent => {
                (1.0 + payload.require_value(ValueKey::ValuePercent)? / 100.0).max(0.0)
            }
            _ => return Err(unhandled(payload, Self::CATEGORY)),
        };

        let dungeon_id = payload.optional_id(ParamKey::DungeonId)?;
        if multiplier != 1.0 {
            self.entries.push(ExplorationEntry {
                multiplier,
                dungeon_id,
                dungeon_name: payload.text(TextKey::DungeonName).map(str::to_owned),
            });
        }
        Ok(())
    }

    fn build(self) -> ExplorationModifiers {
        ExplorationModifiers {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Effect;
    use crate::effect::decode;
    use crate::registry::EffectRegistry;

    fn fold(effects: &[Effect]) -> ExplorationModifiers {
        let registry = EffectRegistry::build();
        let ctx = HandlerContext::new(&registry, None);
        let mut acc = ExplorationAccumulator::new();
        for effect in effects {
            acc.apply(&decode(effect, 1), &ctx).expect("valid effect");
        }
        acc.build()
    }

    #[test]
    fn neutral_entries_are_dropped() {
        let modifiers = fold(&[
            Effect::new(EffectType::ExplorationTimeMultiplier).value(ValueKey::Multiplier, 1.0),
            Effect::new(EffectType::ExplorationTimePercent).value(ValueKey::ValuePercent, 0.0),
        ]);
        assert!(modifiers.entries.is_empty());
    }

    #[test]
    fn scoped_entries_only_apply_in_their_dungeon() {
        let modifiers = fold(&[
            Effect::new(EffectType::ExplorationTimeMultiplier).value(ValueKey::Multiplier, 0.8),
            Effect::new(EffectType::ExplorationTimePercent)
                .value(ValueKey::ValuePercent, -50.0)
                .param(ParamKey::DungeonId, 4),
            Effect::new(EffectType::ExplorationTimeMultiplier)
                .value(ValueKey::Multiplier, 0.9)
                .text(TextKey::DungeonName, "Sunken Archive"),
        ]);

        let anywhere = ExplorationContext::default();
        assert!((modifiers.time_multiplier(&anywhere) - 0.8).abs() < 1e-9);

        let crypt = ExplorationContext::dungeon(4, "Crypt");
        assert!((modifiers.time_multiplier(&crypt) - 0.4).abs() < 1e-9);

        let archive = ExplorationContext::dungeon(7, "Sunken Archive");
        assert!((modifiers.time_multiplier(&archive) - 0.72).abs() < 1e-9);
    }

    #[test]
    fn percent_below_minus_hundred_floors_at_zero() {
        let modifiers = fold(&[
            Effect::new(EffectType::ExplorationTimePercent).value(ValueKey::ValuePercent, -150.0),
        ]);

        assert_eq!(modifiers.entries.len(), 1);
        assert_eq!(modifiers.time_multiplier(&ExplorationContext::default()), 0.0);
    }
}
