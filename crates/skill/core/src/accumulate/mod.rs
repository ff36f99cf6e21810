//! Category accumulators.
//!
//! Each output category has one accumulator. It starts neutral (multipliers
//! at 1.0, sums at 0.0, empty sets), folds in every effect routed to it and
//! finally [`Accumulator::build`]s an immutable result. Accumulators never
//! read each other's state and live only for one aggregation call.

pub mod battle;
pub mod combat_stat;
pub mod equipment;
pub mod exploration;
pub mod reward;
pub mod snapshot;
pub mod spellbook;

use std::collections::BTreeMap;

use crate::effect::{Payload, Routes};
use crate::error::{ConfigError, ConfigErrorKind};
use crate::handlers::HandlerContext;

pub use battle::{
    BattleEffectAccumulator, BattleEffects, CombatEffects, DamageEffects, MiscEffects,
    ResurrectionEffects, SpellEffects, StatusEffects,
};
pub use combat_stat::{CombatStatAccumulator, CombatStatInputs, ConversionKind, StatConversion};
pub use equipment::{EquipmentSlotAccumulator, EquipmentSlots};
pub use exploration::{
    ExplorationAccumulator, ExplorationContext, ExplorationEntry, ExplorationModifiers,
};
pub use reward::{RewardAccumulator, RewardChannel, RewardComponents, RewardScale};
pub use snapshot::ModifierSnapshot;
pub use spellbook::{SpellLoadout, Spellbook, SpellbookAccumulator};

/// A pure reducer for one output category.
pub trait Accumulator {
    /// Immutable result handed to the consuming service.
    type Output;

    /// Route bit that sends effects to this accumulator.
    const ROUTE: Routes;

    /// Category name used in unregistered-handler errors.
    const CATEGORY: &'static str;

    /// Folds one validated, enabled effect into the running state.
    fn apply(&mut self, payload: &Payload<'_>, ctx: &HandlerContext<'_>)
    -> Result<(), ConfigError>;

    /// Finalizes the running state.
    fn build(self) -> Self::Output;
}

/// Error for an effect routed to a category that does not handle its type.
pub(crate) fn unhandled(payload: &Payload<'_>, category: &'static str) -> ConfigError {
    payload.error(category, ConfigErrorKind::UnregisteredHandler)
}

// ============================================================================
// Scale Channels
// ============================================================================

/// Additive percents and multiplicative factors feeding one scale.
///
/// Resolves to `max(0, 1 + Σpercent / 100) × Πmultiplier`: percents stack
/// with each other first, multipliers then compound on top.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleChannel {
    pub percent_sum: f64,
    pub product: f64,
}

impl ScaleChannel {
    pub const NEUTRAL: Self = Self {
        percent_sum: 0.0,
        product: 1.0,
    };

    pub fn add_percent(&mut self, percent: f64) {
        self.percent_sum += percent;
    }

    pub fn multiply(&mut self, factor: f64) {
        self.product *= factor;
    }

    /// Combines two channels as if every contribution went to one.
    pub fn merged(self, other: Self) -> Self {
        Self {
            percent_sum: self.percent_sum + other.percent_sum,
            product: self.product * other.product,
        }
    }

    pub fn resolve(&self) -> f64 {
        (1.0 + self.percent_sum / 100.0).max(0.0) * self.product
    }
}

impl Default for ScaleChannel {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Scale channels for a discriminated family (per damage type, per status,
/// per school) plus one channel that applies to every variant.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopedScale<K: Ord> {
    all: ScaleChannel,
    scoped: BTreeMap<K, ScaleChannel>,
}

impl<K: Ord + Copy> ScopedScale<K> {
    pub fn new() -> Self {
        Self {
            all: ScaleChannel::NEUTRAL,
            scoped: BTreeMap::new(),
        }
    }

    /// Channel for one variant, or the shared channel when `scope` is `None`.
    pub fn channel(&mut self, scope: Option<K>) -> &mut ScaleChannel {
        match scope {
            Some(key) => self.scoped.entry(key).or_default(),
            None => &mut self.all,
        }
    }

    pub fn resolve(&self) -> ScopedMultipliers<K> {
        ScopedMultipliers {
            all: self.all.resolve(),
            scoped: self
                .scoped
                .iter()
                .map(|(key, channel)| (*key, self.all.merged(*channel).resolve()))
                .collect(),
        }
    }
}

impl<K: Ord + Copy> Default for ScopedScale<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved [`ScopedScale`]: one multiplier per named variant, and the shared
/// multiplier for variants nothing targeted specifically.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScopedMultipliers<K: Ord> {
    pub all: f64,
    pub scoped: BTreeMap<K, f64>,
}

impl<K: Ord> ScopedMultipliers<K> {
    pub fn get(&self, key: &K) -> f64 {
        self.scoped.get(key).copied().unwrap_or(self.all)
    }
}

impl<K: Ord> Default for ScopedMultipliers<K> {
    fn default() -> Self {
        Self {
            all: 1.0,
            scoped: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percents_stack_before_multipliers() {
        let mut channel = ScaleChannel::NEUTRAL;
        channel.add_percent(20.0);
        channel.add_percent(10.0);
        channel.multiply(1.5);

        assert!((channel.resolve() - 1.95).abs() < 1e-9);
    }

    #[test]
    fn negative_percent_floors_at_zero() {
        let mut channel = ScaleChannel::NEUTRAL;
        channel.add_percent(-150.0);
        channel.multiply(2.0);

        assert_eq!(channel.resolve(), 0.0);
    }

    #[test]
    fn scoped_channels_include_the_shared_one() {
        let mut scale = ScopedScale::<u16>::new();
        scale.channel(None).add_percent(10.0);
        scale.channel(Some(3)).multiply(2.0);

        let resolved = scale.resolve();
        assert!((resolved.get(&3) - 2.2).abs() < 1e-9);
        assert!((resolved.get(&9) - 1.1).abs() < 1e-9);
    }
}
