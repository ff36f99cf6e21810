//! Reward accumulator: experience, gold, item-drop and title scaling.

use crate::catalog::ValueKey;
use crate::effect::{EffectType, Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;

use super::{Accumulator, unhandled};

/// The four reward channels.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum RewardChannel {
    Experience,
    Gold,
    ItemDrop,
    Title,
}

impl RewardChannel {
    /// Channel and whether the effect is a bonus (vs a multiplier).
    fn of(kind: EffectType) -> Option<(Self, bool)> {
        use EffectType::*;
        Some(match kind {
            ExperienceBonus => (Self::Experience, true),
            ExperienceMultiplier => (Self::Experience, false),
            GoldBonus => (Self::Gold, true),
            GoldMultiplier => (Self::Gold, false),
            ItemDropBonus => (Self::ItemDrop, true),
            ItemDropMultiplier => (Self::ItemDrop, false),
            TitleBonus => (Self::Title, true),
            TitleMultiplier => (Self::Title, false),
            _ => return None,
        })
    }
}

/// Bonus fraction and multiplier product of one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardScale {
    /// Sum of bonuses as a fraction (`+15%` is `0.15`).
    pub bonus_sum: f64,
    pub product: f64,
}

impl RewardScale {
    pub const NEUTRAL: Self = Self {
        bonus_sum: 0.0,
        product: 1.0,
    };

    /// `max(0, product) × max(0, 1 + bonusSum)`.
    pub fn scale(&self) -> f64 {
        self.product.max(0.0) * (1.0 + self.bonus_sum).max(0.0)
    }
}

impl Default for RewardScale {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Scaling applied to battle and exploration rewards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardComponents {
    pub experience: RewardScale,
    pub gold: RewardScale,
    pub item_drop: RewardScale,
    pub title: RewardScale,
}

impl RewardComponents {
    pub fn channel(&self, channel: RewardChannel) -> &RewardScale {
        match channel {
            RewardChannel::Experience => &self.experience,
            RewardChannel::Gold => &self.gold,
            RewardChannel::ItemDrop => &self.item_drop,
            RewardChannel::Title => &self.title,
        }
    }

    fn channel_mut(&mut self, channel: RewardChannel) -> &mut RewardScale {
        match channel {
            RewardChannel::Experience => &mut self.experience,
            RewardChannel::Gold => &mut self.gold,
            RewardChannel::ItemDrop => &mut self.item_drop,
            RewardChannel::Title => &mut self.title,
        }
    }

    pub fn scale(&self, channel: RewardChannel) -> f64 {
        self.channel(channel).scale()
    }
}

/// Reducer for [`Routes::REWARD`].
#[derive(Clone, Debug, Default)]
pub struct RewardAccumulator {
    components: RewardComponents,
}

impl RewardAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for RewardAccumulator {
    type Output = RewardComponents;

    const ROUTE: Routes = Routes::REWARD;
    const CATEGORY: &'static str = "reward";

    fn apply(
        &mut self,
        payload: &Payload<'_>,
        _ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        let Some((channel, is_bonus)) = RewardChannel::of(payload.effect_type()) else {
            return Err(unhandled(payload, Self::CATEGORY));
        };

        let scale = self.components.channel_mut(channel);
        if is_bonus {
            scale.bonus_sum += payload.require_value(ValueKey::ValuePercent)? / 100.0;
        } else {
            scale.product *= payload.require_value(ValueKey::Multiplier)?;
        }
        Ok(())
    }

    fn build(self) -> RewardComponents {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Effect;
    use crate::effect::decode;
    use crate::registry::EffectRegistry;
    use strum::IntoEnumIterator;

    fn fold(effects: &[Effect]) -> RewardComponents {
        let registry = EffectRegistry::build();
        let ctx = HandlerContext::new(&registry, None);
        let mut acc = RewardAccumulator::new();
        for effect in effects {
            acc.apply(&decode(effect, 1), &ctx).expect("valid effect");
        }
        acc.build()
    }

    #[test]
    fn neutral_without_effects() {
        let rewards = fold(&[]);
        for channel in RewardChannel::iter() {
            assert_eq!(rewards.scale(channel), 1.0);
        }
    }

    #[test]
    fn gold_bonus_and_multiplier_compose() {
        let rewards = fold(&[
            Effect::new(EffectType::GoldBonus).value(ValueKey::ValuePercent, 15.0),
            Effect::new(EffectType::GoldMultiplier).value(ValueKey::Multiplier, 1.2),
        ]);

        assert!((rewards.scale(RewardChannel::Gold) - 1.38).abs() < 1e-9);
        assert_eq!(rewards.scale(RewardChannel::Experience), 1.0);
    }

    #[test]
    fn negative_parts_clamp_to_zero() {
        let rewards = fold(&[
            Effect::new(EffectType::TitleBonus).value(ValueKey::ValuePercent, -250.0),
            Effect::new(EffectType::ItemDropMultiplier).value(ValueKey::Multiplier, -1.0),
        ]);

        assert_eq!(rewards.scale(RewardChannel::Title), 0.0);
        assert_eq!(rewards.scale(RewardChannel::ItemDrop), 0.0);
    }
}
