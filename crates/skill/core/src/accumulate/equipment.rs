//! Equipment-slot accumulator.

use crate::catalog::{ParamKey, ValueKey};
use crate::effect::{EffectType, Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;

use super::{Accumulator, unhandled};

/// Extra equipment slots granted by skills.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSlots {
    /// Flat slots added, never negative.
    pub additive: i32,
    pub multiplier: f64,
}

impl EquipmentSlots {
    /// Slot count for a character whose base capacity is `base`.
    pub fn capacity(&self, base: u32) -> u32 {
        let slots = (f64::from(base) + f64::from(self.additive)) * self.multiplier;
        slots.floor().clamp(0.0, f64::from(u32::MAX)) as u32
    }
}

impl Default for EquipmentSlots {
    fn default() -> Self {
        Self {
            additive: 0,
            multiplier: 1.0,
        }
    }
}

/// Reducer for [`Routes::EQUIPMENT_SLOTS`].
#[derive(Clone, Debug, Default)]
pub struct EquipmentSlotAccumulator {
    slots: EquipmentSlots,
}

impl EquipmentSlotAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for EquipmentSlotAccumulator {
    type Output = EquipmentSlots;

    const ROUTE: Routes = Routes::EQUIPMENT_SLOTS;
    const CATEGORY: &'static str = "equipmentSlots";

    fn apply(
        &mut self,
        payload: &Payload<'_>,
        _ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        match payload.effect_type() {
            EffectType::EquipmentSlotAdditive => {
                let count = payload.require_param(ParamKey::Count)?;
                self.slots.additive = self.slots.additive.saturating_add(count);
            }
            EffectType::EquipmentSlotMultiplier => {
                self.slots.multiplier *= payload.require_value(ValueKey::Multiplier)?;
            }
            EffectType::EquipmentSlotHalving => self.slots.multiplier *= 0.5,
            _ => return Err(unhandled(payload, Self::CATEGORY)),
        }
        Ok(())
    }

    fn build(self) -> EquipmentSlots {
        EquipmentSlots {
            additive: self.slots.additive.max(0),
            multiplier: self.slots.multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Effect;
    use crate::effect::decode;
    use crate::registry::EffectRegistry;

    fn fold(effects: &[Effect]) -> EquipmentSlots {
        let registry = EffectRegistry::build();
        let ctx = HandlerContext::new(&registry, None);
        let mut acc = EquipmentSlotAccumulator::new();
        for effect in effects {
            acc.apply(&decode(effect, 1), &ctx).expect("valid effect");
        }
        acc.build()
    }

    #[test]
    fn additive_saturates_and_clamps_at_zero() {
        let huge = fold(&[
            Effect::new(EffectType::EquipmentSlotAdditive).param(ParamKey::Count, i32::MAX),
            Effect::new(EffectType::EquipmentSlotAdditive).param(ParamKey::Count, 5),
        ]);
        assert_eq!(huge.additive, i32::MAX);

        let negative =
            fold(&[Effect::new(EffectType::EquipmentSlotAdditive).param(ParamKey::Count, -3)]);
        assert_eq!(negative.additive, 0);
    }

    #[test]
    fn halving_and_capacity() {
        let slots = fold(&[
            Effect::new(EffectType::EquipmentSlotAdditive).param(ParamKey::Count, 3),
            Effect::new(EffectType::EquipmentSlotHalving),
        ]);

        assert_eq!(slots.multiplier, 0.5);
        assert_eq!(slots.capacity(6), 4);
        assert_eq!(EquipmentSlots::default().capacity(6), 6);
    }
}
