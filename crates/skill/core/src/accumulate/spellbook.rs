//! Spellbook accumulator and spell loadout resolution.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{ArrayKey, ParamKey, SpellDefinition, SpellSchool};
use crate::effect::{EffectType, Payload, Routes};
use crate::error::ConfigError;
use crate::handlers::HandlerContext;

use super::{Accumulator, unhandled};

/// Spell access granted or revoked by skills.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spellbook {
    /// Spells learned outright, minus any that are forgotten.
    pub learned: BTreeSet<u16>,
    /// Spells that can never be cast, whatever else grants them.
    pub forgotten: BTreeSet<u16>,
    /// Highest unlocked tier per school.
    pub tier_unlocks: BTreeMap<SpellSchool, u8>,
}

impl Spellbook {
    pub fn unlocked_tier(&self, school: SpellSchool) -> u8 {
        self.tier_unlocks.get(&school).copied().unwrap_or(0)
    }

    /// Resolves the castable spells for a character at `level`.
    ///
    /// A spell is castable when its school has unlocked its tier and the
    /// character meets its unlock level. Learned spells skip both checks.
    /// Forgotten spells are never castable.
    pub fn loadout(&self, spells: &[SpellDefinition], level: u32) -> SpellLoadout {
        let unlocked = spells
            .iter()
            .filter(|spell| spell.tier <= self.unlocked_tier(spell.school))
            .filter(|spell| spell.unlock_level <= level)
            .map(|spell| spell.id);

        let spell_ids: BTreeSet<u16> = unlocked
            .chain(self.learned.iter().copied())
            .filter(|id| !self.forgotten.contains(id))
            .collect();

        SpellLoadout {
            spell_ids: spell_ids.into_iter().collect(),
        }
    }
}

/// Castable spell ids, ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellLoadout {
    pub spell_ids: Vec<u16>,
}

impl SpellLoadout {
    pub fn contains(&self, spell_id: u16) -> bool {
        self.spell_ids.binary_search(&spell_id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.spell_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spell_ids.is_empty()
    }
}

/// Reducer for [`Routes::SPELLBOOK`].
#[derive(Clone, Debug, Default)]
pub struct SpellbookAccumulator {
    book: Spellbook,
}

impl SpellbookAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for SpellbookAccumulator {
    type Output = Spellbook;

    const ROUTE: Routes = Routes::SPELLBOOK;
    const CATEGORY: &'static str = "spellbook";

    fn apply(
        &mut self,
        payload: &Payload<'_>,
        _ctx: &HandlerContext<'_>,
    ) -> Result<(), ConfigError> {
        match payload.effect_type() {
            EffectType::SpellLearn => {
                let ids = payload.ids(ParamKey::SpellId, ArrayKey::SpellIds)?;
                self.book.learned.extend(ids);
            }
            EffectType::SpellForget => {
                let ids = payload.ids(ParamKey::SpellId, ArrayKey::SpellIds)?;
                self.book.forgotten.extend(ids);
            }
            EffectType::SpellTierUnlock => {
                let school: SpellSchool = payload.code(ParamKey::School)?;
                let tier = payload
                    .optional_tier()?
                    .ok_or_else(|| payload.missing(ParamKey::Tier.name()))?;

                let unlocked = self.book.tier_unlocks.entry(school).or_insert(0);
                *unlocked = (*unlocked).max(tier);
            }
            _ => return Err(unhandled(payload, Self::CATEGORY)),
        }
        Ok(())
    }

    fn build(self) -> Spellbook {
        let mut book = self.book;
        let forgotten = &book.forgotten;
        book.learned.retain(|id| !forgotten.contains(id));
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Effect;
    use crate::effect::decode;
    use crate::error::ConfigErrorKind;
    use crate::registry::EffectRegistry;

    fn fold(effects: &[Effect]) -> Result<Spellbook, ConfigError> {
        let registry = EffectRegistry::build();
        let ctx = HandlerContext::new(&registry, None);
        let mut acc = SpellbookAccumulator::new();
        for effect in effects {
            acc.apply(&decode(effect, 1), &ctx)?;
        }
        Ok(acc.build())
    }

    fn unlock(school: SpellSchool, tier: i32) -> Effect {
        Effect::new(EffectType::SpellTierUnlock)
            .param(ParamKey::School, school as i32)
            .param(ParamKey::Tier, tier)
    }

    fn mage_spells() -> Vec<SpellDefinition> {
        vec![
            SpellDefinition::new(1, "Spark", SpellSchool::Mage, 1, 1),
            SpellDefinition::new(2, "Flame Lance", SpellSchool::Mage, 2, 10),
            SpellDefinition::new(3, "Meteor", SpellSchool::Mage, 3, 20),
            SpellDefinition::new(10, "Mend", SpellSchool::Priest, 1, 1),
        ]
    }

    #[test]
    fn loadout_respects_tier_and_level() {
        let book = fold(&[unlock(SpellSchool::Mage, 2)]).unwrap();

        let loadout = book.loadout(&mage_spells(), 15);
        assert_eq!(loadout.spell_ids, vec![1, 2]);

        let early = book.loadout(&mage_spells(), 5);
        assert_eq!(early.spell_ids, vec![1]);
    }

    #[test]
    fn tier_unlock_keeps_highest() {
        let book = fold(&[unlock(SpellSchool::Priest, 3), unlock(SpellSchool::Priest, 1)]).unwrap();
        assert_eq!(book.unlocked_tier(SpellSchool::Priest), 3);
        assert_eq!(book.unlocked_tier(SpellSchool::Mage), 0);
    }

    #[test]
    fn forgotten_wins_over_learned_and_unlocked() {
        let book = fold(&[
            unlock(SpellSchool::Mage, 3),
            Effect::new(EffectType::SpellLearn).array(ArrayKey::SpellIds, [10, 12]),
            Effect::new(EffectType::SpellForget).param(ParamKey::SpellId, 12),
            Effect::new(EffectType::SpellForget).param(ParamKey::SpellId, 2),
        ])
        .unwrap();

        assert_eq!(book.learned, BTreeSet::from([10]));
        let loadout = book.loadout(&mage_spells(), 30);
        assert_eq!(loadout.spell_ids, vec![1, 3, 10]);
        assert!(!loadout.contains(2));
    }

    #[test]
    fn out_of_range_tier_is_invalid() {
        let err = fold(&[unlock(SpellSchool::Mage, 9)]).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidCode(9));
        assert_eq!(err.field, "tier");
    }
}
