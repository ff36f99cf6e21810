use std::collections::BTreeMap;

use crate::accumulate::{ScopedMultipliers, ScopedScale};
use crate::catalog::SpellSchool;

/// Changes to a spell's charge pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeModifier {
    pub initial_bonus: i32,
    pub max_bonus: i32,
    pub recovery_per_turn: i32,
}

impl ChargeModifier {
    pub fn combined(self, other: Self) -> Self {
        Self {
            initial_bonus: self.initial_bonus.saturating_add(other.initial_bonus),
            max_bonus: self.max_bonus.saturating_add(other.max_bonus),
            recovery_per_turn: self.recovery_per_turn.saturating_add(other.recovery_per_turn),
        }
    }
}

/// Spell power, charges and spell-specific modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellEffects {
    pub power: ScopedMultipliers<SpellSchool>,
    pub spell_multipliers: BTreeMap<u16, f64>,
    pub spell_taken_multipliers: BTreeMap<u16, f64>,
    /// Charge changes for every spell.
    pub charges_all: ChargeModifier,
    /// Charge changes for single spells, on top of `charges_all`.
    pub charges: BTreeMap<u16, ChargeModifier>,
    pub critical_chance_percent: f64,
    pub critical_multiplier: f64,
    pub tactic_amplify: BTreeMap<u16, f64>,
}

impl SpellEffects {
    pub fn power(&self, school: SpellSchool) -> f64 {
        self.power.get(&school)
    }

    pub fn spell_multiplier(&self, spell_id: u16) -> f64 {
        self.spell_multipliers.get(&spell_id).copied().unwrap_or(1.0)
    }

    pub fn charge_modifier(&self, spell_id: u16) -> ChargeModifier {
        self.charges
            .get(&spell_id)
            .map_or(self.charges_all, |specific| self.charges_all.combined(*specific))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SpellDraft {
    pub power: ScopedScale<SpellSchool>,
    pub spell_multipliers: BTreeMap<u16, f64>,
    pub spell_taken_multipliers: BTreeMap<u16, f64>,
    pub charges_all: ChargeModifier,
    pub charges: BTreeMap<u16, ChargeModifier>,
    pub critical_chance_percent: f64,
    pub critical_multiplier: f64,
    pub tactic_amplify: BTreeMap<u16, f64>,
}

impl SpellDraft {
    pub fn new() -> Self {
        Self {
            power: ScopedScale::new(),
            spell_multipliers: BTreeMap::new(),
            spell_taken_multipliers: BTreeMap::new(),
            charges_all: ChargeModifier::default(),
            charges: BTreeMap::new(),
            critical_chance_percent: 0.0,
            critical_multiplier: 1.0,
            tactic_amplify: BTreeMap::new(),
        }
    }

    pub fn charges_for(&mut self, spell_id: Option<u16>) -> &mut ChargeModifier {
        match spell_id {
            Some(id) => self.charges.entry(id).or_default(),
            None => &mut self.charges_all,
        }
    }

    pub fn build(self) -> SpellEffects {
        SpellEffects {
            power: self.power.resolve(),
            spell_multipliers: self.spell_multipliers,
            spell_taken_multipliers: self.spell_taken_multipliers,
            charges_all: self.charges_all,
            charges: self.charges,
            critical_chance_percent: self.critical_chance_percent,
            critical_multiplier: self.critical_multiplier,
            tactic_amplify: self.tactic_amplify,
        }
    }
}
