use std::collections::{BTreeMap, BTreeSet};

use crate::accumulate::{ScopedMultipliers, ScopedScale};

/// A chance to inflict a status on hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInfliction {
    pub status: u16,
    pub chance_percent: f64,
    pub duration: Option<u32>,
}

/// Statuses cured automatically at end of turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoCure {
    pub all: bool,
    pub statuses: BTreeSet<u16>,
}

impl AutoCure {
    pub fn cures(&self, status: u16) -> bool {
        self.all || self.statuses.contains(&status)
    }
}

/// Status resistance, infliction and immunity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    /// Scale on the actor's resistance to each status.
    pub resistance: ScopedMultipliers<u16>,
    pub inflictions: BTreeMap<String, StatusInfliction>,
    /// Scale on the chance of every infliction of a status.
    pub inflict_multiplier: ScopedMultipliers<u16>,
    pub berserk_chance: Option<f64>,
    pub auto_cure: AutoCure,
    pub immunities: BTreeSet<u16>,
}

impl StatusEffects {
    pub fn is_immune(&self, status: u16) -> bool {
        self.immunities.contains(&status)
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct StatusDraft {
    pub resistance: ScopedScale<u16>,
    pub inflictions: BTreeMap<String, StatusInfliction>,
    pub inflict_multiplier: ScopedScale<u16>,
    pub berserk_chance: Option<f64>,
    pub auto_cure: AutoCure,
    pub immunities: BTreeSet<u16>,
}

impl StatusDraft {
    pub fn build(self) -> StatusEffects {
        StatusEffects {
            resistance: self.resistance.resolve(),
            inflictions: self.inflictions,
            inflict_multiplier: self.inflict_multiplier.resolve(),
            berserk_chance: self.berserk_chance,
            auto_cure: self.auto_cure,
            immunities: self.immunities,
        }
    }
}
