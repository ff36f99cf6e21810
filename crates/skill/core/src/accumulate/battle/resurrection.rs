use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{HpScale, ResurrectionPassiveKind};

/// Chance to be saved from a killing blow.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RescueRule {
    pub chance_percent: f64,
    pub hp_scale: HpScale,
    pub hp_percent: Option<f64>,
    /// Minimum character level for the rule to apply.
    pub min_level: Option<u32>,
    pub instant: bool,
}

/// Chance to revive a fallen ally.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveResurrection {
    pub chance_percent: f64,
    pub hp_scale: HpScale,
    pub hp_percent: Option<f64>,
    pub max_triggers: Option<u32>,
    pub instant: bool,
}

/// Penalties waived on revival.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitalize {
    pub remove_penalties: bool,
    pub remember_skills: bool,
}

/// Revival rules for the battle simulator and the dungeon run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResurrectionEffects {
    pub rescue: BTreeMap<String, RescueRule>,
    pub active: BTreeMap<String, ActiveResurrection>,
    /// Guaranteed revivals per battle, if granted.
    pub forced_max_triggers: Option<u32>,
    pub vitalize: Option<Vitalize>,
    /// Shortest interval between summon revivals.
    pub summon_every_turns: Option<u32>,
    pub passive: BTreeSet<ResurrectionPassiveKind>,
    pub passive_instant: bool,
    /// Shortest interval between sacrifice revivals.
    pub sacrifice_interval: Option<u32>,
}

impl ResurrectionEffects {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
