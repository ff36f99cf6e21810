//! UI-facing modifier summary.
//!
//! Merges the Combat-Stat and Battle-Effect snapshots into one list sorted
//! by raw [`ModifierKey`]. Types routed away from the summary are skipped.
//! Conditional types (whose value depends on the opponent or the turn) are
//! listed without a value.

use std::collections::BTreeMap;

use crate::accumulate::ModifierSnapshot;
use crate::effect::{EffectType, ModifierKey, Routes};
use crate::registry::EffectRegistry;

/// Aggregated value behind one summary entry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", tag = "kind", content = "value"))]
pub enum SummaryValue {
    Additive(f64),
    Multiplier(f64),
    Max(f64),
    Min(f64),
    Integer(i64),
    Flag,
}

impl SummaryValue {
    /// Picks the value a snapshot holds for `key`.
    ///
    /// Each key is written through one combination rule, so at most one
    /// lookup hits in practice; the order only fixes the result otherwise.
    fn from_snapshot(snapshot: &ModifierSnapshot, key: &ModifierKey) -> Option<Self> {
        if let Some(value) = snapshot.integers.get(key) {
            return Some(Self::Integer(*value));
        }
        if let Some(value) = snapshot.additive.get(key) {
            return Some(Self::Additive(*value));
        }
        if let Some(value) = snapshot.multipliers.get(key) {
            return Some(Self::Multiplier(*value));
        }
        if let Some(value) = snapshot.max_values.get(key) {
            return Some(Self::Max(*value));
        }
        if let Some(value) = snapshot.min_values.get(key) {
            return Some(Self::Min(*value));
        }
        snapshot.flags.contains(key).then_some(Self::Flag)
    }
}

/// One line of the modifier summary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SummaryEntry {
    pub key: ModifierKey,
    pub effect_type: EffectType,
    pub slot: u8,
    pub param: u16,
    /// `None` for conditional entries.
    pub value: Option<SummaryValue>,
    pub conditional: bool,
}

/// Every modifier a character has, for display.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSummary {
    entries: Vec<SummaryEntry>,
}

impl ModifierSummary {
    /// Builds the summary; on a key present in both snapshots the
    /// Combat-Stat entry is kept.
    pub fn build(
        registry: &EffectRegistry,
        combat_stats: &ModifierSnapshot,
        battle_effects: &ModifierSnapshot,
    ) -> Self {
        let mut merged: BTreeMap<ModifierKey, SummaryValue> = BTreeMap::new();
        for snapshot in [battle_effects, combat_stats] {
            for key in snapshot.keys() {
                if let Some(value) = SummaryValue::from_snapshot(snapshot, &key) {
                    merged.insert(key, value);
                }
            }
        }

        let entries = merged
            .into_iter()
            .filter_map(|(key, value)| {
                let effect_type = key.effect_type()?;
                if !registry
                    .routes(effect_type)
                    .contains(Routes::MODIFIER_SUMMARY)
                {
                    return None;
                }
                let conditional = effect_type.is_conditional();
                Some(SummaryEntry {
                    key,
                    effect_type,
                    slot: key.slot(),
                    param: key.param(),
                    value: (!conditional).then_some(value),
                    conditional,
                })
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn get(&self, key: ModifierKey) -> Option<&SummaryEntry> {
        self.entries
            .binary_search_by_key(&key, |entry| entry.key)
            .ok()
            .map(|index| &self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.iter()
    }
}
