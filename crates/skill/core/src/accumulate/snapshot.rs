//! Key-addressed snapshot of resolved modifiers, consumed by the summary.

use std::collections::{BTreeMap, BTreeSet};

use crate::effect::ModifierKey;

/// Modifier values addressed by [`ModifierKey`], grouped by how they combine.
///
/// The Combat-Stat and Battle-Effect accumulators record every contribution
/// here alongside their typed state, so the summary can list what a
/// character has without re-deriving it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSnapshot {
    /// Additive contributions (percents or flat amounts), summed.
    pub additive: BTreeMap<ModifierKey, f64>,
    /// Multipliers, multiplied together.
    pub multipliers: BTreeMap<ModifierKey, f64>,
    /// Permissive caps and chances, largest kept.
    pub max_values: BTreeMap<ModifierKey, f64>,
    /// Restrictive caps, smallest kept.
    pub min_values: BTreeMap<ModifierKey, f64>,
    /// Integer counts, summed.
    pub integers: BTreeMap<ModifierKey, i64>,
    /// Presence-only switches.
    pub flags: BTreeSet<ModifierKey>,
}

impl ModifierSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: ModifierKey, amount: f64) {
        *self.additive.entry(key).or_insert(0.0) += amount;
    }

    pub fn multiply(&mut self, key: ModifierKey, factor: f64) {
        *self.multipliers.entry(key).or_insert(1.0) *= factor;
    }

    pub fn record_max(&mut self, key: ModifierKey, value: f64) {
        self.max_values
            .entry(key)
            .and_modify(|current| *current = current.max(value))
            .or_insert(value);
    }

    pub fn record_min(&mut self, key: ModifierKey, value: f64) {
        self.min_values
            .entry(key)
            .and_modify(|current| *current = current.min(value))
            .or_insert(value);
    }

    pub fn add_integer(&mut self, key: ModifierKey, amount: i64) {
        let entry = self.integers.entry(key).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Overwrites an integer; for last-write-wins choices.
    pub fn set_integer(&mut self, key: ModifierKey, value: i64) {
        self.integers.insert(key, value);
    }

    pub fn set_flag(&mut self, key: ModifierKey) {
        self.flags.insert(key);
    }

    pub fn is_empty(&self) -> bool {
        self.additive.is_empty()
            && self.multipliers.is_empty()
            && self.max_values.is_empty()
            && self.min_values.is_empty()
            && self.integers.is_empty()
            && self.flags.is_empty()
    }

    /// Every key that carries a value, in ascending raw order.
    pub fn keys(&self) -> BTreeSet<ModifierKey> {
        self.additive
            .keys()
            .chain(self.multipliers.keys())
            .chain(self.max_values.keys())
            .chain(self.min_values.keys())
            .chain(self.integers.keys())
            .chain(self.flags.iter())
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectType;

    #[test]
    fn combination_rules_per_kind() {
        let key = ModifierKey::new(EffectType::DodgeCap, 0, 0);
        let mut snapshot = ModifierSnapshot::new();

        snapshot.record_min(key, 40.0);
        snapshot.record_min(key, 25.0);
        snapshot.record_max(key, 10.0);
        snapshot.record_max(key, 30.0);
        snapshot.multiply(key, 1.5);
        snapshot.multiply(key, 2.0);
        snapshot.add(key, 5.0);
        snapshot.add(key, 7.5);

        assert_eq!(snapshot.min_values[&key], 25.0);
        assert_eq!(snapshot.max_values[&key], 30.0);
        assert_eq!(snapshot.multipliers[&key], 3.0);
        assert_eq!(snapshot.additive[&key], 12.5);
        assert_eq!(snapshot.keys().len(), 1);
    }
}
