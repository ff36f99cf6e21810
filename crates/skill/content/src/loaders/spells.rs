//! Spell definition loader.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{EngineConfig, SpellDefinition};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Spell file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for spell definitions from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load spell definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SpellDefinition>> {
        let content = read_file(path, "spell catalog")?;
        Self::from_ron(&content)
    }

    /// Parse spell definitions from RON text.
    ///
    /// Rejects duplicate spell ids and tiers outside `1..=MAX_SPELL_TIER`.
    pub fn from_ron(content: &str) -> LoadResult<Vec<SpellDefinition>> {
        let catalog: SpellCatalog = parse_ron(content, "spell catalog")?;

        let mut seen = BTreeSet::new();
        for spell in &catalog.spells {
            if !seen.insert(spell.id) {
                anyhow::bail!("Duplicate spell id {} ({})", spell.id, spell.name);
            }
            if !(1..=EngineConfig::MAX_SPELL_TIER).contains(&spell.tier) {
                anyhow::bail!(
                    "Spell {} ({}) has tier {}; expected 1..={}",
                    spell.id,
                    spell.name,
                    spell.tier,
                    EngineConfig::MAX_SPELL_TIER
                );
            }
        }

        Ok(catalog.spells)
    }

    /// Bundled sample spells.
    pub fn bundled() -> LoadResult<Vec<SpellDefinition>> {
        Self::from_ron(include_str!("../../data/spells.ron"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::SpellSchool;

    #[test]
    fn bundled_spells_parse() {
        let spells = SpellLoader::bundled().unwrap();
        let fireball = spells.iter().find(|spell| spell.id == 3).unwrap();
        assert_eq!(fireball.school, SpellSchool::Mage);
        assert_eq!(fireball.tier, 2);
        assert_eq!(fireball.unlock_level, 10);
    }

    #[test]
    fn tier_out_of_range_is_rejected() {
        let err = SpellLoader::from_ron(
            r#"(spells: [(id: 1, name: "Nova", school: mage, tier: 9, unlockLevel: 1)])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("tier 9"));

        assert!(
            SpellLoader::from_ron(
                r#"(spells: [(id: 1, name: "Fizzle", school: mage, tier: 0, unlockLevel: 1)])"#,
            )
            .is_err()
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SpellLoader::from_ron(
            r#"(spells: [
                (id: 1, name: "A", school: mage, tier: 1, unlockLevel: 1),
                (id: 1, name: "B", school: priest, tier: 1, unlockLevel: 1),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate spell id 1"));
    }
}
