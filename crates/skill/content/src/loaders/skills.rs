//! Skill catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{EngineConfig, SkillDefinition, SkillId};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Skill file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SkillFile {
    skills: Vec<SkillDefinition>,
}

/// Bundled sample skills, one RON file per theme.
const BUNDLED: &[(&str, &str)] = &[
    ("warrior", include_str!("../../data/skills/warrior.ron")),
    ("scout", include_str!("../../data/skills/scout.ron")),
    ("scholar", include_str!("../../data/skills/scholar.ron")),
];

// ============================================================================
// Skill Catalog
// ============================================================================

/// Id-indexed set of skill definitions.
///
/// Every skill in a catalog has a unique id and its effect indices form the
/// sequence `0..n`, so aggregation can rely on a total effect order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillCatalog {
    skills: BTreeMap<SkillId, SkillDefinition>,
}

impl SkillCatalog {
    /// Builds a catalog, rejecting duplicate ids and broken effect indices.
    pub fn new(skills: Vec<SkillDefinition>) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for skill in skills {
            catalog.insert(skill)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, mut skill: SkillDefinition) -> LoadResult<()> {
        normalize_indices(&mut skill)?;
        if self.skills.contains_key(&skill.id) {
            anyhow::bail!("Duplicate skill id {} ({})", skill.id, skill.name);
        }
        self.skills.insert(skill.id, skill);
        Ok(())
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    /// Clones the requested skills, failing on the first unknown id.
    pub fn select(&self, ids: &[SkillId]) -> LoadResult<Vec<SkillDefinition>> {
        ids.iter()
            .map(|id| {
                self.get(*id)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown skill id {}", id))
            })
            .collect()
    }

    /// Moves every skill of `other` into this catalog.
    pub fn merge(&mut self, other: SkillCatalog) -> LoadResult<()> {
        for skill in other.skills.into_values() {
            self.insert(skill)?;
        }
        Ok(())
    }
}

/// Checks that effect indices are exactly `0..n`.
///
/// Files that omit `index` on every effect get positional indices.
fn normalize_indices(skill: &mut SkillDefinition) -> LoadResult<()> {
    let count = skill.effects.len();
    if count > EngineConfig::MAX_EFFECTS_PER_SKILL {
        anyhow::bail!(
            "Skill {} ({}) has {} effects; at most {} are allowed",
            skill.id,
            skill.name,
            count,
            EngineConfig::MAX_EFFECTS_PER_SKILL
        );
    }
    if count > 1 && skill.effects.iter().all(|effect| effect.index == 0) {
        for (position, effect) in skill.effects.iter_mut().enumerate() {
            effect.index = position as u16;
        }
        return Ok(());
    }

    let mut indices: Vec<u16> = skill.effects.iter().map(|effect| effect.index).collect();
    indices.sort_unstable();
    for (expected, index) in indices.iter().enumerate() {
        if usize::from(*index) != expected {
            anyhow::bail!(
                "Skill {} ({}) has effect index {} where {} was expected; indices must be unique and contiguous from 0",
                skill.id,
                skill.name,
                index,
                expected
            );
        }
    }
    Ok(())
}

// ============================================================================
// Loader
// ============================================================================

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a RON file with a top-level `skills` list
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path, "skill catalog")?;
        Self::from_ron(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a skill catalog from RON text.
    pub fn from_ron(content: &str) -> LoadResult<SkillCatalog> {
        let file: SkillFile = parse_ron(content, "skill catalog")?;

        SkillCatalog::new(file.skills)
    }

    /// All bundled sample skills merged into one catalog.
    pub fn bundled() -> LoadResult<SkillCatalog> {
        let mut catalog = SkillCatalog::default();
        for (name, content) in BUNDLED {
            let part = Self::from_ron(content)
                .map_err(|e| anyhow::anyhow!("Bundled skill file '{}': {}", name, e))?;
            tracing::debug!(file = name, skills = part.len(), "loaded bundled skills");
            catalog.merge(part)?;
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::{Effect, EffectType};

    #[test]
    fn parses_effect_maps() {
        let catalog = SkillLoader::from_ron(
            r#"(skills: [
                (id: 1, name: "Edge", effects: [
                    (kind: statPercent, index: 0, params: {stat: 1}, values: {valuePercent: 20.0}),
                ]),
            ])"#,
        )
        .unwrap();

        let skill = catalog.get(1).unwrap();
        assert_eq!(skill.effects[0].kind, EffectType::StatPercent);
        assert_eq!(skill.effects[0].params[&skill_core::ParamKey::Stat], 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SkillLoader::from_ron(
            r#"(skills: [(id: 1, name: "A", effects: []), (id: 1, name: "B", effects: [])])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate skill id 1"));
    }

    #[test]
    fn index_gaps_are_rejected() {
        let err = SkillLoader::from_ron(
            r#"(skills: [(id: 2, name: "Gap", effects: [
                (kind: skillTag, index: 0),
                (kind: skillTag, index: 2),
            ])])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("effect index 2"));
    }

    #[test]
    fn duplicate_indices_are_rejected() {
        let err = SkillLoader::from_ron(
            r#"(skills: [(id: 2, name: "Twice", effects: [
                (kind: skillTag, index: 1),
                (kind: skillTag, index: 1),
            ])])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Skill 2"));
    }

    #[test]
    fn omitted_indices_become_positional() {
        let catalog = SkillLoader::from_ron(
            r#"(skills: [(id: 3, name: "Plain", effects: [
                (kind: skillTag),
                (kind: battleCry),
                (kind: statusVisual),
            ])])"#,
        )
        .unwrap();

        let indices: Vec<u16> = catalog.get(3).unwrap().effects.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn oversized_skills_are_rejected() {
        let limit = EngineConfig::MAX_EFFECTS_PER_SKILL;
        let effects = vec![Effect::new(EffectType::SkillTag); limit + 1];
        let skill = SkillDefinition {
            id: 4,
            name: "Sprawl".to_string(),
            effects,
        };

        let err = SkillCatalog::new(vec![skill]).unwrap_err();
        assert!(err.to_string().contains("at most"));
    }

    #[test]
    fn select_fails_on_unknown_id() {
        let catalog = SkillLoader::bundled().unwrap();
        assert_eq!(catalog.select(&[10, 3]).unwrap().len(), 2);
        assert!(catalog.select(&[999]).is_err());
    }

    #[test]
    fn merge_rejects_overlap() {
        let mut catalog = SkillLoader::bundled().unwrap();
        let again = SkillLoader::bundled().unwrap();
        assert!(catalog.merge(again).is_err());
    }

    #[test]
    fn bundled_catalog_is_sorted_by_id() {
        let catalog = SkillLoader::bundled().unwrap();
        let ids: Vec<SkillId> = catalog.iter().map(|skill| skill.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(catalog.len(), 9);
    }
}
