//! Utility functions for xtask commands

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use skill_content::{SkillCatalog, SkillLoader};
use skill_core::{ActorStats, SkillId};

/// Load a skill catalog from `path`, or the bundled sample catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<SkillCatalog> {
    match path {
        Some(path) => SkillLoader::load(path),
        None => SkillLoader::bundled().context("Failed to load bundled skill catalog"),
    }
}

/// Parse a comma-separated skill id list such as `1,2,3`.
pub fn parse_skill_ids(raw: &str) -> Result<Vec<SkillId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<SkillId>()
                .map_err(|e| anyhow!("Invalid skill id '{}': {}", part, e))
        })
        .collect()
}

/// Parse a six-value stat list in the order strength, wisdom, spirit,
/// vitality, agility, luck.
pub fn parse_stats(raw: &str) -> Result<ActorStats> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| anyhow!("Invalid stat value '{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>>>()?;

    match values.as_slice() {
        [strength, wisdom, spirit, vitality, agility, luck] => Ok(ActorStats::new(
            *strength, *wisdom, *spirit, *vitality, *agility, *luck,
        )),
        _ => Err(anyhow!(
            "Expected 6 stats (str,wis,spi,vit,agi,luk), got {}",
            values.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_ids_allow_spaces_and_trailing_commas() {
        assert_eq!(parse_skill_ids("1, 2,3,").unwrap(), vec![1, 2, 3]);
        assert!(parse_skill_ids("1,x").is_err());
    }

    #[test]
    fn stats_need_all_six_values() {
        let stats = parse_stats("12,8,9,30,11,7").unwrap();
        assert_eq!(stats.vitality, 30);
        assert!(parse_stats("1,2,3").is_err());
    }
}
