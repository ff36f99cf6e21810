//! Engine configuration loader.

use std::path::Path;

use skill_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path, "engine config")?;
        Self::from_toml(&content)
    }

    /// Parse config data from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine config TOML: {}", e))?;

        Ok(config)
    }

    /// Bundled default configuration.
    pub fn bundled() -> LoadResult<EngineConfig> {
        Self::from_toml(include_str!("../../data/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn summary_can_be_disabled() {
        let config = ConfigLoader::from_toml("include_summary = false").unwrap();
        assert!(!config.include_summary);
    }

    #[test]
    fn bundled_config_parses() {
        assert!(ConfigLoader::bundled().unwrap().include_summary);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = ConfigLoader::from_toml("include_summary = \"yes\"").unwrap_err();
        assert!(err.to_string().contains("engine config TOML"));
    }
}
