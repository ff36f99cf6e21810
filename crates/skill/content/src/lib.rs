//! Data-driven skill content and loaders.
//!
//! This crate reads the content the aggregation engine consumes:
//! - Skill catalogs (data-driven via RON)
//! - Spell definitions (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! A small sample catalog is bundled under `data/` for tools and tests.
//! All loaders use skill-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, SkillCatalog, SkillLoader, SpellLoader};
