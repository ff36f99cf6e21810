//! Content loaders for reading skill data from files.
//!
//! Every loader offers `load(path)` for files on disk, a string entry point
//! for embedded or generated content, and `bundled()` for the sample data
//! compiled into this crate.

pub mod config;
pub mod skills;
pub mod spells;

pub use config::ConfigLoader;
pub use skills::{SkillCatalog, SkillLoader};
pub use spells::SpellLoader;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a content file; `what` names the content in the error.
pub(crate) fn read_file(path: &Path, what: &str) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))
}

/// Parses RON text into `T`; `what` names the content in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(text: &str, what: &str) -> LoadResult<T> {
    ron::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
