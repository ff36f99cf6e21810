//! Check that every skill in a catalog aggregates cleanly
//!
//! Each skill is aggregated on its own against a neutral stat snapshot, so a
//! failure points at exactly one skill.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use skill_core::{ActorStats, AggregationOptions, EffectRegistry, SkillAggregator};

use crate::utils::load_catalog;

/// Aggregate every skill of a catalog on its own and report failures
#[derive(Parser)]
pub struct CheckCatalog {
    /// Skill catalog RON file (defaults to the bundled sample catalog)
    #[arg(short, long, value_name = "RON")]
    catalog: Option<PathBuf>,
}

impl CheckCatalog {
    pub fn execute(self) -> Result<()> {
        let catalog = load_catalog(self.catalog.as_deref())?;

        let registry = EffectRegistry::shared();
        let missing = registry.missing_handlers();
        if !missing.is_empty() {
            anyhow::bail!("Registry has battle-routed types without handlers: {:?}", missing);
        }

        let aggregator = SkillAggregator::new(registry, AggregationOptions::default());
        let stats = ActorStats::default();

        let mut failures = 0usize;
        for skill in catalog.iter() {
            match aggregator.aggregate(std::slice::from_ref(skill), Some(&stats)) {
                Ok(_) => tracing::debug!(skill_id = skill.id, "ok"),
                Err(e) => {
                    failures += 1;
                    println!(
                        "{} [{}] {} {}",
                        style("FAIL").bold().red(),
                        e.error_code(),
                        skill.name,
                        e
                    );
                }
            }
        }

        println!();
        println!(
            "{} {} skills, {} failed",
            style("Checked:").bold().cyan(),
            catalog.len(),
            failures
        );

        if failures > 0 {
            anyhow::bail!("{} skill(s) failed to aggregate", failures);
        }
        println!("{}", style("All skills aggregate cleanly").green());
        Ok(())
    }
}
