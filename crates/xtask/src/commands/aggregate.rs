//! Aggregate a set of skills and print the resulting bundle
//!
//! Loads a skill catalog (the bundled sample when `--catalog` is omitted),
//! selects the requested skills and runs them through the engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use skill_content::{ConfigLoader, SpellLoader};
use skill_core::{
    AggregationOptions, CombatStat, EffectRegistry, ExplorationContext, RewardChannel,
    SkillAggregator, SkillBundle, SummaryValue,
};
use strum::IntoEnumIterator;

use crate::utils::{load_catalog, parse_skill_ids, parse_stats};

/// Aggregate a set of skills and print the resulting bundle
#[derive(Parser)]
pub struct Aggregate {
    /// Skill catalog RON file (defaults to the bundled sample catalog)
    #[arg(short, long, value_name = "RON")]
    catalog: Option<PathBuf>,

    /// Comma-separated skill ids (e.g., 1,2,3)
    #[arg(short, long, value_name = "IDS")]
    skills: String,

    /// Actor stats as str,wis,spi,vit,agi,luk
    #[arg(long, value_name = "STATS")]
    stats: Option<String>,

    /// Engine configuration TOML file
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Spell definitions RON file, used with --level to list castable spells
    #[arg(long, value_name = "RON")]
    spells: Option<PathBuf>,

    /// Character level for the spell loadout
    #[arg(long, value_name = "LEVEL")]
    level: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Skip building the modifier summary
    #[arg(long)]
    no_summary: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable overview
    Summary,
    /// Full bundle as JSON
    Json,
}

impl Aggregate {
    pub fn execute(self) -> Result<()> {
        let catalog = load_catalog(self.catalog.as_deref())?;
        let ids = parse_skill_ids(&self.skills)?;
        let skills = catalog.select(&ids)?;
        let stats = self.stats.as_deref().map(parse_stats).transpose()?;

        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => ConfigLoader::bundled()?,
        };
        let mut options = AggregationOptions::from(&config);
        if self.no_summary {
            options.include_summary = false;
        }

        tracing::info!(skills = skills.len(), "aggregating");
        let bundle = SkillAggregator::new(EffectRegistry::shared(), options)
            .aggregate(&skills, stats.as_ref())
            .context("Aggregation failed")?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&bundle)?);
            }
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Skills:").bold().cyan(),
                    skills
                        .iter()
                        .map(|skill| format!("{} ({})", skill.name, skill.id))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                println!();
                print_overview(&bundle);
                self.print_loadout(&bundle)?;
                print_summary(&bundle);
            }
        }

        Ok(())
    }

    fn print_loadout(&self, bundle: &SkillBundle) -> Result<()> {
        let Some(level) = self.level else {
            return Ok(());
        };
        let spells = match &self.spells {
            Some(path) => SpellLoader::load(path)?,
            None => SpellLoader::bundled()?,
        };

        let loadout = bundle.spellbook.loadout(&spells, level);
        println!("{}", style(format!("Castable at level {level}")).bold().cyan());
        for spell in spells.iter().filter(|spell| loadout.contains(spell.id)) {
            println!(
                "  {:>4}  {:<16} {} tier {}",
                spell.id, spell.name, spell.school, spell.tier
            );
        }
        println!();
        Ok(())
    }
}

fn print_overview(bundle: &SkillBundle) {
    println!("{}", style("Combat Stats").bold().cyan());
    for stat in CombatStat::iter() {
        let additive = bundle.combat_stats.additive(stat);
        let multiplier = bundle.combat_stats.passive_multiplier(stat);
        if additive != 0.0 || multiplier != 1.0 {
            println!("  {:<18} {:>+8.2}  x{:.3}", stat.to_string(), additive, multiplier);
        }
    }
    println!();

    println!("{}", style("Rewards").bold().cyan());
    for channel in RewardChannel::iter() {
        println!("  {:<18} x{:.3}", channel.to_string(), bundle.rewards.scale(channel));
    }
    println!();

    println!("{}", style("Exploration").bold().cyan());
    println!(
        "  {:<18} x{:.3}  ({} entries)",
        "time",
        bundle
            .exploration
            .time_multiplier(&ExplorationContext::default()),
        bundle.exploration.entries.len()
    );
    println!();

    println!("{}", style("Equipment Slots").bold().cyan());
    println!(
        "  {:<18} +{}  x{:.2}",
        "slots", bundle.equipment_slots.additive, bundle.equipment_slots.multiplier
    );
    println!();

    if !bundle.spellbook.tier_unlocks.is_empty() {
        println!("{}", style("Spellbook").bold().cyan());
        for (school, tier) in &bundle.spellbook.tier_unlocks {
            println!("  {:<18} tier {}", school.to_string(), tier);
        }
        println!();
    }
}

fn print_summary(bundle: &SkillBundle) {
    let Some(summary) = &bundle.summary else {
        return;
    };

    println!(
        "{} {} entries",
        style("Modifier Summary:").bold().cyan(),
        summary.len()
    );
    for entry in summary.iter() {
        let value = match entry.value {
            None => style("conditional".to_string()).dim().to_string(),
            Some(SummaryValue::Additive(v)) => format!("{v:+.2}"),
            Some(SummaryValue::Multiplier(v)) => format!("x{v:.3}"),
            Some(SummaryValue::Max(v)) => format!("max {v:.2}"),
            Some(SummaryValue::Min(v)) => format!("min {v:.2}"),
            Some(SummaryValue::Integer(v)) => v.to_string(),
            Some(SummaryValue::Flag) => "on".to_string(),
        };
        println!("  {:<40} {}", entry.key.to_string(), value);
    }
}
