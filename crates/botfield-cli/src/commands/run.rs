//! Run the simulation.

use anyhow::{Context, Result};
use botfield::prelude::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::{open_store, summary::print_summary};
use crate::config::{Config, EngineKind};

/// Options collected from the command line.
pub struct RunOptions {
    pub steps: u64,
    pub seed: Option<u64>,
    pub reset: bool,
    pub engine: Option<EngineKind>,
    pub db: Option<String>,
    pub verbose: bool,
}

pub fn run(opts: RunOptions) -> Result<()> {
    let config = Config::load()?;
    let seed = opts.seed.unwrap_or(config.simulation.seed);
    let engine_kind = opts.engine.unwrap_or(config.content.engine);
    debug!(seed, engine = ?engine_kind, agents = config.agents.len(), "configuration resolved");

    println!();
    println!("{}", format!("=== botfield v{} ===", botfield::VERSION).white().bold());
    println!("Steps:  {}", opts.steps.to_string().cyan());
    println!("Seed:   {}", seed.to_string().cyan());
    println!();

    let engine = config.content_engine(engine_kind)?;
    let mut store = open_store(opts.db, &config)?;

    if opts.reset {
        store.reset().context("Failed to reset database")?;
        println!("{} Cleared previous run", "→".blue());
    }

    let agents = spawn_roster(&mut store, &config.agents).context("Failed to register agents")?;
    println!(
        "{} {} agents, engine {}",
        "→".blue(),
        agents.len().to_string().cyan(),
        engine.name().cyan()
    );

    let mut orchestrator = Orchestrator::seeded(agents, store, engine, seed)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let tally = if opts.verbose {
        runtime.block_on(orchestrator.run_with(opts.steps, |report| {
            let outcome = match (&report.post_id, &report.degraded) {
                (Some(id), None) => format!("post #{id}").green(),
                (Some(id), Some(reason)) => format!("post #{id} ({})", reason.label()).yellow(),
                (None, _) => "idle".dimmed(),
            };
            println!(
                "  [tick {:>4}] {:<14} {:<6} {}",
                report.tick,
                report.agent_name,
                report.action.as_str(),
                outcome
            );
        }))?
    } else {
        let pb = ProgressBar::new(opts.steps);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        let tally = runtime.block_on(orchestrator.run_with(opts.steps, |_| pb.inc(1)))?;
        pb.finish_and_clear();
        tally
    };

    let degraded = tally.degraded;
    println!();
    println!("{} Simulation complete.", "✓".green().bold());
    if degraded > 0 {
        println!(
            "  {} {} posts used fallback text",
            "!".yellow(),
            degraded.to_string().yellow()
        );
    }
    println!();

    print_summary(&orchestrator.summary()?);
    Ok(())
}
