//! Show the run summary.

use anyhow::Result;
use botfield::prelude::*;
use colored::Colorize;

use super::open_existing_store;
use crate::config::Config;

pub fn run(db: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let store = open_existing_store(db, &config)?;
    let summary = RunSummary::compute(&store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

pub(crate) fn print_summary(summary: &RunSummary) {
    println!("{}", "Run Summary".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Totals".blue().bold());
    println!("  Ticks:             {}", summary.total_ticks.to_string().cyan());
    println!("  Events:            {}", summary.total_events.to_string().cyan());
    println!("  Posts:             {}", summary.total_posts.to_string().cyan());
    println!("  Idle events:       {}", summary.idle_events.to_string().cyan());
    println!();

    println!("{}", "Decisions".blue().bold());
    println!("  Post:              {}", summary.decisions.post.to_string().cyan());
    println!("  Reply:             {}", summary.decisions.reply.to_string().cyan());
    println!("  Idle:              {}", summary.decisions.idle.to_string().cyan());
    println!();

    println!("{}", "Posts per Agent".blue().bold());
    for entry in &summary.posts_per_agent {
        println!("  {:<18} {}", entry.name, entry.posts.to_string().cyan());
    }
    println!();

    if summary.degraded_posts > 0 {
        println!(
            "  Fallback posts:    {}",
            summary.degraded_posts.to_string().yellow()
        );
    }
    println!("  Post rate:         {}", summary.post_rate_display().green());
    println!();
    println!("{}", "═".repeat(40).dimmed());
}
