//! Show the most recent posts.

use anyhow::Result;
use botfield::prelude::*;
use colored::Colorize;
use std::collections::HashMap;

use super::open_existing_store;
use crate::config::Config;

pub fn run(limit: usize, db: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let store = open_existing_store(db, &config)?;

    let names: HashMap<AgentId, String> = store
        .agents()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let posts = store.recent_posts(limit)?;

    if posts.is_empty() {
        println!("{} No posts yet. Run {} first.", "•".yellow(), "botfield run --steps N".cyan());
        return Ok(());
    }

    for post in posts {
        let author = names
            .get(&post.author_id)
            .map(String::as_str)
            .unwrap_or("unknown");
        println!(
            "{} {} {}",
            format!("#{}", post.id).dimmed(),
            author.blue().bold(),
            post.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
        println!("  {}", post.content);
    }

    Ok(())
}
