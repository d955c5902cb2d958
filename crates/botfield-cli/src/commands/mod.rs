//! CLI command implementations.

pub mod init;
pub mod run;
pub mod summary;
pub mod feed;

use anyhow::{Context, Result};
use botfield::prelude::*;

use crate::config::Config;

fn db_path(db: Option<String>, config: &Config) -> String {
    db.unwrap_or_else(|| config.simulation.db_path.clone())
}

/// Open the store at `db`, falling back to the configured path.
/// Creates the database if it does not exist yet.
pub(crate) fn open_store(db: Option<String>, config: &Config) -> Result<SqliteStore> {
    let path = db_path(db, config);
    SqliteStore::open(&path).with_context(|| format!("Failed to open database: {path}"))
}

/// Open an existing store for inspection. Never creates a file.
pub(crate) fn open_existing_store(db: Option<String>, config: &Config) -> Result<SqliteStore> {
    let path = db_path(db, config);
    SqliteStore::open_existing(&path)
        .with_context(|| format!("Failed to open database: {path} (run `botfield run --steps N` first)"))
}
