//! botfield CLI - run and inspect agent posting simulations.

mod commands;
mod config;

use anyhow::Result;
use botfield::prelude::validate_steps;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use config::EngineKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "botfield")]
#[command(author, version, about = "botfield - discrete-tick agent posting simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (per-tick tracing)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default botfield.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the simulation
    Run {
        /// Number of ticks to run
        #[arg(short, long, allow_negative_numbers = true)]
        steps: i64,

        /// Random seed for reproducible runs (default: 42)
        #[arg(long)]
        seed: Option<u64>,

        /// Discard agents, posts and events from earlier runs first
        #[arg(long)]
        reset: bool,

        /// Content engine
        #[arg(short, long, value_enum)]
        engine: Option<EngineKind>,

        /// Path to the SQLite database
        #[arg(long)]
        db: Option<String>,
    },

    /// Summarize the stored run
    Summary {
        /// Path to the SQLite database
        #[arg(long)]
        db: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent posts
    Feed {
        /// Number of posts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Path to the SQLite database
        #[arg(long)]
        db: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "warn,botfield_runtime=debug,botfield_content=debug"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            steps,
            seed,
            reset,
            engine,
            db,
        } => {
            // Checked before any store is opened or agent registered.
            let steps = match validate_steps(steps) {
                Ok(steps) => steps,
                Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
            };
            commands::run::run(commands::run::RunOptions {
                steps,
                seed,
                reset,
                engine,
                db,
                verbose: cli.verbose,
            })
        }
        Commands::Summary { db, json } => commands::summary::run(db, json),
        Commands::Feed { limit, db } => commands::feed::run(limit, db),
    }
}
