//! Self-play CLI
//!
//! Run ghost self-play sessions and track Elo ratings across runs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use tournament::{EloTracker, SelfPlayConfig, SelfPlayRunner};

const DEFAULT_ELO_FILE: &str = "selfplay_elo.json";

#[derive(Parser)]
#[command(name = "tournament")]
#[command(about = "Ghost self-play runner with learning-team rotation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a self-play session
    Run {
        /// TOML run config (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of training steps
        #[arg(short, long)]
        steps: Option<u64>,

        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write the run report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Elo ratings carried across runs
        #[arg(long, default_value = DEFAULT_ELO_FILE)]
        elo: PathBuf,

        /// Start from the initial rating instead of the Elo file
        #[arg(long)]
        fresh: bool,
    },

    /// Show ratings accumulated across runs
    #[command(alias = "elo")]
    Leaderboard {
        #[arg(long, default_value = DEFAULT_ELO_FILE)]
        elo: PathBuf,
    },

    /// Write a starter config
    InitConfig {
        #[arg(default_value = "selfplay.toml")]
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn run_self_play(
    config_path: Option<&Path>,
    steps: Option<u64>,
    seed: Option<u64>,
    output: Option<&Path>,
    elo_path: &Path,
    fresh: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => SelfPlayConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SelfPlayConfig::default(),
    };
    if let Some(steps) = steps {
        config.total_steps = steps;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    println!("=== Self-play: {} ===", config.name);
    println!(
        "Teams: {}, Steps: {}, Swap interval: {}",
        config.teams.len(),
        config.total_steps,
        config.swap_interval
    );
    println!();

    let mut runner = SelfPlayRunner::new(config).context("invalid run config")?;
    if !fresh {
        if let Some(tracker) = EloTracker::load_if_exists(elo_path)
            .with_context(|| format!("loading Elo ratings {}", elo_path.display()))?
        {
            runner = runner.with_tracker(tracker);
        }
    }

    let results = runner.run().context("self-play run failed")?;
    results.print_report();
    runner.tracker().print_leaderboard();

    if let Some(path) = output {
        results
            .save(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        println!("Report saved to: {}", path.display());
    }
    if let Err(e) = runner.tracker().save(elo_path) {
        tracing::warn!(error = %e, "failed to save Elo tracker");
    }
    Ok(())
}

fn show_leaderboard(elo_path: &Path) -> Result<()> {
    match EloTracker::load_if_exists(elo_path)
        .with_context(|| format!("loading Elo ratings {}", elo_path.display()))?
    {
        Some(tracker) => tracker.print_leaderboard(),
        None => println!("No self-play ratings found. Run a session first!"),
    }
    Ok(())
}

fn write_config(path: &Path) -> Result<()> {
    SelfPlayConfig::default()
        .save(path)
        .with_context(|| format!("writing config {}", path.display()))?;
    println!("Config written to: {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            output,
            elo,
            fresh,
        } => run_self_play(
            config.as_deref(),
            steps,
            seed,
            output.as_deref(),
            &elo,
            fresh,
        ),
        Commands::Leaderboard { elo } => show_leaderboard(&elo),
        Commands::InitConfig { path } => write_config(&path),
    }
}
