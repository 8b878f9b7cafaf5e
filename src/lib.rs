//! floormap library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::NaiveDate;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};

/// Per-run context threaded through every command so all date-based
/// decisions agree within one run.
pub struct RunContext {
    pub today: NaiveDate,
    pub seed: Option<u64>,
}

/// Central command dispatcher. Returns the process exit code: the `check`
/// subcommand's 0/1 contract is load-bearing for calling automation.
pub fn dispatch(cli: &Cli, cfg: &Config, ctx: &RunContext) -> AppResult<i32> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(),
        Commands::Generate { .. } => cli::commands::generate::handle(&cli.command, cfg, ctx),
        Commands::Resolve { .. } => cli::commands::resolve::handle(&cli.command, cfg),
        Commands::Events => cli::commands::events::handle(cfg, ctx),
        Commands::Check => cli::commands::check::handle(cfg, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<i32> {
    let cli = Cli::parse();

    let mut cfg = Config::load();

    // Command-line overrides take precedence over the config file.
    if let Some(data_dir) = &cli.data_dir {
        cfg.data_dir = data_dir.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        cfg.output_dir = output_dir.clone();
    }

    let today = match &cli.date {
        Some(s) => utils::date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => utils::date::today(),
    };
    let ctx = RunContext {
        today,
        seed: cli.seed,
    };

    dispatch(&cli, &cfg, &ctx)
}
