mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use scout_logging::scout_info;

/// Parses flags, loads configuration, sets up logging and runs the shell.
pub fn run_app() -> Result<()> {
    let args = cli::Args::parse();
    let config = config::AppConfig::from_args(&args)?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(config.log, level);
    scout_info!(
        "Starting recipe_scout against {} (history at {:?})",
        config.base_url,
        config.history_path
    );

    app::run(&config)
}
