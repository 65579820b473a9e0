//! # Roster CLI
//!
//! Library half of the `roster` binary: argument definitions, configuration loading and
//! command handlers.

pub mod args;
pub mod commands;
pub mod config;

use crate::args::Commands;
use crate::config::{CliConfig, LogConfig};
use anyhow::{Context, Result};
use roster_logger::{LevelFilter, Logger};

/// Name of the logger and prefix of its log files.
pub const LOGGER_NAME: &str = "roster";

/// Runs one subcommand and returns what it prints.
pub fn run(command: &Commands, config: &CliConfig) -> Result<String> {
    let defaults = &config.defaults;
    match command {
        Commands::Validate { file, profile, class, output } => commands::validate(
            file,
            profile.as_deref().unwrap_or(&defaults.profile),
            class.as_deref().unwrap_or(&defaults.class),
            output.unwrap_or(defaults.output),
        ),
        Commands::Classes { profile } => {
            commands::classes(profile.as_deref().unwrap_or(&defaults.profile))
        },
        Commands::Check { profile } => commands::check(profile.as_deref()),
    }
}

/// Installs the global logger. Each `-v` raises the configured level by one step.
pub fn init_logger(log: &LogConfig, verbose: u8) -> Result<Logger> {
    let level = match verbose {
        0 => log
            .level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid log level '{}'", log.level))?,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let builder = Logger::builder().name(LOGGER_NAME).console(true).ansi(log.ansi).level(level);
    let builder = match &log.filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    let logger = match &log.dir {
        Some(dir) => builder.path(dir).json(log.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
