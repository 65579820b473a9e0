#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::Parser;
use roster_cli::args::Cli;
use roster_cli::config::load_config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let _logger = roster_cli::init_logger(&config.log, cli.verbose)?;

    let output = roster_cli::run(&cli.command, &config)?;
    print!("{output}");

    Ok(())
}
