//! # CLI Argument Definitions
//!
//! Subcommands, arguments and flags of the `roster` binary.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Validate documents against the roster entity profiles")]
pub struct Cli {
    /// Configuration file (defaults to `roster.toml` in the working directory, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a JSON or TOML document and print its canonical form
    Validate {
        /// Document to validate; `.toml` files are read as TOML, everything else as JSON
        file: PathBuf,
        /// Schema profile (`basic` or `demo`)
        #[arg(short, long)]
        profile: Option<String>,
        /// Class the document must be an instance of
        #[arg(long)]
        class: Option<String>,
        /// Output format of the canonical document
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// List the classes of a profile
    Classes {
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Check profile declarations for consistency (all profiles by default)
    Check {
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}
