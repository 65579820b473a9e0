//! # Configuration
//!
//! Layered settings: an optional TOML file overlaid with `ROSTER__`-prefixed environment
//! variables (`ROSTER__DEFAULTS__PROFILE=basic` maps to `defaults.profile`).

use crate::args::OutputFormat;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name of the configuration file looked up when none is given.
pub const DEFAULT_CONFIG: &str = "roster";
pub const ENV_PREFIX: &str = "ROSTER";

#[roster_derive::roster_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: LogConfig,
    pub defaults: DefaultsConfig,
}

/// Logging options handed to the logger builder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Base level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Explicit filter directives; overrides `RUST_LOG`.
    pub filter: Option<String>,
    pub ansi: bool,
    /// Directory for rolling log files; console only when unset.
    pub dir: Option<PathBuf>,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), filter: None, ansi: true, dir: None, json: false }
    }
}

/// Values used when a subcommand flag is omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub profile: String,
    pub class: String,
    pub output: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            profile: "demo".to_owned(),
            class: "Container".to_owned(),
            output: OutputFormat::Json,
        }
    }
}

/// Loads the CLI configuration.
///
/// Without `path`, `roster.{toml,json,...}` in the working directory is used when it exists.
/// An explicit `path` must exist.
///
/// # Errors
/// * The explicit file is missing or unreadable.
/// * A value does not deserialize into [`CliConfig`].
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    load_layers(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__").try_parsing(true)
}

fn load_layers(path: Option<&Path>, env: Environment) -> Result<CliConfig, ConfigError> {
    let (source, required) =
        path.map_or_else(|| (PathBuf::from(DEFAULT_CONFIG), false), |p| (p.to_path_buf(), true));

    debug!(source = %source.display(), required, "Loading config");

    Config::builder()
        .add_source(File::from(source.as_path()).required(required))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<CliConfig>()
        .context("Failed to deserialize config")
}
