//! # Command Handlers
//!
//! Each handler returns the text to print on stdout; diagnostics go through `tracing`.

use crate::args::OutputFormat;
use anyhow::{Context, Result, bail};
use roster_model::profiles;
use roster_model::validate::{ValueKind, normalize};
use roster_model::{FieldMap, SchemaProfile};
use serde_json::Value;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::info;

/// Validates `file` as an instance of `class` and renders its canonical form.
///
/// TOML has no null, so TOML output omits unset scalars that JSON renders as `null`.
pub fn validate(file: &Path, profile: &str, class: &str, output: OutputFormat) -> Result<String> {
    let fields = read_document(file)?;
    let canonical = profiles::canonicalize(profile, class, fields)
        .with_context(|| format!("{} is not a valid `{class}` ({profile})", file.display()))?;

    info!(file = %file.display(), profile, class, "Document is valid");

    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(&Value::Object(canonical))?,
        OutputFormat::Toml => toml::to_string_pretty(&Value::Object(normalize(canonical)))?,
    };
    Ok(ensure_newline(rendered))
}

/// Lists classes with their base and discriminator.
pub fn classes(profile: &str) -> Result<String> {
    let profile = profiles::find(profile)?;
    let mut out = String::new();

    for class in profile.classes {
        writeln!(
            out,
            "{:<12} is_a={:<12} category={}",
            class.name,
            class.is_a.map_or("-", |base| base.name),
            class.category.unwrap_or("-"),
        )?;
        if let Some(description) = class.description {
            writeln!(out, "    {description}")?;
        }
    }
    Ok(out)
}

/// Checks one profile, or every shipped profile.
pub fn check(profile: Option<&str>) -> Result<String> {
    let selected: Vec<&SchemaProfile> = match profile {
        Some(name) => vec![profiles::find(name)?],
        None => profiles::ALL.to_vec(),
    };

    let mut out = String::new();
    for profile in selected {
        profile.check()?;
        writeln!(out, "{}: ok ({} classes)", profile.name, profile.classes.len())?;
    }
    Ok(out)
}

fn read_document(file: &Path) -> Result<FieldMap> {
    let raw =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let is_toml = file.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let value: Value = if is_toml {
        toml::from_str(&raw).with_context(|| format!("{} is not valid TOML", file.display()))?
    } else {
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", file.display()))?
    };

    match value {
        Value::Object(fields) => Ok(fields),
        other => bail!("{} must hold a mapping, found {}", file.display(), ValueKind::of(&other)),
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
