//! Generate command implementation

use crate::report::{DiagnosticsFormat, report};
use crate::rounds::load_round;
use anyhow::{Context, Result};
use avk_codegen::{GeneratedFile, Processor};
use avk_core::{AvkError, CollectingMessager, Options};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parse one `-A key=value` argument
pub fn parse_define(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in '{arg}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Merge the config file and `-A` options into [`Options`]
pub fn collect_options(defines: &[(String, String)], config: Option<&Path>) -> Result<Options> {
    let mut map = match config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(AvkError::from)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Options::map_from_toml(&source)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => BTreeMap::new(),
    };
    map.extend(defines.iter().cloned());

    Ok(Options::from_map(&map)?)
}

/// Generate command implementation.
///
/// Returns `false` when an error diagnostic was reported.
pub fn run(
    defines: &[(String, String)],
    config: Option<&Path>,
    rounds: &[PathBuf],
    format: DiagnosticsFormat,
) -> Result<bool> {
    let options = collect_options(defines, config)?;
    let messager = Arc::new(CollectingMessager::new());
    let processor = Processor::new(options, messager.clone());

    let result = generate(&processor, rounds);
    report(&messager.diagnostics(), format)?;

    for file in result? {
        println!("{}", file.path.display());
    }
    Ok(!messager.has_errors())
}

fn generate(processor: &Processor, rounds: &[PathBuf]) -> Result<Vec<GeneratedFile>> {
    for path in rounds {
        let round = load_round(path)?;
        processor
            .process_round(&round)
            .with_context(|| format!("Failed to process round: {}", path.display()))?;
    }
    processor
        .finish()
        .context("Failed to generate Kotlin sources")
}
