//! Round file loading

use anyhow::{Context, Result};
use avk_core::{AvkError, Round};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read one round from a JSON file
pub fn load_round(path: &Path) -> Result<Round> {
    let bytes = fs::read(path)
        .map_err(AvkError::from)
        .with_context(|| format!("Failed to read round: {}", path.display()))?;

    let round = Round::from_json(&bytes)
        .map_err(AvkError::from)
        .with_context(|| format!("Failed to parse round: {}", path.display()))?;

    debug!(path = %path.display(), elements = round.elements.len(), "loaded round");
    Ok(round)
}
