//! Check command implementation

use crate::report::{DiagnosticsFormat, report};
use crate::rounds::load_round;
use anyhow::{Context, Result};
use avk_codegen::Processor;
use avk_codegen::processor::NO_CLASSES;
use avk_core::{CollectingMessager, DeclarationState, Messager, Options};
use std::path::PathBuf;
use std::sync::Arc;

/// One discovered declaration and where it ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub name: String,
    pub state: DeclarationState,
}

/// Process rounds without generating and summarize what was found
pub fn summarize(processor: &Processor, rounds: &[PathBuf]) -> Result<Vec<Summary>> {
    for path in rounds {
        let round = load_round(path)?;
        processor
            .process_round(&round)
            .with_context(|| format!("Failed to process round: {}", path.display()))?;
    }

    let context = processor.context();
    let mut found: Vec<Summary> = [DeclarationState::Modeled, DeclarationState::Skipped]
        .into_iter()
        .flat_map(|state| {
            context
                .in_state(state)
                .into_iter()
                .map(move |name| Summary { name, state })
        })
        .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(found)
}

/// Check command implementation
pub fn run(rounds: &[PathBuf], format: DiagnosticsFormat) -> Result<bool> {
    let messager = Arc::new(CollectingMessager::new());
    // Nothing is written, so the source root is never used
    let processor = Processor::new(Options::new(PathBuf::new()), messager.clone());

    let result = summarize(&processor, rounds);
    if result.is_ok() && processor.candidate_count() == 0 {
        messager.error(NO_CLASSES, None);
    }
    report(&messager.diagnostics(), format)?;

    let found = result?;
    for summary in &found {
        let mark = if summary.state.has_model() { "✓" } else { "✗" };
        println!("{mark} {}", summary.name);
    }
    let modeled = found
        .iter()
        .filter(|s| s.state.has_model())
        .count();
    println!("\n{modeled} of {} declaration(s) convertible", found.len());

    Ok(!messager.has_errors())
}
