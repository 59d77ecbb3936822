//! Diagnostic output

use anyhow::Result;
use avk_core::Diagnostic;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiagnosticsFormat {
    /// One `kind: message [element]` line per diagnostic
    #[default]
    Text,
    /// A JSON array of diagnostic objects
    Json,
}

/// Render diagnostics in the requested format
pub fn render(diagnostics: &[Diagnostic], format: DiagnosticsFormat) -> Result<String> {
    match format {
        DiagnosticsFormat::Text => Ok(diagnostics.iter().map(|d| format!("{d}\n")).collect()),
        DiagnosticsFormat::Json => {
            let mut text = serde_json::to_string_pretty(diagnostics)?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Print diagnostics to stderr
pub fn report(diagnostics: &[Diagnostic], format: DiagnosticsFormat) -> Result<()> {
    eprint!("{}", render(diagnostics, format)?);
    Ok(())
}

#[cfg(test)]
#[path = "report/report_tests.rs"]
mod report_tests;
