//! Diagnostic channel
//!
//! Input-shape problems are reported through a [`Messager`] rather than as
//! errors, so one bad declaration does not stop the others. This mirrors the
//! `javax.annotation.processing.Messager` contract: a severity, a message and
//! the element the message is about.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Note,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Note => write!(f, "note"),
            DiagnosticKind::Warning => write!(f, "warning"),
            DiagnosticKind::Error => write!(f, "error"),
        }
    }
}

/// A single reported message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,

    /// Qualified name of the element the message is attributed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, element: Option<&str>) -> Self {
        Self {
            kind,
            message: message.into(),
            element: element.map(str::to_string),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{}: {} [{}]", self.kind, self.message, element),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Sink for diagnostics
pub trait Messager: Send + Sync {
    /// Report a message, optionally attributed to an element
    fn print_message(&self, kind: DiagnosticKind, message: &str, element: Option<&str>);

    fn error(&self, message: &str, element: Option<&str>) {
        self.print_message(DiagnosticKind::Error, message, element);
    }

    fn warning(&self, message: &str, element: Option<&str>) {
        self.print_message(DiagnosticKind::Warning, message, element);
    }

    fn note(&self, message: &str, element: Option<&str>) {
        self.print_message(DiagnosticKind::Note, message, element);
    }
}

/// Buffers every diagnostic in order
#[derive(Debug, Default)]
pub struct CollectingMessager {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingMessager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Diagnostics of one severity
    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.kind == kind)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticKind::Error) > 0
    }

    /// Remove and return everything reported so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }
}

impl Messager for CollectingMessager {
    fn print_message(&self, kind: DiagnosticKind, message: &str, element: Option<&str>) {
        self.diagnostics
            .lock()
            .push(Diagnostic::new(kind, message, element));
    }
}

/// Forwards diagnostics to `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMessager;

impl Messager for TracingMessager {
    fn print_message(&self, kind: DiagnosticKind, message: &str, element: Option<&str>) {
        let element = element.unwrap_or("-");
        match kind {
            DiagnosticKind::Error => tracing::error!(element, "{message}"),
            DiagnosticKind::Warning => tracing::warn!(element, "{message}"),
            DiagnosticKind::Note => tracing::info!(element, "{message}"),
        }
    }
}
