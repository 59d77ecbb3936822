//! avk-core - Element model, options and diagnostics for avk
//!
//! This crate provides the types shared by the generator and its drivers:
//! - [`TypeElement`] and friends, the serialized description of the Java
//!   declarations to convert
//! - [`Options`] for the string-keyed generator options
//! - [`Messager`] for reporting diagnostics against elements
//! - [`DeclarationState`] for tracking a declaration through the pipeline
//! - [`AvkError`] for error handling

mod diagnostic;
mod element;
mod error;
mod lifecycle;
mod options;

pub use diagnostic::{CollectingMessager, Diagnostic, DiagnosticKind, Messager, TracingMessager};
pub use element::{
    AUTO_VALUE, AUTO_VALUE_BUILDER, AnnotationMirror, AnnotationValue, ConstantValue,
    ElementKind, EnclosingElement, ExecutableElement, FieldKind, Modifier, PrimitiveKind, Round,
    TypeElement, TypeMirror, TypeParameterElement, VariableElement,
};
pub use error::{AvkError, AvkResult};
pub use lifecycle::DeclarationState;
pub use options::{ALL_OPTIONS, OPT_IGNORE_NESTED, OPT_SRC, OPT_TARGETS, Options};

/// Log verbosity accepted by drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AvkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            _ => Err(AvkError::InvalidOption {
                key: "log-level".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AvkError, AvkResult, CollectingMessager, DeclarationState, DiagnosticKind, Messager,
        Options, Round, TypeElement, TypeMirror,
    };
}

#[cfg(test)]
mod lib_tests;
