//! Error types for avk

use thiserror::Error;

/// Result type alias for generator operations
pub type AvkResult<T> = Result<T, AvkError>;

/// Error type for generator operations.
///
/// Input-shape problems are not errors at this level: they are reported as
/// diagnostics and the offending declaration is skipped. Everything here
/// aborts the run.
#[derive(Error, Debug)]
pub enum AvkError {
    /// A required option was not supplied
    #[error("missing required option: {0}")]
    MissingOption(String),

    /// An option was supplied with a value that cannot be parsed
    #[error("invalid value for option {key}: {value}")]
    InvalidOption { key: String, value: String },

    /// A type shape the normalizer does not handle
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A parameter typed Unit, Void or Nothing was asked for a default value
    #[error("parameter with void, Unit, or Nothing type is illegal: {0}")]
    IllegalDefault(String),

    /// A parent declared a child that never reached the registry
    #[error("missing child {child} for parent {parent}")]
    MissingChild { child: String, parent: String },

    /// A nested declaration was never claimed by its parent
    #[error("orphaned nested declaration: {0}")]
    OrphanedChild(String),

    /// A declaration moved through its lifecycle out of order
    #[error("invalid declaration state for {name}: {from} -> {to}")]
    InvalidTransition {
        name: String,
        from: String,
        to: String,
    },

    /// I/O error while reading input or writing generated sources
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed element model
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed configuration file
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AvkError {
    /// Whether this error indicates a defect in the generator rather than bad
    /// configuration or an environmental failure.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AvkError::UnsupportedType(_)
                | AvkError::IllegalDefault(_)
                | AvkError::MissingChild { .. }
                | AvkError::OrphanedChild(_)
                | AvkError::InvalidTransition { .. }
                | AvkError::Internal(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AvkError::MissingOption(_) | AvkError::InvalidOption { .. } => 2,
            AvkError::Json(_) | AvkError::Toml(_) => 3,
            AvkError::Io(_) => 4,
            AvkError::UnsupportedType(_)
            | AvkError::IllegalDefault(_)
            | AvkError::MissingChild { .. }
            | AvkError::OrphanedChild(_)
            | AvkError::InvalidTransition { .. }
            | AvkError::Internal(_) => 70,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
