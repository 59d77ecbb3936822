//! Per-declaration state machine

use serde::{Deserialize, Serialize};

/// Where a value declaration is in the generation pipeline
///
/// State transitions:
/// ```text
/// Discovered → Validated → Modeled → Composed → Emitted
///      │           │          │
///      └───────────┴──────────┴──→ Skipped
/// ```
///
/// `Skipped` covers declarations rejected by validation and nested
/// declarations whose parent was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationState {
    /// Seen in a round, nothing checked yet
    #[default]
    Discovered,
    /// Passed the nesting checks
    Validated,
    /// Descriptor built and registered
    Modeled,
    /// Children attached, ready to render
    Composed,
    /// Source text produced
    Emitted,
    /// Rejected; no file will be produced
    Skipped,
}

impl DeclarationState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: DeclarationState) -> bool {
        use DeclarationState::*;
        matches!(
            (self, target),
            (Discovered, Validated)
                | (Validated, Modeled)
                | (Modeled, Composed)
                | (Composed, Emitted)
                | (Discovered, Skipped)
                | (Validated, Skipped)
                | (Modeled, Skipped)
        )
    }

    /// Check if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeclarationState::Emitted | DeclarationState::Skipped)
    }

    /// Check if the declaration has a registered descriptor
    pub fn has_model(&self) -> bool {
        matches!(
            self,
            DeclarationState::Modeled | DeclarationState::Composed | DeclarationState::Emitted
        )
    }
}

impl std::fmt::Display for DeclarationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationState::Discovered => write!(f, "Discovered"),
            DeclarationState::Validated => write!(f, "Validated"),
            DeclarationState::Modeled => write!(f, "Modeled"),
            DeclarationState::Composed => write!(f, "Composed"),
            DeclarationState::Emitted => write!(f, "Emitted"),
            DeclarationState::Skipped => write!(f, "Skipped"),
        }
    }
}

#[cfg(test)]
#[path = "lifecycle/lifecycle_tests.rs"]
mod lifecycle_tests;

#[cfg(test)]
#[path = "lifecycle/lifecycle_parameterized_tests.rs"]
mod lifecycle_parameterized_tests;
