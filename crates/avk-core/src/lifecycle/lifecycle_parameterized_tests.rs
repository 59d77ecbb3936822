#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized valid transitions
// ============================================================================

#[test_case(DeclarationState::Discovered, DeclarationState::Validated)]
#[test_case(DeclarationState::Validated, DeclarationState::Modeled)]
#[test_case(DeclarationState::Modeled, DeclarationState::Composed)]
#[test_case(DeclarationState::Composed, DeclarationState::Emitted)]
#[test_case(DeclarationState::Discovered, DeclarationState::Skipped)]
#[test_case(DeclarationState::Validated, DeclarationState::Skipped)]
#[test_case(DeclarationState::Modeled, DeclarationState::Skipped)]
fn DeclarationState___valid_transitions___allowed(from: DeclarationState, to: DeclarationState) {
    assert!(
        from.can_transition_to(to),
        "{:?} should transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized invalid transitions
// ============================================================================

#[test_case(DeclarationState::Discovered, DeclarationState::Modeled)]
#[test_case(DeclarationState::Discovered, DeclarationState::Emitted)]
#[test_case(DeclarationState::Validated, DeclarationState::Composed)]
#[test_case(DeclarationState::Modeled, DeclarationState::Emitted)]
#[test_case(DeclarationState::Emitted, DeclarationState::Discovered)]
#[test_case(DeclarationState::Emitted, DeclarationState::Skipped)]
#[test_case(DeclarationState::Skipped, DeclarationState::Validated)]
#[test_case(DeclarationState::Skipped, DeclarationState::Skipped)]
#[test_case(DeclarationState::Composed, DeclarationState::Modeled)]
fn DeclarationState___invalid_transitions___not_allowed(
    from: DeclarationState,
    to: DeclarationState,
) {
    assert!(
        !from.can_transition_to(to),
        "{:?} should not transition to {:?}",
        from,
        to
    );
}
