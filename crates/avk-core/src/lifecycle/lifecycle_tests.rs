#![allow(non_snake_case)]

use super::*;

#[test]
fn DeclarationState___default___is_discovered() {
    let state = DeclarationState::default();

    assert_eq!(state, DeclarationState::Discovered);
}

#[test]
fn DeclarationState___happy_path___every_step_allowed() {
    let path = [
        DeclarationState::Discovered,
        DeclarationState::Validated,
        DeclarationState::Modeled,
        DeclarationState::Composed,
        DeclarationState::Emitted,
    ];

    for pair in path.windows(2) {
        assert!(pair[0].can_transition_to(pair[1]));
    }
}

#[test]
fn DeclarationState___composed_to_skipped___not_allowed() {
    let state = DeclarationState::Composed;

    assert!(!state.can_transition_to(DeclarationState::Skipped));
}

#[test]
fn DeclarationState___skipped___is_terminal() {
    assert!(DeclarationState::Skipped.is_terminal());
    assert!(DeclarationState::Emitted.is_terminal());
    assert!(!DeclarationState::Modeled.is_terminal());
}

#[test]
fn DeclarationState___has_model___after_modeling_only() {
    assert!(!DeclarationState::Discovered.has_model());
    assert!(!DeclarationState::Validated.has_model());
    assert!(DeclarationState::Modeled.has_model());
    assert!(DeclarationState::Emitted.has_model());
    assert!(!DeclarationState::Skipped.has_model());
}

#[test]
fn DeclarationState___display___matches_variant() {
    assert_eq!(DeclarationState::Modeled.to_string(), "Modeled");
    assert_eq!(DeclarationState::Skipped.to_string(), "Skipped");
}

#[test]
fn DeclarationState___serialize___snake_case() {
    let json = serde_json::to_string(&DeclarationState::Composed).unwrap();

    assert_eq!(json, "\"composed\"");
}
