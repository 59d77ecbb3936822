#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn AvkError___missing_option___displays_key() {
    let err = AvkError::MissingOption("avkSrc".to_string());

    assert_eq!(err.to_string(), "missing required option: avkSrc");
}

#[test]
fn AvkError___missing_child___displays_both_names() {
    let err = AvkError::MissingChild {
        child: "test.Outer.Inner".to_string(),
        parent: "Outer".to_string(),
    };

    let msg = err.to_string();
    assert!(msg.contains("test.Outer.Inner"));
    assert!(msg.contains("Outer"));
}

#[test]
fn AvkError___from_io_error___converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

    let err: AvkError = io_err.into();

    assert!(matches!(err, AvkError::Io(_)));
    assert!(!err.is_internal());
}

#[test]
fn AvkError___from_json_error___converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err: AvkError = json_err.into();

    assert!(matches!(err, AvkError::Json(_)));
}

#[test_case(AvkError::UnsupportedType("? extends Foo".into()), true)]
#[test_case(AvkError::IllegalDefault("kotlin.Unit".into()), true)]
#[test_case(AvkError::OrphanedChild("a.B.C".into()), true)]
#[test_case(AvkError::Internal("boom".into()), true)]
#[test_case(AvkError::MissingOption("avkSrc".into()), false)]
#[test_case(AvkError::InvalidOption { key: "k".into(), value: "v".into() }, false)]
fn AvkError___is_internal___classifies_variant(error: AvkError, expected: bool) {
    assert_eq!(error.is_internal(), expected);
}

#[test_case(AvkError::MissingOption("avkSrc".into()), 2)]
#[test_case(AvkError::InvalidOption { key: "k".into(), value: "v".into() }, 2)]
#[test_case(AvkError::Internal("boom".into()), 70)]
#[test_case(AvkError::OrphanedChild("a.B.C".into()), 70)]
fn AvkError___exit_code___maps_variant(error: AvkError, expected: i32) {
    assert_eq!(error.exit_code(), expected);
}
