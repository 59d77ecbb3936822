#![allow(non_snake_case)]

use super::*;
use avk_core::DiagnosticKind;

fn diagnostics() -> Vec<Diagnostic> {
    vec![
        Diagnostic::new(DiagnosticKind::Error, "No AutoValue classes found", None),
        Diagnostic::new(
            DiagnosticKind::Warning,
            "Setter with surprising params: setA",
            Some("test.Example.Builder"),
        ),
    ]
}

#[test]
fn render___text___one_line_each() {
    let text = render(&diagnostics(), DiagnosticsFormat::Text).unwrap();

    assert_eq!(
        text,
        "error: No AutoValue classes found\n\
         warning: Setter with surprising params: setA [test.Example.Builder]\n"
    );
}

#[test]
fn render___text___empty_when_nothing_reported() {
    assert_eq!(render(&[], DiagnosticsFormat::Text).unwrap(), "");
}

#[test]
fn render___json___array_of_objects() {
    let text = render(&diagnostics(), DiagnosticsFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["kind"], "error");
    assert!(value[0].get("element").is_none());
    assert_eq!(value[1]["kind"], "warning");
    assert_eq!(value[1]["element"], "test.Example.Builder");
}

#[test]
fn render___json___empty_array() {
    assert_eq!(render(&[], DiagnosticsFormat::Json).unwrap(), "[]\n");
}
