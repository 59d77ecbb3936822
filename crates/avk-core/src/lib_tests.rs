#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn LogLevel___ordering___trace_least_verbose_off_last() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Off);
}

#[test]
fn LogLevel___default___is_info() {
    assert_eq!(LogLevel::default(), LogLevel::Info);
}

#[test_case("trace", LogLevel::Trace)]
#[test_case("DEBUG", LogLevel::Debug)]
#[test_case("info", LogLevel::Info)]
#[test_case("warning", LogLevel::Warn)]
#[test_case("Error", LogLevel::Error)]
#[test_case("off", LogLevel::Off)]
fn LogLevel___from_str___case_insensitive(input: &str, expected: LogLevel) {
    assert_eq!(input.parse::<LogLevel>().unwrap(), expected);
}

#[test]
fn LogLevel___from_str___unknown___fails() {
    let result = "loud".parse::<LogLevel>();

    assert!(matches!(result, Err(AvkError::InvalidOption { .. })));
}

#[test]
fn LogLevel___as_filter___lowercase() {
    assert_eq!(LogLevel::Warn.as_filter(), "warn");
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
}
