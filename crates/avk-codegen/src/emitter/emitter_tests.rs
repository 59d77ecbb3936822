#![allow(non_snake_case)]

use super::*;
use crate::kotlin::{ConstructorProperty, ConstructorSpec, KModifier, PropertySpec, TypeName, TypeSpec};
use tempfile::TempDir;

fn data_class() -> FileSpec {
    let mut spec = TypeSpec::class("Example");
    spec.modifiers = vec![KModifier::Public, KModifier::Data];
    spec.constructor = Some(ConstructorSpec {
        modifiers: Vec::new(),
        properties: vec![ConstructorProperty {
            property: PropertySpec::new("name", TypeName::kotlin("String")),
            default: None,
        }],
    });
    FileSpec::new("com.example", spec)
}

#[test]
fn emit___renders_and_cleans() {
    let text = emit(&data_class());

    assert_eq!(
        text,
        "package com.example\n\ndata class Example(\n  val name: String\n)\n"
    );
}

#[test]
fn source_path___follows_package() {
    let path = source_path(Path::new("/out"), "com.example.model", "Example");

    assert_eq!(path, PathBuf::from("/out/com/example/model/Example.kt"));
}

#[test]
fn source_path___default_package() {
    let path = source_path(Path::new("/out"), "", "Example");

    assert_eq!(path, PathBuf::from("/out/Example.kt"));
}

#[test]
fn write_atomically___creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = source_path(dir.path(), "com.example", "Example");

    write_atomically(&path, "class Example\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "class Example\n");
}

#[test]
fn write_atomically___replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Example.kt");
    fs::write(&path, "old contents that are longer than the new ones\n").unwrap();

    write_atomically(&path, "new\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}
