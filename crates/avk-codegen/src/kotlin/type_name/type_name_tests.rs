#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("java.util.Map.Entry", "java.util", &["Map", "Entry"])]
#[test_case("kotlin.String", "kotlin", &["String"])]
#[test_case("Example", "", &["Example"])]
#[test_case("com.example.lowercase", "com.example", &["lowercase"])]
fn ClassName___best_guess___splits_package(canonical: &str, package: &str, names: &[&str]) {
    let class = ClassName::best_guess(canonical);

    assert_eq!(class.package(), package);
    assert_eq!(class.simple_names(), names);
    assert_eq!(class.canonical(), canonical);
}

#[test]
fn ClassName___in_package___trusts_known_package() {
    let class = ClassName::in_package("com.Acme", "com.Acme.Outer.Inner");

    assert_eq!(class.package(), "com.Acme");
    assert_eq!(class.simple_names(), ["Outer", "Inner"]);
}

#[test]
fn ClassName___in_package___falls_back_to_best_guess() {
    let class = ClassName::in_package("test", "java.lang.String");

    assert_eq!(class.package(), "java.lang");
    assert_eq!(class.simple_name(), "String");
}

#[test]
fn ClassName___nested___extends_simple_names() {
    let outer = ClassName::new("test", "Example");

    let builder = outer.nested("Builder");

    assert_eq!(builder.canonical(), "test.Example.Builder");
    assert_eq!(builder.enclosing(), Some(outer.clone()));
    assert_eq!(builder.top_level(), outer);
    assert_eq!(outer.enclosing(), None);
}

#[test]
fn TypeName___copy___changes_only_nullability() {
    let ty = TypeName::parameterized(
        ClassName::new("java.util", "List"),
        vec![TypeName::kotlin("String")],
    );

    let nullable = ty.copy(true);

    assert!(nullable.is_nullable());
    assert_eq!(nullable.copy(false), ty);
    assert_eq!(nullable.to_string(), "java.util.List<kotlin.String>?");
}

#[test]
fn TypeName___parameterized_without_args___is_plain_class() {
    let ty = TypeName::parameterized(ClassName::new("a", "B"), Vec::new());

    assert!(matches!(ty, TypeName::Class { .. }));
}

#[test]
fn TypeName___is_kotlin___only_unparameterized_builtins() {
    assert!(TypeName::kotlin("Int").is_kotlin("Int"));
    assert!(TypeName::kotlin("Int").copy(true).is_kotlin("Int"));
    assert!(!TypeName::kotlin("Int").is_kotlin("Long"));
    assert!(!TypeName::class(ClassName::new("java.lang", "Integer")).is_kotlin("Integer"));
}

#[test]
fn TypeName___referenced_classes___walks_arguments() {
    let ty = TypeName::parameterized(
        ClassName::new("java.util", "Map"),
        vec![TypeName::kotlin("String"), TypeName::variable("V")],
    );

    let names: Vec<String> = ty
        .referenced_classes()
        .iter()
        .map(|c| c.canonical())
        .collect();

    assert_eq!(names, ["java.util.Map", "kotlin.String"]);
}
