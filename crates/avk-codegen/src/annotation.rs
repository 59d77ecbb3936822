//! Annotation classification and conversion
//!
//! Annotations on accessors are classified once into a [`Marker`] so later
//! stages never re-inspect raw annotation names. Annotations that survive are
//! converted to [`AnnotationSpec`]s with their member values rendered as
//! Kotlin expressions.

use crate::kotlin::naming::char_literal;
use crate::kotlin::{AnnotationSpec, ClassName, CodeBlock, TypeName};
use avk_core::{AnnotationMirror, AnnotationValue, ConstantValue, VariableElement};

/// Moshi's property name annotation
pub const JSON: &str = "com.squareup.moshi.Json";

/// Moshi's class-level adapter annotation
pub const JSON_CLASS: &str = "com.squareup.moshi.JsonClass";

/// Marker added to classes implementing `android.os.Parcelable`
pub const PARCELIZE: &str = "kotlinx.parcelize.Parcelize";

pub const PARCELABLE: &str = "android.os.Parcelable";

/// Simple names of the non-null markers that are dropped outright
const NOT_NULL_NAMES: &[&str] = &["NonNull", "NotNull", "Nonnull"];

/// Package whose annotations never carry over to Kotlin
const AUTO_VALUE_PACKAGE: &str = "com.google.auto.value";

/// What an annotation means to the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    NotNull,
    Nullable,
    Override,
    /// A `Redacted` annotation of the given class
    Redacted(ClassName),
    /// `@Json(name = ...)`
    SerializationName(String),
    Other,
}

impl Marker {
    pub fn classify(mirror: &AnnotationMirror) -> Self {
        let simple = mirror.simple_name();
        if NOT_NULL_NAMES.contains(&simple) {
            return Marker::NotNull;
        }
        match simple {
            "Nullable" => Marker::Nullable,
            "Override" => Marker::Override,
            "Redacted" => Marker::Redacted(ClassName::best_guess(&mirror.type_name)),
            _ if mirror.type_name == JSON => {
                Marker::SerializationName(mirror.string_member("name").unwrap_or_default().to_string())
            }
            _ => Marker::Other,
        }
    }
}

/// Whether any annotation is a `Nullable` marker, matched by simple name
pub fn is_nullable(annotations: &[AnnotationMirror]) -> bool {
    annotations
        .iter()
        .any(|a| Marker::classify(a) == Marker::Nullable)
}

/// Render an annotation as a Kotlin annotation.
///
/// A lone `value` member is written positionally; everything else is written
/// as `name = value` in member-name order.
pub fn to_annotation_spec(mirror: &AnnotationMirror) -> AnnotationSpec {
    let mut spec = AnnotationSpec::new(ClassName::best_guess(&mirror.type_name));
    for member in member_blocks(mirror) {
        spec = spec.member(member);
    }
    spec
}

fn member_blocks(mirror: &AnnotationMirror) -> Vec<CodeBlock> {
    let positional = mirror.members.len() == 1 && mirror.members.contains_key("value");
    mirror
        .members
        .iter()
        .map(|(name, value)| {
            if positional {
                value_literal(value)
            } else {
                CodeBlock::new().name(name).lit(" = ").code(&value_literal(value))
            }
        })
        .collect()
}

/// Kotlin expression for an annotation member value
pub fn value_literal(value: &AnnotationValue) -> CodeBlock {
    match value {
        AnnotationValue::String(s) => CodeBlock::new().string(s),
        AnnotationValue::Bool(b) => CodeBlock::of(b.to_string()),
        AnnotationValue::Int(i) => CodeBlock::of(i.to_string()),
        AnnotationValue::Long(l) => CodeBlock::of(format!("{l}L")),
        AnnotationValue::Float(f) => CodeBlock::of(float_literal(*f)),
        AnnotationValue::Double(d) => CodeBlock::of(double_literal(*d)),
        AnnotationValue::Char(c) => CodeBlock::of(char_literal(*c)),
        AnnotationValue::Enum {
            type_name,
            constant,
        } => CodeBlock::new()
            .ty(&TypeName::class(ClassName::best_guess(type_name)))
            .lit(".")
            .name(constant),
        AnnotationValue::Class(name) => CodeBlock::new()
            .ty(&TypeName::class(crate::normalize::kotlin_class(name)))
            .lit("::class"),
        AnnotationValue::Array(values) => {
            let values: Vec<CodeBlock> = values.iter().map(value_literal).collect();
            CodeBlock::of("[").code(&CodeBlock::join(&values, ", ")).lit("]")
        }
        AnnotationValue::Annotation(nested) => CodeBlock::new()
            .ty(&TypeName::class(ClassName::best_guess(&nested.type_name)))
            .lit("(")
            .code(&CodeBlock::join(&member_blocks(nested), ", "))
            .lit(")"),
    }
}

/// Kotlin initializer for a compile-time constant
pub fn constant_literal(value: &ConstantValue) -> CodeBlock {
    match value {
        ConstantValue::String(s) => CodeBlock::new().string(s),
        ConstantValue::Bool(b) => CodeBlock::of(b.to_string()),
        ConstantValue::Int(i) => CodeBlock::of(i.to_string()),
        ConstantValue::Long(l) => CodeBlock::of(format!("{l}L")),
        ConstantValue::Float(f) => CodeBlock::of(float_literal(*f)),
        ConstantValue::Double(d) => CodeBlock::of(double_literal(*d)),
        ConstantValue::Char(c) => CodeBlock::of(char_literal(*c)),
    }
}

fn float_literal(value: f64) -> String {
    if value.is_finite() {
        format!("{value}f")
    } else {
        non_finite("Float", value)
    }
}

fn double_literal(value: f64) -> String {
    if !value.is_finite() {
        return non_finite("Double", value);
    }
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

fn non_finite(kind: &str, value: f64) -> String {
    let constant = if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "POSITIVE_INFINITY"
    } else {
        "NEGATIVE_INFINITY"
    };
    format!("{kind}.{constant}")
}

/// Annotations of a declared type that carry over to its Kotlin class.
///
/// AutoValue's own annotations, Kotlin `Metadata` and `Redacted` markers are
/// dropped; `JsonClass` loses any member naming the AutoValue Moshi
/// generator.
pub fn class_annotations(annotations: &[AnnotationMirror]) -> Vec<AnnotationSpec> {
    annotations
        .iter()
        .filter(|a| ClassName::best_guess(&a.type_name).package() != AUTO_VALUE_PACKAGE)
        .filter(|a| a.simple_name() != "Metadata")
        .filter(|a| !matches!(Marker::classify(a), Marker::Redacted(_)))
        .map(|a| {
            let mut spec = to_annotation_spec(a);
            if a.simple_name() == "JsonClass" {
                spec.members.retain(|m| !m.to_string().contains("avm"));
            }
            spec
        })
        .collect()
}

/// The first `Redacted` class among the annotations
pub fn redacted_class(annotations: &[AnnotationMirror]) -> Option<ClassName> {
    annotations.iter().find_map(|a| match Marker::classify(a) {
        Marker::Redacted(class) => Some(class),
        _ => None,
    })
}

/// Whether the annotations request generated JSON adapters
/// (`@JsonClass(generateAdapter = true)`, matched by simple name).
pub fn has_serialization_directive(annotations: &[AnnotationMirror]) -> bool {
    annotations.iter().any(|a| {
        a.simple_name() == "JsonClass"
            && matches!(a.members.get("generateAdapter"), Some(AnnotationValue::Bool(true)))
    })
}

/// Whether an enum constant carries `@Json`
pub fn has_json_name(field: &VariableElement) -> bool {
    field.annotations.iter().any(|a| a.type_name == JSON)
}
