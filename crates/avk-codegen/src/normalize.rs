//! Java type to Kotlin type mapping

use crate::kotlin::{ClassName, CodeBlock, TypeName};
use avk_core::{AvkError, AvkResult, PrimitiveKind, TypeMirror};

/// Boxed and built-in Java classes with a direct Kotlin counterpart
const JAVA_TO_KOTLIN: &[(&str, &str)] = &[
    ("java.lang.Boolean", "Boolean"),
    ("java.lang.Byte", "Byte"),
    ("java.lang.Short", "Short"),
    ("java.lang.Character", "Char"),
    ("java.lang.Integer", "Int"),
    ("java.lang.Long", "Long"),
    ("java.lang.Float", "Float"),
    ("java.lang.Double", "Double"),
    ("java.lang.String", "String"),
    ("java.lang.Object", "Any"),
];

/// Kotlin name of a Java primitive
pub fn kotlin_primitive(primitive: PrimitiveKind) -> &'static str {
    match primitive {
        PrimitiveKind::Boolean => "Boolean",
        PrimitiveKind::Byte => "Byte",
        PrimitiveKind::Short => "Short",
        PrimitiveKind::Char => "Char",
        PrimitiveKind::Int => "Int",
        PrimitiveKind::Long => "Long",
        PrimitiveKind::Float => "Float",
        PrimitiveKind::Double => "Double",
    }
}

/// Kotlin class for a Java class name, collapsing boxed primitives
pub fn kotlin_class(canonical: &str) -> ClassName {
    JAVA_TO_KOTLIN
        .iter()
        .find(|(java, _)| *java == canonical)
        .map(|(_, kotlin)| ClassName::kotlin(kotlin))
        .unwrap_or_else(|| ClassName::best_guess(canonical))
}

/// Map a Java type to a non-null Kotlin type.
///
/// Nullability is always `false`; callers layer it back on from annotations.
/// Wildcards are rejected.
pub fn normalize(ty: &TypeMirror) -> AvkResult<TypeName> {
    match ty {
        TypeMirror::Primitive { primitive } => Ok(TypeName::kotlin(kotlin_primitive(*primitive))),
        TypeMirror::Declared { name, args } => {
            let raw = kotlin_class(name);
            let args = args.iter().map(normalize).collect::<AvkResult<Vec<_>>>()?;
            Ok(TypeName::parameterized(raw, args))
        }
        TypeMirror::TypeVariable { name } => Ok(TypeName::variable(name.clone())),
        TypeMirror::Array { component } => match component.as_ref() {
            TypeMirror::Primitive { primitive } => Ok(TypeName::kotlin(&format!(
                "{}Array",
                kotlin_primitive(*primitive)
            ))),
            TypeMirror::Declared { .. } | TypeMirror::TypeVariable { .. } | TypeMirror::Array { .. } => {
                Ok(TypeName::parameterized(
                    ClassName::kotlin("Array"),
                    vec![normalize(component)?],
                ))
            }
            _ => Err(AvkError::UnsupportedType(ty.to_string())),
        },
        TypeMirror::Void => Ok(TypeName::kotlin("Unit")),
        TypeMirror::Wildcard { .. } => Err(AvkError::UnsupportedType(ty.to_string())),
    }
}

/// Whether a type has no values to default to
pub fn is_valueless(ty: &TypeName) -> bool {
    ty.is_kotlin("Unit")
        || ty.is_kotlin("Nothing")
        || ty.raw_class().is_some_and(|c| c.canonical() == "java.lang.Void")
}

/// Zero value of a non-null primitive type.
///
/// Returns `None` for reference types, which have no zero value. Fails for
/// `Unit`, `Nothing` and `java.lang.Void`.
pub fn primitive_default(ty: &TypeName) -> AvkResult<Option<CodeBlock>> {
    if is_valueless(ty) {
        return Err(AvkError::IllegalDefault(ty.to_string()));
    }
    if ty.is_nullable() {
        return Ok(None);
    }
    let zero = [
        ("Boolean", "false"),
        ("Char", "0.toChar()"),
        ("Byte", "0.toByte()"),
        ("Short", "0.toShort()"),
        ("Int", "0"),
        ("Float", "0f"),
        ("Long", "0L"),
        ("Double", "0.0"),
    ]
    .iter()
    .find(|(kotlin, _)| ty.is_kotlin(kotlin))
    .map(|(_, zero)| CodeBlock::of(*zero));
    Ok(zero)
}
