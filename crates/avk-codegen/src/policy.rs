//! Decisions for ambiguous input shapes
//!
//! Each predicate here answers one question the model builders would
//! otherwise answer inline, so the rules can be tested on their own.

use crate::kotlin::{CodeBlock, KModifier, TypeName};
use crate::normalize::primitive_default;
use avk_core::{AvkResult, Modifier};

/// Parameter or property count at which `LongParameterList` is suppressed
pub const MAX_PARAMS: usize = 7;

/// Kotlin visibility of a Java declaration.
///
/// Package-private maps to `internal`.
pub fn visibility_of(modifiers: &[Modifier]) -> KModifier {
    if modifiers.contains(&Modifier::Public) {
        KModifier::Public
    } else if modifiers.contains(&Modifier::Protected) {
        KModifier::Protected
    } else if modifiers.contains(&Modifier::Private) {
        KModifier::Private
    } else {
        KModifier::Internal
    }
}

/// `public` when the declaration is public, `internal` otherwise
pub fn public_or_internal(modifiers: &[Modifier]) -> KModifier {
    if modifiers.contains(&Modifier::Public) {
        KModifier::Public
    } else {
        KModifier::Internal
    }
}

/// Whether Kotlin callers already reach the property through getter syntax
pub fn uses_getter_syntax(name: &str, accessor: &str) -> bool {
    name.starts_with("get") || accessor.starts_with("get")
}

/// Whether a static factory takes every property, in order
pub fn is_full_creator(parameter_types: &[TypeName], property_types: &[TypeName]) -> bool {
    parameter_types == property_types
}

/// Whether a `withX` method can be generated as a wither of property `x`.
///
/// Abstract methods are always withers. Concrete ones must take exactly the
/// property's type and return the declared type.
pub fn is_valid_wither(
    is_abstract: bool,
    parameter_types: &[TypeName],
    return_type: &TypeName,
    property_type: &TypeName,
    self_type: &TypeName,
) -> bool {
    if is_abstract {
        return true;
    }
    matches!(parameter_types, [only] if only == property_type) && return_type == self_type
}

/// Whether a builder property needs guards keeping its setter and its
/// sub-builder from both being used
pub fn needs_sub_builder_guard(has_setter: bool, has_sub_builder: bool) -> bool {
    has_setter && has_sub_builder
}

/// Whether the data class constructor is hidden behind factories
pub fn is_constructor_internal(has_builder: bool, has_static_creators: bool) -> bool {
    has_builder || has_static_creators
}

/// Default value of a data-class constructor property.
///
/// Without a builder, nullable properties default to `null` and primitives
/// to zero. With a builder the builder owns defaults, unless the class asks
/// for generated JSON adapters, which need constructor defaults too.
pub fn constructor_default(
    ty: &TypeName,
    has_builder: bool,
    has_serialization_directive: bool,
) -> AvkResult<Option<CodeBlock>> {
    if has_builder && !has_serialization_directive {
        return Ok(None);
    }
    if ty.is_nullable() {
        return Ok(Some(CodeBlock::of("null")));
    }
    primitive_default(ty)
}

/// Whether a class is redacted as a whole
pub fn is_class_redacted(class_marked: bool, property_redactions: &[bool]) -> bool {
    class_marked || (!property_redactions.is_empty() && property_redactions.iter().all(|r| *r))
}

/// Whether a builder constructor takes enough parameters to trip detekt's
/// `LongParameterList`
pub fn is_long_parameter_list(count: usize) -> bool {
    count >= MAX_PARAMS
}

/// Same check for static creators, which are allowed one more parameter
pub fn is_long_creator(count: usize) -> bool {
    count > MAX_PARAMS
}
