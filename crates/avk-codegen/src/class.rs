//! Value class conversion
//!
//! [`ClassDescriptor`] is the complete model of one `@AutoValue` class:
//! properties, builder, `toBuilder()` functions, static factories, withers
//! and constants. Methods that fit none of these are kept as signatures for
//! a manual-migration placeholder. Nested value classes and enums are held by
//! qualified name only; the registry attaches them when it composes the
//! file.

use crate::annotation::{
    PARCELABLE, PARCELIZE, class_annotations, constant_literal, has_serialization_directive,
    redacted_class,
};
use crate::builder::{BuilderDescriptor, placeholder};
use crate::docs::doc_of;
use crate::kotlin::naming::lowercase_first;
use crate::kotlin::{
    AnnotationSpec, ClassName, CodeBlock, ConstructorSpec, FunSpec, KModifier, ParameterSpec,
    PropertySpec, TypeName, TypeSpec,
};
use crate::method::{copy_of, deprecated, jvm_name, parameter_of, suppress, todo, type_variable_of};
use crate::normalize::normalize;
use crate::policy::{
    constructor_default, is_class_redacted, is_constructor_internal, is_full_creator,
    is_long_creator, is_valid_wither, visibility_of,
};
use crate::property::{PropertyDescriptor, PropertySet, REMOVE_BRIDGE_TODO, collect_properties, is_accessor};
use avk_core::{
    AvkResult, ExecutableElement, FieldKind, Messager, Modifier, TypeElement, VariableElement,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Body of members whose implementation has to be carried over by hand
pub const REPLACE_TODO: &str = "Replace this with the implementation from the source class";

/// A static factory returning the value type
#[derive(Debug, Clone, PartialEq)]
pub enum StaticCreator {
    /// Takes every property in order. The old name stays as a deprecated
    /// bridge and an `invoke` operator takes over.
    Full { bridge: FunSpec, invoke: FunSpec },
    /// Anything else keeps its signature with a `TODO()` body
    Partial(FunSpec),
}

impl StaticCreator {
    pub fn functions(&self) -> Vec<&FunSpec> {
        match self {
            StaticCreator::Full { bridge, invoke } => vec![bridge, invoke],
            StaticCreator::Partial(fun) => vec![fun],
        }
    }
}

/// A converted value class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    pub class_name: ClassName,
    pub doc: Option<String>,
    pub visibility: KModifier,
    /// `Redacted` applies to the class as a whole
    pub is_redacted: bool,
    pub redacted_class: Option<ClassName>,
    /// Implements `android.os.Parcelable`
    pub is_parcelable: bool,
    /// Carries `@JsonClass(generateAdapter = true)`
    pub has_serialization_directive: bool,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub type_parameters: Vec<TypeName>,
    pub annotations: Vec<AnnotationSpec>,
    pub properties: PropertySet,
    pub builder: Option<BuilderDescriptor>,
    pub to_builder_functions: Vec<FunSpec>,
    pub builder_factories: Vec<FunSpec>,
    pub static_creators: Vec<StaticCreator>,
    pub withers: Vec<FunSpec>,
    pub static_constants: Vec<PropertySpec>,
    /// Signatures of methods that could not be mapped
    pub unrecognized_methods: Vec<String>,
    /// Written as its own file rather than inside a parent
    pub is_top_level: bool,
    /// Qualified name of the enclosing declaration, if nested
    pub parent: Option<String>,
    /// Qualified names of nested value classes, then nested enums
    pub children: Vec<String>,
}

impl ClassDescriptor {
    /// Model a value class.
    ///
    /// `enum_children` are the qualified names of the class's nested enums
    /// that converted successfully. Returns `None` when the builder cannot be
    /// modeled; the reason has already been reported.
    pub fn from_element(
        element: &TypeElement,
        enum_children: Vec<String>,
        messager: &dyn Messager,
    ) -> AvkResult<Option<Self>> {
        let class_name = ClassName::in_package(&element.package, &element.qualified_name);
        let builder_element = element.nested_types.iter().find(|t| t.is_builder_type());
        let builder_name = builder_element.map(|b| b.qualified_name.as_str());

        let properties = collect_properties(element, builder_name)?;
        let builder = match builder_element {
            Some(b) => match BuilderDescriptor::from_element(b, element, &properties, messager)? {
                Some(builder) => Some(builder),
                None => return Ok(None),
            },
            None => None,
        };
        let builder_class = builder.as_ref().map(|b| class_name.nested(b.name.clone()));
        let self_type = normalize(&element.as_type())?;

        let mut claimed = BTreeSet::new();
        let mut to_builder_functions = Vec::new();
        let mut builder_factories = Vec::new();
        let mut static_creators = Vec::new();

        for (index, method) in element.methods.iter().enumerate() {
            let returns_builder = builder_name.is_some_and(|b| method.return_type.is_declared(b));
            if is_accessor(method, builder_name) {
                claimed.insert(index);
            } else if returns_builder && method.is_static() {
                builder_factories.push(copy_of(method)?.statement(todo(REPLACE_TODO)));
                claimed.insert(index);
            } else if let Some(builder_class) = &builder_class
                && returns_builder
                && method.is_abstract()
                && method.parameters.is_empty()
            {
                to_builder_functions.push(copy_of(method)?.statement(
                    CodeBlock::of("return ")
                        .ty(&TypeName::class(builder_class.clone()))
                        .lit("(")
                        .code(&properties.forwarding_arguments(None))
                        .lit(")"),
                ));
                claimed.insert(index);
            } else if method.is_static() && method.return_type.is_declared(&element.qualified_name) {
                static_creators.push(static_creator(method, &class_name, &properties)?);
                claimed.insert(index);
            }
        }

        let to_builder = to_builder_functions.iter().find(|f| f.parameters.is_empty());
        let mut withers = Vec::new();
        for (index, method) in element.methods.iter().enumerate() {
            if claimed.contains(&index) {
                continue;
            }
            let Some(property) = method
                .name
                .strip_prefix("with")
                .and_then(|rest| properties.get(&lowercase_first(rest)))
            else {
                continue;
            };
            let parameter_types = method
                .parameters
                .iter()
                .map(|p| parameter_of(p).map(|p| p.ty))
                .collect::<AvkResult<Vec<_>>>()?;
            if !is_valid_wither(
                method.is_abstract(),
                &parameter_types,
                &normalize(&method.return_type)?,
                &property.ty,
                &self_type,
            ) {
                continue;
            }
            let body = wither_body(
                property,
                &properties,
                builder.as_ref().zip(builder_class.as_ref()),
                to_builder,
            );
            withers.push(
                FunSpec::new(method.name.clone())
                    .parameter(ParameterSpec::new(property.name.clone(), property.ty.clone()))
                    .returns(self_type.clone())
                    .statement(body),
            );
            claimed.insert(index);
        }

        let unrecognized_methods = element
            .methods
            .iter()
            .enumerate()
            .filter(|(index, _)| !claimed.contains(index))
            .map(|(_, method)| method.signature())
            .collect();

        let static_constants = element
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::Field && f.has_modifier(Modifier::Static))
            .map(static_constant)
            .collect::<AvkResult<Vec<_>>>()?;

        let class_redacted_by = redacted_class(&element.annotations);
        let redactions: Vec<bool> = properties.iter().map(|p| p.is_redacted).collect();
        let is_redacted = is_class_redacted(class_redacted_by.is_some(), &redactions);
        let redacted_class = class_redacted_by.or_else(|| properties.redacted_class.clone());

        let superclass = match &element.superclass {
            Some(superclass) => Some(normalize(superclass)?).filter(|s| !s.is_kotlin("Any")),
            None => None,
        };
        let interfaces = element
            .interfaces
            .iter()
            .map(normalize)
            .collect::<AvkResult<Vec<_>>>()?;
        let type_parameters = element
            .type_parameters
            .iter()
            .map(type_variable_of)
            .collect::<AvkResult<Vec<_>>>()?;

        let mut children: Vec<String> = element
            .nested_types
            .iter()
            .filter(|t| t.is_value_class())
            .map(|t| t.qualified_name.clone())
            .collect();
        children.extend(enum_children);

        let descriptor = Self {
            doc: doc_of(element.doc.as_deref()),
            visibility: visibility_of(&element.modifiers),
            is_redacted,
            redacted_class,
            is_parcelable: element.interfaces.iter().any(|i| i.is_declared(PARCELABLE)),
            has_serialization_directive: has_serialization_directive(&element.annotations),
            superclass,
            interfaces,
            type_parameters,
            annotations: class_annotations(&element.annotations),
            properties,
            builder,
            to_builder_functions,
            builder_factories,
            static_creators,
            withers,
            static_constants,
            unrecognized_methods,
            is_top_level: element.is_top_level(),
            parent: element.enclosing.as_ref().map(|e| e.qualified_name.clone()),
            children,
            class_name,
        };
        debug!(
            class = %descriptor.qualified_name(),
            properties = descriptor.properties.len(),
            builder = descriptor.builder.is_some(),
            creators = descriptor.static_creators.len(),
            withers = descriptor.withers.len(),
            unrecognized = descriptor.unrecognized_methods.len(),
            "modeled class"
        );
        Ok(Some(descriptor))
    }

    pub fn name(&self) -> &str {
        self.class_name.simple_name()
    }

    pub fn package(&self) -> &str {
        self.class_name.package()
    }

    pub fn qualified_name(&self) -> String {
        self.class_name.canonical()
    }

    /// The data class, without its nested value classes and enums
    pub fn to_type_spec(&self) -> AvkResult<TypeSpec> {
        let has_builder = self.builder.is_some();

        let mut spec = TypeSpec::class(self.name());
        spec.modifiers.push(self.visibility);
        if !self.properties.is_empty() {
            spec.modifiers.push(KModifier::Data);
        }
        spec.annotations = self.annotations.clone();
        if self.is_redacted
            && let Some(redacted) = &self.redacted_class
        {
            spec.annotations.push(AnnotationSpec::new(redacted.clone()));
        }
        if self.is_parcelable {
            spec.annotations
                .push(AnnotationSpec::new(ClassName::best_guess(PARCELIZE)));
        }
        spec.doc = self.doc.clone();
        spec.type_variables = self.type_parameters.clone();
        spec.superclass = self.superclass.clone();
        spec.interfaces = self.interfaces.clone();

        let mut constructor = ConstructorSpec::default();
        if is_constructor_internal(has_builder, !self.static_creators.is_empty()) {
            constructor.modifiers.push(KModifier::Internal);
        }
        for property in &self.properties {
            let default =
                constructor_default(&property.ty, has_builder, self.has_serialization_directive)?;
            constructor.properties.push(property.constructor_property(
                self.redacted_class.as_ref(),
                self.is_redacted,
                default,
            ));
        }
        spec.constructor = Some(constructor);

        spec.functions
            .extend(self.properties.iter().filter_map(PropertyDescriptor::accessor_function));
        spec.functions.extend(self.withers.iter().cloned());
        spec.functions.extend(placeholder(&self.unrecognized_methods));
        spec.functions.extend(self.to_builder_functions.iter().cloned());

        if let Some(builder) = &self.builder {
            spec.types.push(builder.to_type_spec(&self.class_name)?);
        }

        let mut companion = TypeSpec::companion();
        companion.properties = self.static_constants.clone();
        for creator in &self.static_creators {
            companion
                .functions
                .extend(creator.functions().into_iter().cloned());
        }
        companion.functions.extend(self.builder_factories.iter().cloned());
        if companion.has_members() {
            spec.types.push(companion);
        }
        Ok(spec)
    }
}

/// Model a static factory returning the value type
fn static_creator(
    method: &ExecutableElement,
    class_name: &ClassName,
    properties: &PropertySet,
) -> AvkResult<StaticCreator> {
    let mut spec = copy_of(method)?;
    if is_long_creator(spec.parameters.len()) {
        spec = spec.annotation(suppress("LongParameterList"));
    }
    let parameter_types: Vec<TypeName> = spec.parameters.iter().map(|p| p.ty.clone()).collect();
    if !is_full_creator(&parameter_types, &properties.types()) {
        return Ok(StaticCreator::Partial(spec.statement(CodeBlock::of("TODO()"))));
    }

    let call = CodeBlock::new()
        .name(&spec.name)
        .lit("(")
        .code(&spec.argument_list())
        .lit(")");
    let bridge = spec
        .clone()
        .annotation(jvm_name(&format!("-{}", spec.name)))
        .annotation(deprecated(
            "Use invoke()",
            &format!("{}({})", class_name.canonical(), spec.argument_list()),
        ))
        .statement(call)
        .statement(todo(REMOVE_BRIDGE_TODO));

    let arguments: Vec<CodeBlock> = properties
        .iter()
        .zip(&spec.parameters)
        .map(|(property, parameter)| {
            CodeBlock::new()
                .name(&property.name)
                .lit(" = ")
                .name(&parameter.name)
        })
        .collect();
    let invoke = spec
        .renamed("invoke")
        .annotation(jvm_name(&spec.name))
        .modifier(KModifier::Operator)
        .statement(
            CodeBlock::of("return ")
                .ty(&TypeName::class(class_name.clone()))
                .lit("(")
                .code(&CodeBlock::join(&arguments, ", "))
                .lit(")"),
        );
    Ok(StaticCreator::Full { bridge, invoke })
}

/// Body of `withX(x)`.
///
/// With a builder the new value goes through its setter and build method,
/// starting from `toBuilder()` when the class has one. Without a builder it
/// is a plain `copy`.
fn wither_body(
    property: &PropertyDescriptor,
    properties: &PropertySet,
    builder: Option<(&BuilderDescriptor, &ClassName)>,
    to_builder: Option<&FunSpec>,
) -> CodeBlock {
    let Some((builder, builder_class, setter)) = builder.and_then(|(builder, class)| {
        builder
            .setter_name(&property.name)
            .map(|setter| (builder, class, setter))
    }) else {
        return CodeBlock::of("return copy(")
            .name(&property.name)
            .lit(" = ")
            .name(&property.name)
            .lit(")");
    };
    let start = match to_builder {
        Some(to_builder) => CodeBlock::new().name(&to_builder.name).lit("()"),
        None => CodeBlock::new()
            .ty(&TypeName::class(builder_class.clone()))
            .lit("(")
            .code(&properties.forwarding_arguments(Some("this")))
            .lit(")"),
    };
    CodeBlock::of("return ")
        .code(&start)
        .lit(".")
        .name(setter)
        .lit("(")
        .name(&property.name)
        .lit(").")
        .name(builder.build_call_name())
        .lit("()")
}

/// A static field as a companion property
fn static_constant(field: &VariableElement) -> AvkResult<PropertySpec> {
    let mut property = PropertySpec::new(field.name.clone(), normalize(&field.ty)?);
    if field.has_modifier(Modifier::Private) {
        property.modifiers.push(KModifier::Private);
    } else if !field.has_modifier(Modifier::Public) {
        property.modifiers.push(KModifier::Internal);
    }
    match &field.constant_value {
        Some(value) => {
            property.modifiers.push(KModifier::Const);
            property.initializer = Some(constant_literal(value));
        }
        None => property.initializer = Some(todo(REPLACE_TODO)),
    }
    property.doc = doc_of(field.doc.as_deref());
    Ok(property)
}

#[cfg(test)]
#[path = "class/class_tests.rs"]
mod class_tests;
