//! Nested builder conversion
//!
//! A `@AutoValue.Builder` type becomes a Kotlin class with an `internal`
//! constructor taking every property, one `private var` per property, the
//! original setters assigning those vars, and the auto-build method
//! constructing the value.
//!
//! A property may also be settable through a sub-builder (`fooBuilder()`).
//! When both entry points exist they are made mutually exclusive with
//! `check(...)` guards.

use crate::annotation::class_annotations;
use crate::docs::doc_of;
use crate::kotlin::naming::capitalize;
use crate::kotlin::{
    AnnotationSpec, ClassName, CodeBlock, ConstructorProperty, ConstructorSpec, FunSpec,
    KModifier, PropertySpec, TypeName, TypeSpec,
};
use crate::method::{copy_of, suppress, type_variable_of};
use crate::normalize::{normalize, primitive_default};
use crate::policy::{is_long_parameter_list, needs_sub_builder_guard, public_or_internal};
use crate::property::PropertySet;
use avk_core::{AvkResult, ExecutableElement, Messager, TypeElement};
use tracing::debug;

pub const MISSING_BUILD_METHOD: &str = "Builder is missing an abstract build method";

pub const BUILD_HOOK_TODO: &str = "TODO Move any validation from the source build() method here";

const GUAVA_COLLECT_PACKAGE: &str = "com.google.common.collect";

const INDENT: &str = "  ";

pub const PLACEHOLDER_TODO: &str =
    "TODO This is a placeholder to mention the following methods need to be moved manually over:";

/// `fooBuilder()` on a builder
#[derive(Debug, Clone, PartialEq)]
pub struct SubBuilder {
    pub accessor: FunSpec,
    /// Type of the nested builder, non-null
    pub ty: TypeName,
}

impl SubBuilder {
    /// Name of the private field caching the nested builder
    pub fn field_name(&self) -> String {
        format!("_{}", self.accessor.name)
    }

    /// Name of the private flag recording that a setter was called
    pub fn set_flag_name(property: &str) -> String {
        format!("_{property}Set")
    }

    fn raw_class(&self) -> (Option<&ClassName>, &[TypeName]) {
        match &self.ty {
            TypeName::Parameterized { raw, args, .. } => (Some(raw), args.as_slice()),
            TypeName::Class { class, .. } => (Some(class), &[][..]),
            TypeName::Variable { .. } => (None, &[][..]),
        }
    }

    /// Method copying an existing Guava immutable collection into its builder
    fn seed_method(&self) -> Option<&'static str> {
        let enclosing = self.raw_class().0?.enclosing()?;
        if enclosing.package() != GUAVA_COLLECT_PACKAGE {
            return None;
        }
        let name = enclosing.simple_name();
        Some(if name.contains("Map") || name.contains("Table") {
            "putAll"
        } else {
            "addAll"
        })
    }

    /// Expression creating a fresh nested builder.
    ///
    /// `Outer.Builder<T>` is created with `Outer.builder<T>()`; any other type
    /// through its no-arg constructor.
    fn initializer(&self) -> CodeBlock {
        let (raw, args) = self.raw_class();
        if let Some(raw) = raw
            && raw.simple_name() == "Builder"
            && let Some(enclosing) = raw.enclosing()
        {
            let mut code = CodeBlock::new()
                .ty(&TypeName::class(enclosing))
                .lit(".builder");
            if !args.is_empty() {
                let args: Vec<CodeBlock> = args.iter().map(|a| CodeBlock::new().ty(a)).collect();
                code = code.lit("<").code(&CodeBlock::join(&args, ", ")).lit(">");
            }
            return code.lit("()");
        }
        CodeBlock::new().ty(&self.ty).lit("()")
    }

    /// Expression creating the nested builder, carrying over a value that was
    /// already set (for example by `toBuilder()`).
    ///
    /// Guava collections are copied in with `addAll`/`putAll`; anything else
    /// is expected to offer `toBuilder()`.
    fn seeded_initializer(&self, property: &str) -> CodeBlock {
        let field = self.field_name();
        let lambda = |seed: CodeBlock| {
            seed.lit(format!("\n{INDENT}"))
                .name(property)
                .lit(" = null")
                .lit(format!("\n{INDENT}"))
                .name(&field)
                .lit(" = subBuilder\n}")
        };
        match self.seed_method() {
            Some(method) => lambda(
                self.initializer()
                    .lit(".also { subBuilder ->")
                    .lit(format!("\n{INDENT}"))
                    .name(property)
                    .lit(format!("?.let {{ subBuilder.{method}(it) }}")),
            ),
            None => lambda(
                CodeBlock::of("(")
                    .name(property)
                    .lit("?.toBuilder() ?: ")
                    .code(&self.initializer())
                    .lit(").also { subBuilder ->"),
            ),
        }
    }
}

/// A property as seen by the builder
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderPropertyDescriptor {
    pub name: String,
    pub ty: TypeName,
    /// Setter signatures, without bodies
    pub setters: Vec<FunSpec>,
    pub sub_builder: Option<SubBuilder>,
}

impl BuilderPropertyDescriptor {
    fn needs_guard(&self) -> bool {
        needs_sub_builder_guard(!self.setters.is_empty(), self.sub_builder.is_some())
    }
}

/// A converted builder type
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderDescriptor {
    pub name: String,
    pub visibility: KModifier,
    pub doc: Option<String>,
    pub annotations: Vec<AnnotationSpec>,
    pub type_variables: Vec<TypeName>,
    /// One entry per value property, in property order
    pub properties: Vec<BuilderPropertyDescriptor>,
    /// Concrete method wrapping the finalize method, if any
    pub build_method: Option<FunSpec>,
    /// Abstract method creating the value
    pub finalize_method: FunSpec,
    /// Signatures of methods that could not be mapped
    pub unrecognized_methods: Vec<String>,
}

impl BuilderDescriptor {
    /// Read the builder type of `value`.
    ///
    /// Reports an error and returns `None` when the builder has no abstract
    /// build method.
    pub fn from_element(
        builder: &TypeElement,
        value: &TypeElement,
        properties: &PropertySet,
        messager: &dyn Messager,
    ) -> AvkResult<Option<Self>> {
        let builder_name = builder.qualified_name.as_str();
        let value_name = value.qualified_name.as_str();

        let mut setters: Vec<Vec<FunSpec>> = vec![Vec::new(); properties.len()];
        let mut sub_builders: Vec<Option<SubBuilder>> = vec![None; properties.len()];
        let mut finalize = None;
        let mut build_method = None;
        let mut unrecognized = Vec::new();

        for method in &builder.methods {
            let returns_builder = method.return_type.is_declared(builder_name);
            let returns_value = method.return_type.is_declared(value_name);
            let no_parameters = method.parameters.is_empty();

            if method.is_abstract() && returns_builder {
                if let Some(index) = setter_target(method, properties) {
                    if method.parameters.len() != 1 {
                        messager.warning(
                            &format!("Setter with surprising params: {}", method.name),
                            Some(builder_name),
                        );
                    }
                    setters[index].push(copy_of(method)?);
                    continue;
                }
            } else if returns_value && no_parameters && !method.is_static() {
                if method.is_abstract() {
                    if finalize.is_none() {
                        finalize = Some(copy_of(method)?);
                        continue;
                    }
                } else if build_method.is_none() {
                    build_method = Some(copy_of(method)?);
                    continue;
                }
            } else if method.is_abstract()
                && no_parameters
                && let Some(index) = sub_builder_target(method, properties)
                && sub_builders[index].is_none()
            {
                sub_builders[index] = Some(SubBuilder {
                    accessor: copy_of(method)?,
                    ty: normalize(&method.return_type)?,
                });
                continue;
            }
            unrecognized.push(method.signature());
        }

        let Some(finalize_method) = finalize else {
            messager.error(MISSING_BUILD_METHOD, Some(builder_name));
            return Ok(None);
        };

        let properties = properties
            .iter()
            .zip(setters.into_iter().zip(sub_builders))
            .map(|(property, (setters, sub_builder))| BuilderPropertyDescriptor {
                name: property.name.clone(),
                ty: property.ty.clone(),
                setters,
                sub_builder,
            })
            .collect();

        let type_variables = builder
            .type_parameters
            .iter()
            .map(type_variable_of)
            .collect::<AvkResult<Vec<_>>>()?;

        debug!(
            builder = builder_name,
            unrecognized = unrecognized.len(),
            "modeled builder"
        );

        Ok(Some(Self {
            name: builder.simple_name().to_string(),
            visibility: public_or_internal(&builder.modifiers),
            doc: doc_of(builder.doc.as_deref()),
            annotations: class_annotations(&builder.annotations),
            type_variables,
            properties,
            build_method,
            finalize_method,
            unrecognized_methods: unrecognized,
        }))
    }

    /// Name of the method `toBuilder().x(v).<build>()` should call
    pub fn build_call_name(&self) -> &str {
        self.build_method
            .as_ref()
            .map_or(self.finalize_method.name.as_str(), |m| m.name.as_str())
    }

    /// First setter name of a property
    pub fn setter_name(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == property)
            .and_then(|p| p.setters.first())
            .map(|s| s.name.as_str())
    }

    /// The Kotlin builder class
    pub fn to_type_spec(&self, value_class: &ClassName) -> AvkResult<TypeSpec> {
        let mut spec = TypeSpec::class(self.name.clone());
        spec.modifiers.push(self.visibility);
        spec.annotations = self.annotations.clone();
        if is_long_parameter_list(self.properties.len()) {
            spec.annotations.push(suppress("LongParameterList"));
        }
        spec.doc = self.doc.clone();
        spec.type_variables = self.type_variables.clone();

        let mut constructor = ConstructorSpec {
            modifiers: vec![KModifier::Internal],
            properties: Vec::new(),
        };
        let mut arguments = Vec::new();

        for property in &self.properties {
            let zero = if property.ty.is_nullable() {
                None
            } else {
                primitive_default(&property.ty)?
            };
            let (ty, default, null_check) = match zero {
                Some(zero) => (property.ty.clone(), zero, false),
                None => (
                    property.ty.copy(true),
                    CodeBlock::of("null"),
                    !property.ty.is_nullable(),
                ),
            };
            let mut var = PropertySpec::new(property.name.clone(), ty);
            var.mutable = true;
            var.modifiers.push(KModifier::Private);
            constructor.properties.push(ConstructorProperty {
                property: var,
                default: Some(default),
            });

            let mut value = CodeBlock::new();
            if let Some(sub_builder) = &property.sub_builder {
                let mut field = PropertySpec::new(sub_builder.field_name(), sub_builder.ty.copy(true));
                field.mutable = true;
                field.modifiers.push(KModifier::Private);
                field.initializer = Some(CodeBlock::of("null"));
                spec.properties.push(field);
                if property.needs_guard() {
                    let mut flag = PropertySpec::new(
                        SubBuilder::set_flag_name(&property.name),
                        TypeName::kotlin("Boolean"),
                    );
                    flag.mutable = true;
                    flag.modifiers.push(KModifier::Private);
                    flag.initializer = Some(CodeBlock::of("false"));
                    spec.properties.push(flag);
                }
                value = value
                    .name(sub_builder.field_name())
                    .lit("?.build() ?: ");
            }
            value = value.name(&property.name);
            if null_check {
                value = value
                    .lit(" ?: error(")
                    .string(format!("{} == null", property.name))
                    .lit(")");
            }
            arguments.push(CodeBlock::new().name(&property.name).lit(" = ").code(&value));

            for setter in &property.setters {
                spec.functions.push(Self::setter_body(property, setter));
            }
            if let Some(sub_builder) = &property.sub_builder {
                spec.functions.push(Self::sub_builder_body(property, sub_builder));
            }
        }
        spec.constructor = Some(constructor);

        if let Some(hook) = &self.build_method {
            spec.functions.push(
                hook.clone()
                    .comment(BUILD_HOOK_TODO)
                    .statement(CodeBlock::of("return ").name(&self.finalize_method.name).lit("()")),
            );
        }

        spec.functions.push(
            self.finalize_method.clone().statement(
                CodeBlock::of("return ")
                    .ty(&TypeName::class(value_class.clone()))
                    .lit("(")
                    .code(&CodeBlock::join(&arguments, ", "))
                    .lit(")"),
            ),
        );

        if let Some(placeholder) = placeholder(&self.unrecognized_methods) {
            spec.functions.push(placeholder);
        }
        Ok(spec)
    }

    fn setter_body(property: &BuilderPropertyDescriptor, setter: &FunSpec) -> FunSpec {
        let mut fun = setter.clone();
        if let Some(sub_builder) = property.sub_builder.as_ref().filter(|_| property.needs_guard()) {
            fun = fun
                .statement(
                    CodeBlock::of("check(")
                        .name(sub_builder.field_name())
                        .lit(" == null) { ")
                        .string(format!(
                            "Cannot set {} after calling {}()",
                            property.name, sub_builder.accessor.name
                        ))
                        .lit(" }"),
                )
                .statement(
                    CodeBlock::new()
                        .name(SubBuilder::set_flag_name(&property.name))
                        .lit(" = true"),
                );
        }
        match setter.parameters.first() {
            Some(parameter) => fun.statement(
                CodeBlock::of("return apply { this.")
                    .name(&property.name)
                    .lit(" = ")
                    .name(&parameter.name)
                    .lit(" }"),
            ),
            None => fun.statement(CodeBlock::of("return this")),
        }
    }

    /// `fooBuilder()`: returns the cached nested builder, creating it on
    /// first use from whatever value the property already holds.
    fn sub_builder_body(property: &BuilderPropertyDescriptor, sub_builder: &SubBuilder) -> FunSpec {
        let mut fun = sub_builder.accessor.clone();
        if property.needs_guard() {
            fun = fun.statement(
                CodeBlock::of("check(!")
                    .name(SubBuilder::set_flag_name(&property.name))
                    .lit(") { ")
                    .string(format!(
                        "Cannot call {}() after setting {}",
                        sub_builder.accessor.name, property.name
                    ))
                    .lit(" }"),
            );
        }
        fun.statement(
            CodeBlock::of("return ")
                .name(sub_builder.field_name())
                .lit(" ?: ")
                .code(&sub_builder.seeded_initializer(&property.name)),
        )
    }
}

/// Property a builder method sets: `foo(...)` or `setFoo(...)`
fn setter_target(method: &ExecutableElement, properties: &PropertySet) -> Option<usize> {
    properties
        .iter()
        .position(|p| method.name == p.name)
        .or_else(|| {
            properties
                .iter()
                .position(|p| method.name == format!("set{}", capitalize(&p.name)))
        })
}

/// Property a `fooBuilder()` method builds
fn sub_builder_target(method: &ExecutableElement, properties: &PropertySet) -> Option<usize> {
    let property = method.name.strip_suffix("Builder")?;
    properties.iter().position(|p| p.name == property)
}

/// `fun placeholder(): Nothing` listing methods to migrate by hand
pub fn placeholder(unrecognized: &[String]) -> Option<FunSpec> {
    if unrecognized.is_empty() {
        return None;
    }
    let mut fun = FunSpec::new("placeholder")
        .returns(TypeName::kotlin("Nothing"))
        .comment(PLACEHOLDER_TODO);
    for signature in unrecognized {
        fun = fun.comment(format!("  {signature}"));
    }
    Some(fun.statement(CodeBlock::of("TODO()")))
}
