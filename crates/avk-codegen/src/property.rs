//! Value-class properties
//!
//! One [`PropertyDescriptor`] per abstract accessor of a value class. Marker
//! annotations are consumed here: nullability ends up in the type, override
//! and redaction in flags, and only the remaining annotations are carried.

use crate::annotation::{Marker, to_annotation_spec};
use crate::docs::doc_of;
use crate::kotlin::naming::decapitalize;
use crate::kotlin::{
    AnnotationSpec, ClassName, CodeBlock, ConstructorProperty, FunSpec, KModifier, PropertySpec,
    TypeName, UseSiteTarget,
};
use crate::method::{deprecated, jvm_name, todo};
use crate::normalize::normalize;
use crate::policy::{public_or_internal, uses_getter_syntax};
use avk_core::{AvkResult, ExecutableElement, PrimitiveKind, TypeElement, TypeMirror};
use tracing::trace;

/// Body line telling users to inline the bridge call
pub const REMOVE_BRIDGE_TODO: &str = "Remove this function. Use the above line to auto-migrate.";

/// A property of a value class
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Kotlin property name
    pub name: String,
    /// Name of the Java accessor method
    pub accessor_name: String,
    pub ty: TypeName,
    /// Annotations left after marker classification
    pub annotations: Vec<AnnotationSpec>,
    pub is_override: bool,
    pub is_redacted: bool,
    pub visibility: KModifier,
    pub doc: Option<String>,
}

/// Every property of a class, in accessor order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    pub properties: Vec<PropertyDescriptor>,
    /// First `Redacted` annotation class seen on an accessor
    pub redacted_class: Option<ClassName>,
}

impl PropertySet {
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn types(&self) -> Vec<TypeName> {
        self.properties.iter().map(|p| p.ty.clone()).collect()
    }

    /// Named arguments passing each property through: `a = a, b = b`
    pub fn forwarding_arguments(&self, receiver: Option<&str>) -> CodeBlock {
        let arguments: Vec<CodeBlock> = self
            .properties
            .iter()
            .map(|p| {
                let value = match receiver {
                    Some(receiver) => CodeBlock::of(format!("{receiver}.")).name(&p.name),
                    None => CodeBlock::new().name(&p.name),
                };
                CodeBlock::new().name(&p.name).lit(" = ").code(&value)
            })
            .collect();
        CodeBlock::join(&arguments, ", ")
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a PropertyDescriptor;
    type IntoIter = std::slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

/// Whether a method is a property accessor: abstract, instance, no
/// parameters, non-void and not returning the builder
pub fn is_accessor(method: &ExecutableElement, builder: Option<&str>) -> bool {
    method.is_abstract()
        && !method.is_static()
        && method.parameters.is_empty()
        && !method.return_type.is_void()
        && !builder.is_some_and(|b| method.return_type.is_declared(b))
}

/// Bean prefix of an accessor, if it has one.
///
/// `is` only counts for primitive booleans.
fn bean_prefix(method: &ExecutableElement) -> Option<&'static str> {
    let has_prefix = |prefix: &str| {
        method
            .name
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_uppercase())
    };
    if has_prefix("get") {
        Some("get")
    } else if has_prefix("is") && method.return_type == TypeMirror::primitive(PrimitiveKind::Boolean)
    {
        Some("is")
    } else {
        None
    }
}

/// Collect the properties of a value class.
///
/// When every accessor uses a `get`/`is` prefix, property names drop it.
pub fn collect_properties(element: &TypeElement, builder: Option<&str>) -> AvkResult<PropertySet> {
    let accessors: Vec<&ExecutableElement> = element
        .methods
        .iter()
        .filter(|m| is_accessor(m, builder))
        .collect();
    let strip_prefixes = !accessors.is_empty() && accessors.iter().all(|m| bean_prefix(m).is_some());

    let mut set = PropertySet::default();
    for method in accessors {
        let name = match bean_prefix(method) {
            Some(prefix) if strip_prefixes => decapitalize(&method.name[prefix.len()..]),
            _ => method.name.clone(),
        };
        let (property, redacted) = PropertyDescriptor::from_accessor(name, method)?;
        trace!(property = %property.name, ty = %property.ty, "collected property");
        if set.redacted_class.is_none() {
            set.redacted_class = redacted;
        }
        set.properties.push(property);
    }
    Ok(set)
}

impl PropertyDescriptor {
    /// Build a property from its accessor, also returning the accessor's
    /// `Redacted` annotation class if it has one
    pub fn from_accessor(
        name: String,
        method: &ExecutableElement,
    ) -> AvkResult<(Self, Option<ClassName>)> {
        let mut nullable = false;
        let mut is_override = false;
        let mut redacted = None;
        let mut annotations = Vec::new();
        for mirror in &method.annotations {
            match Marker::classify(mirror) {
                Marker::NotNull => {}
                Marker::Nullable => nullable = true,
                Marker::Override => is_override = true,
                Marker::Redacted(class) => {
                    redacted.get_or_insert(class);
                }
                Marker::SerializationName(json_name) if json_name == name => {}
                Marker::SerializationName(_) | Marker::Other => {
                    annotations.push(to_annotation_spec(mirror))
                }
            }
        }
        let property = Self {
            accessor_name: method.name.clone(),
            ty: normalize(&method.return_type)?.copy(nullable),
            annotations,
            is_override,
            is_redacted: redacted.is_some(),
            visibility: public_or_internal(&method.modifiers),
            doc: doc_of(method.doc.as_deref()),
            name,
        };
        Ok((property, redacted))
    }

    pub fn uses_getter_syntax(&self) -> bool {
        uses_getter_syntax(&self.name, &self.accessor_name)
    }

    /// Whether the property keeps a separate accessor function
    pub fn has_accessor_function(&self) -> bool {
        !self.uses_getter_syntax()
    }

    /// Primary-constructor declaration.
    ///
    /// Properties without getter syntax keep their Java accessor name through
    /// `@get:JvmName`. The property's own `Redacted` marker is only written
    /// when the class as a whole is not redacted.
    pub fn constructor_property(
        &self,
        redacted_class: Option<&ClassName>,
        class_redacted: bool,
        default: Option<CodeBlock>,
    ) -> ConstructorProperty {
        let mut property = PropertySpec::new(self.name.clone(), self.ty.clone());
        property.annotations = self.annotations.clone();
        if !self.uses_getter_syntax() && !self.is_override {
            property
                .annotations
                .push(jvm_name(&self.accessor_name).use_site(UseSiteTarget::Get));
        }
        if let Some(redacted_class) = redacted_class
            && self.is_redacted
            && !class_redacted
        {
            property
                .annotations
                .push(AnnotationSpec::new(redacted_class.clone()));
        }
        property.doc = self.doc.clone();
        ConstructorProperty { property, default }
    }

    /// The Java accessor as a Kotlin function.
    ///
    /// Overrides stay as plain functions returning the property. Everything
    /// else becomes a deprecated bridge hidden from Java callers.
    pub fn accessor_function(&self) -> Option<FunSpec> {
        if !self.has_accessor_function() {
            return None;
        }
        let fun = FunSpec::new(self.accessor_name.clone()).returns(self.ty.clone());
        if self.is_override {
            return Some(
                fun.modifier(KModifier::Override)
                    .statement(CodeBlock::of("return ").name(&self.name)),
            );
        }
        Some(
            fun.modifier(self.visibility)
                .annotation(AnnotationSpec::new(ClassName::new("kotlin.jvm", "JvmSynthetic")))
                .annotation(jvm_name(&format!("-{}", self.name)))
                .annotation(deprecated("Use the property", &self.name))
                .statement(CodeBlock::new().name(&self.name))
                .statement(todo(REMOVE_BRIDGE_TODO)),
        )
    }
}
