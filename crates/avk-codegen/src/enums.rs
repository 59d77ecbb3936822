//! Nested enum conversion
//!
//! Only plain enums convert: constants with annotations and docs, plus
//! nested enums of the same shape. An enum with its own methods or with a
//! nested non-enum type is reported and left out.

use crate::annotation::{JSON_CLASS, class_annotations, has_json_name, to_annotation_spec};
use crate::docs::doc_of;
use crate::kotlin::{AnnotationSpec, ClassName, CodeBlock, EnumConstantSpec, KModifier, TypeSpec};
use crate::policy::visibility_of;
use avk_core::{FieldKind, Messager, TypeElement};
use tracing::debug;

pub const NESTED_NON_ENUM: &str = "Nested types in enums can only be other enums";

pub const ENUM_WITH_METHODS: &str = "Cannot convert nested enums with methods";

/// Methods every Java enum has implicitly
const IMPLICIT_METHODS: &[&str] = &["values", "valueOf"];

/// A converted enum
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    pub class_name: ClassName,
    pub visibility: KModifier,
    pub doc: Option<String>,
    pub annotations: Vec<AnnotationSpec>,
    pub constants: Vec<EnumConstantSpec>,
    pub nested_enums: Vec<EnumDescriptor>,
}

impl EnumDescriptor {
    /// Convert an enum declaration.
    ///
    /// Returns `None` after reporting an error when the enum has behavior.
    /// A nested enum that fails on its own is dropped and its parent kept.
    pub fn convert(element: &TypeElement, messager: &dyn Messager) -> Option<Self> {
        let mut annotations = class_annotations(&element.annotations);
        let mut json_constants = false;
        let constants = element
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::EnumConstant)
            .map(|f| {
                json_constants |= has_json_name(f);
                EnumConstantSpec {
                    name: f.name.clone(),
                    annotations: f.annotations.iter().map(to_annotation_spec).collect(),
                    doc: doc_of(f.doc.as_deref()),
                }
            })
            .collect();

        if json_constants && !annotations.iter().any(|a| a.class_name.simple_name() == "JsonClass") {
            annotations.push(
                AnnotationSpec::new(ClassName::best_guess(JSON_CLASS))
                    .member(CodeBlock::of("generateAdapter = false")),
            );
        }

        let mut nested_enums = Vec::new();
        for nested in &element.nested_types {
            if !nested.is_enum() {
                messager.error(NESTED_NON_ENUM, Some(&nested.qualified_name));
                return None;
            }
            if let Some(converted) = Self::convert(nested, messager) {
                nested_enums.push(converted);
            }
        }

        if let Some(method) = element
            .methods
            .iter()
            .find(|m| !IMPLICIT_METHODS.contains(&m.name.as_str()))
        {
            messager.error(
                ENUM_WITH_METHODS,
                Some(&format!("{}#{}", element.qualified_name, method.name)),
            );
            return None;
        }

        debug!(enum_name = %element.qualified_name, "converted enum");
        Some(Self {
            class_name: ClassName::in_package(&element.package, &element.qualified_name),
            visibility: visibility_of(&element.modifiers),
            doc: doc_of(element.doc.as_deref()),
            annotations,
            constants,
            nested_enums,
        })
    }

    pub fn name(&self) -> &str {
        self.class_name.simple_name()
    }

    pub fn qualified_name(&self) -> String {
        self.class_name.canonical()
    }

    pub fn to_type_spec(&self) -> TypeSpec {
        let mut spec = TypeSpec::enum_class(self.name());
        spec.modifiers.push(self.visibility);
        spec.annotations = self.annotations.clone();
        spec.doc = self.doc.clone();
        spec.enum_constants = self.constants.clone();
        spec.types = self.nested_enums.iter().map(Self::to_type_spec).collect();
        spec
    }
}
