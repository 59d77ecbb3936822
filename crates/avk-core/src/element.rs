//! Element model handed to the generator by the host.
//!
//! This is a serializable mirror of the parts of `javax.lang.model` the
//! generator reads: declared types with their members, annotation mirrors,
//! type mirrors and doc comments. A host (an annotation processor, a javac
//! plugin, a test fixture) produces one [`Round`] per processing round.
//!
//! # Structure
//!
//! - [`TypeElement`]: a class, interface or enum with fields, methods and
//!   nested types
//! - [`ExecutableElement`]: a method
//! - [`VariableElement`]: a field, enum constant or parameter
//! - [`TypeMirror`]: a use of a type
//! - [`AnnotationMirror`]: an annotation with typed member values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Qualified name of the value-class marker annotation
pub const AUTO_VALUE: &str = "com.google.auto.value.AutoValue";

/// Qualified name of the nested builder marker annotation
pub const AUTO_VALUE_BUILDER: &str = "com.google.auto.value.AutoValue.Builder";

/// One processing round's worth of annotated declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Root elements visible in this round
    #[serde(default)]
    pub elements: Vec<TypeElement>,
}

impl Round {
    /// Parse a round from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Java modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Sealed,
    NonSealed,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    /// Java source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

/// Kind of a variable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Field,
    EnumConstant,
}

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Java keyword for this primitive
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

/// A use of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeMirror {
    /// `int`, `boolean`, ...
    Primitive { primitive: PrimitiveKind },

    /// A class or interface type, optionally parameterized.
    ///
    /// `name` is the canonical name (`java.util.Map.Entry`).
    Declared {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeMirror>,
    },

    /// A reference to a type parameter
    TypeVariable { name: String },

    /// `T[]`
    Array { component: Box<TypeMirror> },

    /// `?`, `? extends T`, `? super T`
    Wildcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extends: Option<Box<TypeMirror>>,
        #[serde(default, rename = "super", skip_serializing_if = "Option::is_none")]
        super_bound: Option<Box<TypeMirror>>,
    },

    /// `void`
    Void,
}

impl TypeMirror {
    /// Declared type without arguments
    pub fn declared(name: impl Into<String>) -> Self {
        TypeMirror::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parameterized declared type
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeMirror>) -> Self {
        TypeMirror::Declared {
            name: name.into(),
            args,
        }
    }

    /// Primitive type
    pub fn primitive(primitive: PrimitiveKind) -> Self {
        TypeMirror::Primitive { primitive }
    }

    /// Canonical name of a declared type, ignoring type arguments
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeMirror::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this is a declared type with the given canonical name
    pub fn is_declared(&self, canonical: &str) -> bool {
        self.declared_name() == Some(canonical)
    }

    /// Whether this is `void`
    pub fn is_void(&self) -> bool {
        matches!(self, TypeMirror::Void)
    }
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMirror::Primitive { primitive } => f.write_str(primitive.as_str()),
            TypeMirror::Declared { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeMirror::TypeVariable { name } => f.write_str(name),
            TypeMirror::Array { component } => write!(f, "{component}[]"),
            TypeMirror::Wildcard {
                extends,
                super_bound,
            } => match (extends, super_bound) {
                (Some(bound), _) => write!(f, "? extends {bound}"),
                (None, Some(bound)) => write!(f, "? super {bound}"),
                (None, None) => f.write_str("?"),
            },
            TypeMirror::Void => f.write_str("void"),
        }
    }
}

/// A typed annotation member value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    String(String),
    Bool(bool),
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Char(char),
    /// Enum constant: `type_name` is the enum's canonical name
    Enum { type_name: String, constant: String },
    /// Class literal by canonical name
    Class(String),
    Array(Vec<AnnotationValue>),
    Annotation(AnnotationMirror),
}

/// An annotation applied to an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMirror {
    /// Canonical name of the annotation type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Explicitly supplied members, ordered by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, AnnotationValue>,
}

impl AnnotationMirror {
    /// Marker annotation with no members
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Add a member value
    pub fn with_member(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    /// Simple name of the annotation type (`Nullable` for
    /// `org.jetbrains.annotations.Nullable`)
    pub fn simple_name(&self) -> &str {
        self.type_name
            .rsplit_once('.')
            .map_or(self.type_name.as_str(), |(_, simple)| simple)
    }

    /// String value of a member, if it is a string
    pub fn string_member(&self, name: &str) -> Option<&str> {
        match self.members.get(name) {
            Some(AnnotationValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Compile-time constant value of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    String(String),
    Bool(bool),
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Char(char),
}

/// Field, enum constant or method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableElement {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeMirror,

    #[serde(default)]
    pub kind: FieldKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,

    /// Raw doc comment as returned by `Elements.getDocComment`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<ConstantValue>,
}

impl VariableElement {
    /// A plain parameter or field
    pub fn new(name: impl Into<String>, ty: TypeMirror) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: FieldKind::Field,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            doc: None,
            constant_value: None,
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A type parameter declaration (`T extends Comparable<T>`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameterElement {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeMirror>,
}

/// A method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutableElement {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    pub return_type: TypeMirror,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<VariableElement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterElement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thrown_types: Vec<TypeMirror>,

    #[serde(default)]
    pub varargs: bool,
}

impl ExecutableElement {
    /// A method with no modifiers and no parameters
    pub fn new(name: impl Into<String>, return_type: TypeMirror) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            doc: None,
            return_type,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            thrown_types: Vec::new(),
            varargs: false,
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_abstract(&self) -> bool {
        self.has_modifier(Modifier::Abstract)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier(Modifier::Static)
    }

    /// One-line summary used in manual-migration notices:
    /// `public abstract java.lang.String name(...)`
    pub fn signature(&self) -> String {
        let modifiers = self
            .modifiers
            .iter()
            .map(Modifier::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {} {}(...)", modifiers, self.return_type, self.name)
            .trim_start()
            .to_string()
    }
}

/// Summary of the element enclosing a member type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnclosingElement {
    pub qualified_name: String,

    #[serde(default)]
    pub kind: ElementKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,
}

impl EnclosingElement {
    /// Innermost simple name
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Whether the enclosing type is itself a value declaration
    pub fn is_value_class(&self) -> bool {
        self.annotations.iter().any(|a| a.type_name == AUTO_VALUE)
    }
}

/// A class, interface or enum declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeElement {
    /// Canonical name (`test.Outer.Inner`)
    pub qualified_name: String,

    /// Package (`test`); empty for the default package
    #[serde(default)]
    pub package: String,

    #[serde(default)]
    pub kind: ElementKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeMirror>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeMirror>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterElement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<VariableElement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<ExecutableElement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_types: Vec<TypeElement>,

    /// Present for member types; `None` means top level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<EnclosingElement>,
}

impl TypeElement {
    /// A top-level class with no members
    pub fn new(package: impl Into<String>, simple_name: &str) -> Self {
        let package = package.into();
        let qualified_name = if package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{package}.{simple_name}")
        };
        Self {
            qualified_name,
            package,
            kind: ElementKind::Class,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            doc: None,
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested_types: Vec::new(),
            enclosing: None,
        }
    }

    /// A member type of `parent`, with its enclosing summary filled in
    pub fn nested_in(parent: &TypeElement, simple_name: &str) -> Self {
        let mut element = Self::new(parent.package.clone(), simple_name);
        element.qualified_name = format!("{}.{}", parent.qualified_name, simple_name);
        element.enclosing = Some(parent.as_enclosing());
        element
    }

    /// Last segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, simple)| simple)
    }

    /// Simple name of the outermost enclosing class (own name at top level)
    pub fn outermost_simple_name(&self) -> &str {
        let relative = self
            .qualified_name
            .strip_prefix(&self.package)
            .map(|rest| rest.trim_start_matches('.'))
            .unwrap_or(&self.qualified_name);
        relative.split('.').next().unwrap_or(relative)
    }

    pub fn is_top_level(&self) -> bool {
        self.enclosing.is_none()
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn has_annotation(&self, type_name: &str) -> bool {
        self.annotations.iter().any(|a| a.type_name == type_name)
    }

    /// Annotated with `@AutoValue`
    pub fn is_value_class(&self) -> bool {
        self.has_annotation(AUTO_VALUE)
    }

    /// Annotated with `@AutoValue.Builder`
    pub fn is_builder_type(&self) -> bool {
        self.has_annotation(AUTO_VALUE_BUILDER)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ElementKind::Enum
    }

    /// The type this element declares, parameterized by its own type
    /// variables (`Foo<T>`)
    pub fn as_type(&self) -> TypeMirror {
        TypeMirror::Declared {
            name: self.qualified_name.clone(),
            args: self
                .type_parameters
                .iter()
                .map(|p| TypeMirror::TypeVariable {
                    name: p.name.clone(),
                })
                .collect(),
        }
    }

    /// Summary used as the `enclosing` of member types
    pub fn as_enclosing(&self) -> EnclosingElement {
        EnclosingElement {
            qualified_name: self.qualified_name.clone(),
            kind: self.kind,
            annotations: self.annotations.clone(),
        }
    }
}
