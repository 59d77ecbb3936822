//! Declarative model of a Kotlin source file

use super::code::CodeBlock;
use super::type_name::{ClassName, TypeName};
use std::fmt;

/// Kotlin declaration modifiers, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KModifier {
    Public,
    Protected,
    Private,
    Internal,
    Override,
    Const,
    Data,
    Operator,
    Vararg,
}

impl KModifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            KModifier::Public => "public",
            KModifier::Protected => "protected",
            KModifier::Private => "private",
            KModifier::Internal => "internal",
            KModifier::Override => "override",
            KModifier::Const => "const",
            KModifier::Data => "data",
            KModifier::Operator => "operator",
            KModifier::Vararg => "vararg",
        }
    }

    pub fn is_visibility(&self) -> bool {
        matches!(
            self,
            KModifier::Public | KModifier::Protected | KModifier::Private | KModifier::Internal
        )
    }
}

impl fmt::Display for KModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Where a property annotation applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSiteTarget {
    Get,
}

/// `@Annotation(members)`
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpec {
    pub class_name: ClassName,
    pub members: Vec<CodeBlock>,
    pub use_site: Option<UseSiteTarget>,
}

impl AnnotationSpec {
    pub fn new(class_name: ClassName) -> Self {
        Self {
            class_name,
            members: Vec::new(),
            use_site: None,
        }
    }

    pub fn member(mut self, member: CodeBlock) -> Self {
        self.members.push(member);
        self
    }

    pub fn use_site(mut self, target: UseSiteTarget) -> Self {
        self.use_site = Some(target);
        self
    }
}

/// A function or constructor parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeName,
    pub default: Option<CodeBlock>,
    pub modifiers: Vec<KModifier>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: TypeName) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            modifiers: Vec::new(),
        }
    }
}

/// A `val` or `var`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: TypeName,
    pub mutable: bool,
    pub modifiers: Vec<KModifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub initializer: Option<CodeBlock>,
    pub doc: Option<String>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, ty: TypeName) -> Self {
        Self {
            name: name.into(),
            ty,
            mutable: false,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            initializer: None,
            doc: None,
        }
    }
}

/// One line of a function body
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Code(CodeBlock),
    /// Written as `// text`
    Comment(String),
}

/// A function
#[derive(Debug, Clone, PartialEq)]
pub struct FunSpec {
    pub name: String,
    pub modifiers: Vec<KModifier>,
    pub annotations: Vec<AnnotationSpec>,
    /// Declared type variables, with bounds
    pub type_variables: Vec<TypeName>,
    pub parameters: Vec<ParameterSpec>,
    /// `None` for `Unit`
    pub returns: Option<TypeName>,
    pub body: Vec<Statement>,
    pub doc: Option<String>,
}

impl FunSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            type_variables: Vec::new(),
            parameters: Vec::new(),
            returns: None,
            body: Vec::new(),
            doc: None,
        }
    }

    pub fn modifier(mut self, modifier: KModifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, ty: TypeName) -> Self {
        self.returns = Some(ty);
        self
    }

    pub fn statement(mut self, code: CodeBlock) -> Self {
        self.body.push(Statement::Code(code));
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.body.push(Statement::Comment(text.into()));
        self
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    /// Same signature, no body, under a new name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Vec::new(),
            ..self.clone()
        }
    }

    /// Parameter names joined for a call site: `a, b, c`
    pub fn argument_list(&self) -> CodeBlock {
        let names: Vec<CodeBlock> = self
            .parameters
            .iter()
            .map(|p| CodeBlock::new().name(&p.name))
            .collect();
        CodeBlock::join(&names, ", ")
    }
}

/// A primary-constructor parameter that declares a property
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorProperty {
    pub property: PropertySpec,
    pub default: Option<CodeBlock>,
}

/// A primary constructor made of property declarations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorSpec {
    pub modifiers: Vec<KModifier>,
    pub properties: Vec<ConstructorProperty>,
}

/// What a [`TypeSpec`] declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Enum,
    Companion,
}

/// An enum entry
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstantSpec {
    pub name: String,
    pub annotations: Vec<AnnotationSpec>,
    pub doc: Option<String>,
}

/// A class, enum class or companion object
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<KModifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub doc: Option<String>,
    pub type_variables: Vec<TypeName>,
    pub constructor: Option<ConstructorSpec>,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub enum_constants: Vec<EnumConstantSpec>,
    pub properties: Vec<PropertySpec>,
    pub functions: Vec<FunSpec>,
    pub types: Vec<TypeSpec>,
}

impl TypeSpec {
    fn empty(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            doc: None,
            type_variables: Vec::new(),
            constructor: None,
            superclass: None,
            interfaces: Vec::new(),
            enum_constants: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::empty(TypeKind::Class, name)
    }

    pub fn enum_class(name: impl Into<String>) -> Self {
        Self::empty(TypeKind::Enum, name)
    }

    pub fn companion() -> Self {
        Self::empty(TypeKind::Companion, "Companion")
    }

    pub fn has_members(&self) -> bool {
        !self.enum_constants.is_empty()
            || !self.properties.is_empty()
            || !self.functions.is_empty()
            || !self.types.is_empty()
    }

    /// Simple names of this type and every type nested in it
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if self.kind != TypeKind::Companion {
            names.push(self.name.as_str());
        }
        for nested in &self.types {
            names.extend(nested.declared_names());
        }
        names
    }
}

/// One `.kt` file holding a single top-level type
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpec {
    pub package: String,
    pub root: TypeSpec,
}

impl FileSpec {
    pub fn new(package: impl Into<String>, root: TypeSpec) -> Self {
        Self {
            package: package.into(),
            root,
        }
    }

    /// `Name.kt`
    pub fn file_name(&self) -> String {
        format!("{}.kt", self.root.name)
    }
}
