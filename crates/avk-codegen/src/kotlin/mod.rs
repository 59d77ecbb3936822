//! Kotlin source model and writer.
//!
//! A small declarative model of the Kotlin constructs the generator emits
//! (classes, enums, companions, functions, properties and annotations) and a
//! writer that turns it into text.
//!
//! # Structure
//!
//! - [`type_name`]: class and type references with nullability
//! - [`code`]: code fragments whose type references resolve at write time
//! - [`spec`]: declarations
//! - [`naming`]: identifier escaping and literal quoting
//! - `writer`: import handling and rendering, via [`FileSpec::render`]

pub mod code;
pub mod naming;
pub mod spec;
pub mod type_name;
mod writer;

pub use code::{CodeBlock, CodePart};
pub use spec::{
    AnnotationSpec, ConstructorProperty, ConstructorSpec, EnumConstantSpec, FileSpec, FunSpec,
    KModifier, ParameterSpec, PropertySpec, Statement, TypeKind, TypeSpec, UseSiteTarget,
};
pub use type_name::{ClassName, KOTLIN_PACKAGE, TypeName};
