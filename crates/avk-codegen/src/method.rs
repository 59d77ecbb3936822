//! Java method signatures as Kotlin functions

use crate::annotation::is_nullable;
use crate::docs::doc_of;
use crate::kotlin::{
    AnnotationSpec, ClassName, CodeBlock, FunSpec, KModifier, KOTLIN_PACKAGE, ParameterSpec, TypeName,
};
use crate::normalize::normalize;
use crate::policy::visibility_of;
use avk_core::{AvkError, AvkResult, ExecutableElement, TypeParameterElement, VariableElement};

/// `@kotlin.jvm.JvmStatic`
pub fn jvm_static() -> AnnotationSpec {
    AnnotationSpec::new(ClassName::new("kotlin.jvm", "JvmStatic"))
}

/// `@kotlin.jvm.JvmName("name")`
pub fn jvm_name(name: &str) -> AnnotationSpec {
    AnnotationSpec::new(ClassName::new("kotlin.jvm", "JvmName")).member(CodeBlock::new().string(name))
}

/// `@kotlin.Deprecated(message = ..., replaceWith = ReplaceWith(...))`
pub fn deprecated(message: &str, replace_with: &str) -> AnnotationSpec {
    AnnotationSpec::new(ClassName::kotlin("Deprecated"))
        .member(CodeBlock::of("message = ").string(message))
        .member(
            CodeBlock::of("replaceWith = ")
                .ty(&TypeName::kotlin("ReplaceWith"))
                .lit("(")
                .string(replace_with)
                .lit(")"),
        )
}

/// `@kotlin.Suppress("name")`
pub fn suppress(name: &str) -> AnnotationSpec {
    AnnotationSpec::new(ClassName::kotlin("Suppress")).member(CodeBlock::new().string(name))
}

/// `TODO("message")`
pub fn todo(message: &str) -> CodeBlock {
    CodeBlock::of("TODO(").string(message).lit(")")
}

/// Parameter with its nullability taken from a `Nullable` marker
pub fn parameter_of(parameter: &VariableElement) -> AvkResult<ParameterSpec> {
    let ty = normalize(&parameter.ty)?.copy(is_nullable(&parameter.annotations));
    Ok(ParameterSpec::new(parameter.name.clone(), ty))
}

/// Declared type variable with its bound.
///
/// `Object` bounds are implicit in Kotlin and dropped. More than one bound
/// needs a `where` clause, which is not generated.
pub fn type_variable_of(parameter: &TypeParameterElement) -> AvkResult<TypeName> {
    let bounds = parameter
        .bounds
        .iter()
        .filter(|b| !b.is_declared("java.lang.Object"))
        .map(normalize)
        .collect::<AvkResult<Vec<_>>>()?;
    if bounds.len() > 1 {
        let names: Vec<String> = parameter.bounds.iter().map(ToString::to_string).collect();
        return Err(AvkError::UnsupportedType(format!(
            "{} extends {}",
            parameter.name,
            names.join(" & ")
        )));
    }
    Ok(TypeName::Variable {
        name: parameter.name.clone(),
        bounds,
        nullable: false,
    })
}

/// Return type of a method, `None` for `void`
pub fn return_type_of(method: &ExecutableElement) -> AvkResult<Option<TypeName>> {
    let ty = normalize(&method.return_type)?;
    if ty.is_kotlin("Unit") {
        Ok(None)
    } else {
        Ok(Some(ty.copy(is_nullable(&method.annotations))))
    }
}

/// Element type of an array parameter declared as varargs
fn vararg_component(ty: &TypeName) -> Option<TypeName> {
    match ty {
        TypeName::Parameterized { raw, args, .. } if *raw == ClassName::kotlin("Array") => {
            args.first().cloned()
        }
        TypeName::Class { class, .. } if class.package() == KOTLIN_PACKAGE => class
            .simple_name()
            .strip_suffix("Array")
            .filter(|primitive| !primitive.is_empty())
            .map(TypeName::kotlin),
        _ => None,
    }
}

/// Kotlin function with the same signature as a Java method and no body.
///
/// Visibility is mapped, static methods gain `@JvmStatic`, a trailing
/// varargs parameter becomes `vararg` and thrown types become `@Throws`.
pub fn copy_of(method: &ExecutableElement) -> AvkResult<FunSpec> {
    let mut fun = FunSpec::new(method.name.clone())
        .modifier(visibility_of(&method.modifiers))
        .doc(doc_of(method.doc.as_deref()));

    if method.is_static() {
        fun = fun.annotation(jvm_static());
    }
    for parameter in &method.type_parameters {
        fun.type_variables.push(type_variable_of(parameter)?);
    }
    if let Some(returns) = return_type_of(method)? {
        fun = fun.returns(returns);
    }
    for parameter in &method.parameters {
        fun = fun.parameter(parameter_of(parameter)?);
    }
    if method.varargs
        && let Some(last) = fun.parameters.last_mut()
    {
        if let Some(component) = vararg_component(&last.ty) {
            last.ty = component;
        }
        last.modifiers.push(KModifier::Vararg);
    }
    if !method.thrown_types.is_empty() {
        let thrown = method
            .thrown_types
            .iter()
            .map(|t| Ok(CodeBlock::new().ty(&normalize(t)?).lit("::class")))
            .collect::<AvkResult<Vec<_>>>()?;
        fun = fun.annotation(
            AnnotationSpec::new(ClassName::kotlin("Throws")).member(CodeBlock::join(&thrown, ", ")),
        );
    }
    Ok(fun)
}
