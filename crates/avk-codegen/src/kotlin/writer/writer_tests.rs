#![allow(non_snake_case)]

use super::*;
use crate::kotlin::spec::{ConstructorSpec, EnumConstantSpec};

fn jvm_name() -> ClassName {
    ClassName::new("kotlin.jvm", "JvmName")
}

fn string() -> TypeName {
    TypeName::kotlin("String")
}

fn example() -> ClassName {
    ClassName::new("test", "Example")
}

fn constructor_property(name: &str, ty: TypeName) -> ConstructorProperty {
    ConstructorProperty {
        property: PropertySpec::new(name, ty),
        default: None,
    }
}

#[test]
fn FileSpec___render___data_class_with_expression_body() {
    let mut root = TypeSpec::class("Example");
    root.modifiers.push(KModifier::Data);
    let mut property = PropertySpec::new("value", string());
    property.annotations.push(
        AnnotationSpec::new(jvm_name())
            .use_site(UseSiteTarget::Get)
            .member(CodeBlock::new().string("value")),
    );
    root.constructor = Some(ConstructorSpec {
        modifiers: Vec::new(),
        properties: vec![ConstructorProperty {
            property,
            default: None,
        }],
    });
    root.functions.push(
        FunSpec::new("value")
            .returns(string())
            .statement(CodeBlock::of("return ").name("value")),
    );

    let text = FileSpec::new("test", root).render();

    assert_eq!(
        text,
        "package test

import kotlin.String
import kotlin.jvm.JvmName

data class Example(
  @get:JvmName(\"value\")
  val `value`: String
) {
  fun `value`(): String = `value`
}
"
    );
}

#[test]
fn FileSpec___render___block_body_with_comments_and_multi_member_annotation() {
    let mut root = TypeSpec::class("Example");
    root.functions.push(
        FunSpec::new("old")
            .annotation(
                AnnotationSpec::new(ClassName::kotlin("Deprecated"))
                    .member(CodeBlock::of("message = ").string("Use the property"))
                    .member(
                        CodeBlock::of("replaceWith = ")
                            .ty(&TypeName::kotlin("ReplaceWith"))
                            .lit("(")
                            .string("value")
                            .lit(")"),
                    ),
            )
            .returns(TypeName::kotlin("Nothing"))
            .comment("TODO move me")
            .statement(CodeBlock::of("TODO()")),
    );

    let text = FileSpec::new("test", root).render();

    assert_eq!(
        text,
        "package test

import kotlin.Deprecated
import kotlin.Nothing
import kotlin.ReplaceWith

class Example {
  @Deprecated(
    message = \"Use the property\",
    replaceWith = ReplaceWith(\"value\")
  )
  fun old(): Nothing {
    // TODO move me
    TODO()
  }
}
"
    );
}

#[test]
fn FileSpec___render___same_package_types_relative_to_scope() {
    let builder_class = example().nested("Builder");
    let mut builder = TypeSpec::class("Builder");
    builder.functions.push(
        FunSpec::new("build")
            .returns(TypeName::class(example()))
            .statement(CodeBlock::of("return ").ty(&TypeName::class(example())).lit("()")),
    );
    let mut root = TypeSpec::class("Example");
    root.functions.push(
        FunSpec::new("toBuilder")
            .returns(TypeName::class(builder_class.clone()))
            .statement(CodeBlock::of("return ").ty(&TypeName::class(builder_class)).lit("()")),
    );
    root.types.push(builder);

    let text = FileSpec::new("test", root).render();

    assert_eq!(
        text,
        "package test

class Example {
  fun toBuilder(): Builder = Builder()

  class Builder {
    fun build(): Example = Example()
  }
}
"
    );
}

#[test]
fn FileSpec___render___sibling_file_type_uses_dotted_simple_name() {
    let mut root = TypeSpec::class("Other");
    root.properties.push(PropertySpec::new(
        "builder",
        TypeName::class(example().nested("Builder")),
    ));

    let text = FileSpec::new("test", root).render();

    assert!(text.contains("val builder: Example.Builder"));
    assert!(!text.contains("import"));
}

#[test]
fn FileSpec___render___imports_top_level_of_nested_type() {
    let list_builder = ClassName::new("com.google.common.collect", "ImmutableList").nested("Builder");
    let mut root = TypeSpec::class("Example");
    root.properties.push(PropertySpec::new(
        "items",
        TypeName::parameterized(list_builder, vec![string()]).copy(true),
    ));

    let text = FileSpec::new("test", root).render();

    assert!(text.contains("import com.google.common.collect.ImmutableList\n"));
    assert!(text.contains("val items: ImmutableList.Builder<String>?"));
}

#[test]
fn FileSpec___render___clashing_names_are_qualified() {
    let mut root = TypeSpec::class("Example");
    root.properties
        .push(PropertySpec::new("a", TypeName::class(ClassName::new("a", "Thing"))));
    root.properties
        .push(PropertySpec::new("b", TypeName::class(ClassName::new("b", "Thing"))));
    root.properties.push(PropertySpec::new(
        "c",
        TypeName::class(ClassName::new("other", "Builder")),
    ));
    root.types.push(TypeSpec::class("Builder"));

    let text = FileSpec::new("test", root).render();

    assert!(text.contains("import a.Thing\n"));
    assert!(!text.contains("import b.Thing"));
    assert!(text.contains("val a: Thing"));
    assert!(text.contains("val b: b.Thing"));
    assert!(text.contains("val c: other.Builder"));
}

#[test]
fn FileSpec___render___internal_constructor_and_supertypes() {
    let mut root = TypeSpec::class("Example");
    root.modifiers.push(KModifier::Data);
    root.constructor = Some(ConstructorSpec {
        modifiers: vec![KModifier::Internal],
        properties: vec![
            constructor_property("a", TypeName::kotlin("Int")),
            ConstructorProperty {
                property: PropertySpec::new("b", string().copy(true)),
                default: Some(CodeBlock::of("null")),
            },
        ],
    });
    root.superclass = Some(TypeName::class(ClassName::new("test", "Base")));
    root.interfaces
        .push(TypeName::class(ClassName::new("java.io", "Serializable")));

    let text = FileSpec::new("test", root).render();

    assert_eq!(
        text,
        "package test

import java.io.Serializable
import kotlin.Int
import kotlin.String

data class Example internal constructor(
  val a: Int,
  val b: String? = null
) : Base(), Serializable
"
    );
}

#[test]
fn FileSpec___render___enum_with_nested_enum() {
    let mut inner = TypeSpec::enum_class("Inner");
    inner.enum_constants.push(EnumConstantSpec {
        name: "X".into(),
        annotations: Vec::new(),
        doc: None,
    });
    let mut outer = TypeSpec::enum_class("Mode");
    outer.enum_constants.push(EnumConstantSpec {
        name: "FAST".into(),
        annotations: vec![
            AnnotationSpec::new(ClassName::new("com.squareup.moshi", "Json"))
                .member(CodeBlock::of("name = ").string("fast")),
        ],
        doc: Some("Quick".into()),
    });
    outer.enum_constants.push(EnumConstantSpec {
        name: "SLOW".into(),
        annotations: Vec::new(),
        doc: None,
    });
    outer.types.push(inner);

    let text = FileSpec::new("test", outer).render();

    assert_eq!(
        text,
        "package test

import com.squareup.moshi.Json

enum class Mode {
  /**
   * Quick
   */
  @Json(name = \"fast\")
  FAST,
  SLOW,
  ;

  enum class Inner {
    X,
  }
}
"
    );
}

#[test]
fn FileSpec___render___enum_without_entries_still_terminates() {
    let mut inner = TypeSpec::enum_class("Inner");
    inner.enum_constants.push(EnumConstantSpec {
        name: "X".into(),
        annotations: Vec::new(),
        doc: None,
    });
    let mut outer = TypeSpec::enum_class("Holder");
    outer.types.push(inner);

    let text = FileSpec::new("test", outer).render();

    assert_eq!(
        text,
        "package test

enum class Holder {
  ;

  enum class Inner {
    X,
  }
}
"
    );
}

#[test]
fn FileSpec___render___default_package_and_no_members() {
    let root = TypeSpec::class("Empty");

    let text = FileSpec::new("", root).render();

    assert_eq!(text, "class Empty\n");
}

#[test]
fn FileSpec___render___companion_with_const_and_type_variables() {
    let mut companion = TypeSpec::companion();
    let mut constant = PropertySpec::new("MAX", TypeName::kotlin("Int"));
    constant.modifiers = vec![KModifier::Const, KModifier::Private];
    constant.initializer = Some(CodeBlock::of("3"));
    companion.properties.push(constant);

    let mut root = TypeSpec::class("Box");
    root.type_variables.push(TypeName::Variable {
        name: "T".into(),
        bounds: vec![TypeName::class(ClassName::kotlin("Comparable"))],
        nullable: false,
    });
    root.types.push(companion);

    let text = FileSpec::new("test", root).render();

    assert!(text.contains("class Box<T : Comparable> {"));
    assert!(text.contains("  companion object {\n    private const val MAX: Int = 3\n  }"));
}

#[test]
fn FileSpec___render___vararg_and_public_modifier_omitted() {
    let mut parameter = ParameterSpec::new("values", string());
    parameter.modifiers.push(KModifier::Vararg);
    let mut root = TypeSpec::class("Example");
    root.functions.push(
        FunSpec::new("of")
            .modifier(KModifier::Public)
            .parameter(parameter)
            .statement(CodeBlock::of("TODO()")),
    );

    let text = FileSpec::new("test", root).render();

    assert!(text.contains("  fun of(vararg values: String) {\n    TODO()\n  }"));
}
