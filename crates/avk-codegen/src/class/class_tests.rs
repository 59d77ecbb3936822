#![allow(non_snake_case)]

use super::*;
use crate::kotlin::{FileSpec, Statement, TypeKind};
use avk_core::{
    AUTO_VALUE, AUTO_VALUE_BUILDER, AnnotationMirror, AnnotationValue, CollectingMessager,
    ConstantValue, PrimitiveKind, TypeMirror,
};
use test_case::test_case;

const VALUE: &str = "test.Example";
const BUILDER: &str = "test.Example.Builder";

fn string() -> TypeMirror {
    TypeMirror::declared("java.lang.String")
}

fn int() -> TypeMirror {
    TypeMirror::primitive(PrimitiveKind::Int)
}

fn method(name: &str, returns: TypeMirror, modifiers: &[Modifier]) -> ExecutableElement {
    let mut method = ExecutableElement::new(name, returns);
    method.modifiers = modifiers.to_vec();
    method
}

fn accessor(name: &str, returns: TypeMirror) -> ExecutableElement {
    method(name, returns, &[Modifier::Public, Modifier::Abstract])
}

fn with_parameters(mut method: ExecutableElement, parameters: &[(&str, TypeMirror)]) -> ExecutableElement {
    method.parameters = parameters
        .iter()
        .map(|(name, ty)| VariableElement::new(*name, ty.clone()))
        .collect();
    method
}

fn value_class(methods: Vec<ExecutableElement>) -> TypeElement {
    let mut element = TypeElement::new("test", "Example");
    element.modifiers = vec![Modifier::Public, Modifier::Abstract];
    element.annotations.push(AnnotationMirror::new(AUTO_VALUE));
    element.methods = methods;
    element
}

fn add_builder(element: &mut TypeElement, methods: Vec<ExecutableElement>) {
    let mut builder = TypeElement::nested_in(element, "Builder");
    builder.modifiers = vec![Modifier::Public, Modifier::Abstract, Modifier::Static];
    builder.annotations.push(AnnotationMirror::new(AUTO_VALUE_BUILDER));
    builder.methods = methods;
    element.nested_types.push(builder);
}

fn standard_builder_methods() -> Vec<ExecutableElement> {
    let returns_builder = || TypeMirror::declared(BUILDER);
    vec![
        with_parameters(
            method("setA", returns_builder(), &[Modifier::Public, Modifier::Abstract]),
            &[("a", string())],
        ),
        with_parameters(
            method("setB", returns_builder(), &[Modifier::Public, Modifier::Abstract]),
            &[("b", int())],
        ),
        accessor("build", TypeMirror::declared(VALUE)),
    ]
}

fn describe(element: &TypeElement) -> ClassDescriptor {
    let messager = CollectingMessager::new();
    let descriptor = ClassDescriptor::from_element(element, Vec::new(), &messager)
        .unwrap()
        .unwrap();
    assert!(messager.diagnostics().is_empty(), "{:?}", messager.diagnostics());
    descriptor
}

fn body_lines(fun: &FunSpec) -> Vec<String> {
    fun.body
        .iter()
        .map(|s| match s {
            Statement::Code(code) => code.to_string(),
            Statement::Comment(text) => format!("// {text}"),
        })
        .collect()
}

fn function<'a>(spec: &'a TypeSpec, name: &str) -> &'a FunSpec {
    spec.functions
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("no function {name}"))
}

fn companion(spec: &TypeSpec) -> &TypeSpec {
    spec.types
        .iter()
        .find(|t| t.kind == TypeKind::Companion)
        .unwrap()
}

// ============================================================================
// Plain data classes
// ============================================================================

#[test]
fn to_type_spec___nullable_string_without_builder() {
    let mut value = accessor("value", string());
    value
        .annotations
        .push(AnnotationMirror::new("javax.annotation.Nullable"));
    let descriptor = describe(&value_class(vec![value]));

    let text = FileSpec::new("test", descriptor.to_type_spec().unwrap()).render();

    assert_eq!(
        text,
        "package test

import kotlin.Deprecated
import kotlin.ReplaceWith
import kotlin.String
import kotlin.jvm.JvmName
import kotlin.jvm.JvmSynthetic

data class Example(
  @get:JvmName(\"value\")
  val `value`: String? = null
) {
  @JvmSynthetic
  @JvmName(\"-value\")
  @Deprecated(
    message = \"Use the property\",
    replaceWith = ReplaceWith(\"value\")
  )
  fun `value`(): String? {
    `value`
    TODO(\"Remove this function. Use the above line to auto-migrate.\")
  }
}
"
    );
}

#[test]
fn to_type_spec___constructor_keeps_declaration_order() {
    let descriptor = describe(&value_class(vec![
        accessor("c", string()),
        accessor("a", int()),
        accessor("b", TypeMirror::primitive(PrimitiveKind::Boolean)),
    ]));

    let spec = descriptor.to_type_spec().unwrap();
    let constructor = spec.constructor.unwrap();

    let names: Vec<&str> = constructor
        .properties
        .iter()
        .map(|p| p.property.name.as_str())
        .collect();
    let defaults: Vec<Option<String>> = constructor
        .properties
        .iter()
        .map(|p| p.default.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(defaults, vec![None, Some("0".into()), Some("false".into())]);
    assert!(constructor.modifiers.is_empty());
    assert_eq!(spec.functions.len(), 3);
}

#[test]
fn to_type_spec___getter_syntax_has_no_bridges() {
    let descriptor = describe(&value_class(vec![
        accessor("getName", string()),
        accessor("getCount", int()),
    ]));

    let spec = descriptor.to_type_spec().unwrap();

    assert!(spec.functions.is_empty());
    let constructor = spec.constructor.unwrap();
    assert_eq!(constructor.properties[0].property.name, "name");
    assert_eq!(constructor.properties[1].property.name, "count");
    assert!(constructor.properties[0].property.annotations.is_empty());
}

#[test]
fn to_type_spec___no_properties_is_plain_class() {
    let descriptor = describe(&value_class(Vec::new()));

    let spec = descriptor.to_type_spec().unwrap();

    assert!(!spec.modifiers.contains(&KModifier::Data));
}

#[test]
fn to_type_spec___override_accessor_kept() {
    let mut value = accessor("value", string());
    value.annotations.push(AnnotationMirror::new("java.lang.Override"));
    let descriptor = describe(&value_class(vec![value]));

    let spec = descriptor.to_type_spec().unwrap();
    let fun = function(&spec, "value");

    assert_eq!(fun.modifiers, vec![KModifier::Override]);
    assert!(spec.constructor.unwrap().properties[0]
        .property
        .annotations
        .is_empty());
}

#[test]
fn to_type_spec___supertypes_and_parcelize() {
    let mut element = value_class(vec![accessor("value", string())]);
    element.superclass = Some(TypeMirror::declared("java.lang.Object"));
    element.interfaces = vec![TypeMirror::declared("android.os.Parcelable")];
    element.annotations.push(AnnotationMirror::new("kotlin.Metadata"));
    let descriptor = describe(&element);

    let spec = descriptor.to_type_spec().unwrap();

    assert!(spec.superclass.is_none());
    assert_eq!(spec.interfaces.len(), 1);
    let annotations: Vec<String> = spec
        .annotations
        .iter()
        .map(|a| a.class_name.canonical())
        .collect();
    assert_eq!(annotations, vec!["kotlinx.parcelize.Parcelize"]);
}

#[test]
fn to_type_spec___package_private_class_is_internal() {
    let mut element = value_class(vec![accessor("value", string())]);
    element.modifiers = vec![Modifier::Abstract];

    let spec = describe(&element).to_type_spec().unwrap();

    assert_eq!(spec.modifiers, vec![KModifier::Internal, KModifier::Data]);
}

// ============================================================================
// Redaction
// ============================================================================

#[test]
fn from_element___all_redacted_properties_redact_class() {
    let redacted = |name: &str| {
        let mut method = accessor(name, string());
        method.annotations.push(AnnotationMirror::new("slack.Redacted"));
        method
    };
    let descriptor = describe(&value_class(vec![redacted("a"), redacted("b")]));

    let spec = descriptor.to_type_spec().unwrap();

    assert!(descriptor.is_redacted);
    assert_eq!(
        spec.annotations,
        vec![AnnotationSpec::new(ClassName::new("slack", "Redacted"))]
    );
    let constructor = spec.constructor.unwrap();
    assert!(constructor
        .properties
        .iter()
        .all(|p| !p.property.annotations.iter().any(|a| a.class_name.simple_name() == "Redacted")));
}

#[test]
fn from_element___partial_redaction_stays_on_properties() {
    let mut secret = accessor("secret", string());
    secret.annotations.push(AnnotationMirror::new("slack.Redacted"));
    let descriptor = describe(&value_class(vec![secret, accessor("open", string())]));

    let spec = descriptor.to_type_spec().unwrap();

    assert!(!descriptor.is_redacted);
    assert!(spec.annotations.is_empty());
    let constructor = spec.constructor.unwrap();
    assert!(constructor.properties[0]
        .property
        .annotations
        .contains(&AnnotationSpec::new(ClassName::new("slack", "Redacted"))));
}

// ============================================================================
// Builders
// ============================================================================

fn builder_class(extra: Vec<ExecutableElement>) -> TypeElement {
    let mut methods = vec![accessor("a", string()), accessor("b", int())];
    methods.extend(extra);
    let mut element = value_class(methods);
    add_builder(&mut element, standard_builder_methods());
    element
}

#[test]
fn to_type_spec___builder_hides_constructor_and_defaults() {
    let descriptor = describe(&builder_class(Vec::new()));

    let spec = descriptor.to_type_spec().unwrap();
    let constructor = spec.constructor.as_ref().unwrap();

    assert_eq!(constructor.modifiers, vec![KModifier::Internal]);
    assert!(constructor.properties.iter().all(|p| p.default.is_none()));
    assert_eq!(spec.types[0].name, "Builder");
}

#[test]
fn to_type_spec___serialization_directive_restores_defaults() {
    let mut element = builder_class(Vec::new());
    element.annotations.push(
        AnnotationMirror::new("com.squareup.moshi.JsonClass")
            .with_member("generateAdapter", AnnotationValue::Bool(true)),
    );
    let descriptor = describe(&element);

    let spec = descriptor.to_type_spec().unwrap();
    let defaults: Vec<Option<String>> = spec
        .constructor
        .unwrap()
        .properties
        .iter()
        .map(|p| p.default.as_ref().map(ToString::to_string))
        .collect();

    assert_eq!(defaults, vec![None, Some("0".into())]);
}

#[test]
fn from_element___to_builder_forwards_every_property() {
    let descriptor = describe(&builder_class(vec![accessor(
        "toBuilder",
        TypeMirror::declared(BUILDER),
    )]));

    assert_eq!(descriptor.properties.len(), 2);
    assert_eq!(descriptor.to_builder_functions.len(), 1);
    assert_eq!(
        body_lines(&descriptor.to_builder_functions[0]),
        vec!["return test.Example.Builder(a = a, b = b)"]
    );
    assert!(descriptor.unrecognized_methods.is_empty());
}

#[test]
fn from_element___wither_goes_through_to_builder() {
    let descriptor = describe(&builder_class(vec![
        accessor("toBuilder", TypeMirror::declared(BUILDER)),
        with_parameters(accessor("withA", TypeMirror::declared(VALUE)), &[("a", string())]),
    ]));

    assert_eq!(descriptor.withers.len(), 1);
    let wither = &descriptor.withers[0];
    assert_eq!(wither.parameters[0].name, "a");
    assert_eq!(
        wither.returns,
        Some(TypeName::class(ClassName::new("test", "Example")))
    );
    assert_eq!(body_lines(wither), vec!["return toBuilder().setA(a).build()"]);
}

#[test]
fn from_element___wither_without_to_builder_starts_new_builder() {
    let wither = with_parameters(
        method("withB", TypeMirror::declared(VALUE), &[Modifier::Public]),
        &[("b", int())],
    );
    let descriptor = describe(&builder_class(vec![wither]));

    assert_eq!(
        body_lines(&descriptor.withers[0]),
        vec!["return test.Example.Builder(a = this.a, b = this.b).setB(b).build()"]
    );
}

#[test]
fn from_element___wither_without_builder_copies() {
    let wither = with_parameters(accessor("withValue", TypeMirror::declared(VALUE)), &[("value", string())]);
    let descriptor = describe(&value_class(vec![accessor("value", string()), wither]));

    assert_eq!(
        body_lines(&descriptor.withers[0]),
        vec!["return copy(`value` = `value`)"]
    );
}

#[test]
fn from_element___mismatched_concrete_wither_is_unrecognized() {
    let wither = with_parameters(
        method("withValue", TypeMirror::declared(VALUE), &[Modifier::Public]),
        &[("value", int())],
    );
    let descriptor = describe(&value_class(vec![accessor("value", string()), wither]));

    assert!(descriptor.withers.is_empty());
    assert_eq!(
        descriptor.unrecognized_methods,
        vec!["public test.Example withValue(...)"]
    );
}

#[test]
fn from_element___builder_factory_moves_to_companion() {
    let factory = method(
        "builder",
        TypeMirror::declared(BUILDER),
        &[Modifier::Public, Modifier::Static],
    );
    let descriptor = describe(&builder_class(vec![factory]));

    let spec = descriptor.to_type_spec().unwrap();
    let fun = function(companion(&spec), "builder");

    assert_eq!(fun.annotations, vec![crate::method::jvm_static()]);
    assert_eq!(body_lines(fun), vec![format!("TODO(\"{REPLACE_TODO}\")")]);
}

#[test]
fn from_element___missing_build_method_skips_class() {
    let mut element = value_class(vec![accessor("a", string())]);
    add_builder(
        &mut element,
        vec![with_parameters(
            accessor("setA", TypeMirror::declared(BUILDER)),
            &[("a", string())],
        )],
    );
    let messager = CollectingMessager::new();

    let descriptor = ClassDescriptor::from_element(&element, Vec::new(), &messager).unwrap();

    assert!(descriptor.is_none());
    assert!(messager.has_errors());
}

// ============================================================================
// Static creators
// ============================================================================

#[test]
fn from_element___full_creator_bridges_to_invoke() {
    let create = with_parameters(
        method("create", TypeMirror::declared(VALUE), &[Modifier::Public, Modifier::Static]),
        &[("name", string()), ("count", int())],
    );
    let descriptor = describe(&value_class(vec![
        accessor("a", string()),
        accessor("b", int()),
        create,
    ]));

    let [StaticCreator::Full { bridge, invoke }] = descriptor.static_creators.as_slice() else {
        panic!("expected one full creator");
    };

    let annotations: Vec<String> = bridge
        .annotations
        .iter()
        .map(|a| {
            let members: Vec<String> = a.members.iter().map(ToString::to_string).collect();
            format!("{}({})", a.class_name.simple_name(), members.join(", "))
        })
        .collect();
    assert_eq!(
        annotations,
        vec![
            "JvmStatic()".to_string(),
            "JvmName(\"-create\")".to_string(),
            "Deprecated(message = \"Use invoke()\", replaceWith = kotlin.ReplaceWith(\"test.Example(name, count)\"))"
                .to_string(),
        ]
    );
    assert_eq!(
        body_lines(bridge),
        vec![
            "create(name, count)".to_string(),
            format!("TODO(\"{REMOVE_BRIDGE_TODO}\")"),
        ]
    );

    assert_eq!(invoke.name, "invoke");
    assert!(invoke.modifiers.contains(&KModifier::Operator));
    assert_eq!(invoke.annotations[1], jvm_name("create"));
    assert_eq!(body_lines(invoke), vec!["return test.Example(a = name, b = count)"]);

    let spec = descriptor.to_type_spec().unwrap();
    assert_eq!(spec.constructor.as_ref().unwrap().modifiers, vec![KModifier::Internal]);
    assert_eq!(companion(&spec).functions.len(), 2);
}

#[test]
fn from_element___partial_creator_keeps_signature() {
    let create = with_parameters(
        method("of", TypeMirror::declared(VALUE), &[Modifier::Public, Modifier::Static]),
        &[("a", string())],
    );
    let descriptor = describe(&value_class(vec![
        accessor("a", string()),
        accessor("b", int()),
        create,
    ]));

    let [StaticCreator::Partial(fun)] = descriptor.static_creators.as_slice() else {
        panic!("expected one partial creator");
    };
    assert_eq!(fun.name, "of");
    assert_eq!(body_lines(fun), vec!["TODO()"]);
}

#[test_case(7, false ; "at the limit")]
#[test_case(8, true ; "over the limit")]
fn from_element___long_creator_suppressed(count: usize, suppressed: bool) {
    let accessors: Vec<ExecutableElement> =
        (0..count).map(|i| accessor(&format!("p{i}"), int())).collect();
    let parameters: Vec<(String, TypeMirror)> =
        (0..count).map(|i| (format!("p{i}"), int())).collect();
    let parameters: Vec<(&str, TypeMirror)> = parameters
        .iter()
        .map(|(name, ty)| (name.as_str(), ty.clone()))
        .collect();
    let create = with_parameters(
        method("create", TypeMirror::declared(VALUE), &[Modifier::Public, Modifier::Static]),
        &parameters,
    );
    let mut methods = accessors;
    methods.push(create);

    let descriptor = describe(&value_class(methods));

    let [StaticCreator::Full { bridge, invoke }] = descriptor.static_creators.as_slice() else {
        panic!("expected one full creator");
    };
    assert_eq!(bridge.annotations.contains(&suppress("LongParameterList")), suppressed);
    assert_eq!(invoke.annotations.contains(&suppress("LongParameterList")), suppressed);
}

// ============================================================================
// Constants and leftovers
// ============================================================================

#[test]
fn from_element___static_fields_become_companion_properties() {
    let mut element = value_class(vec![accessor("a", string())]);
    let mut constant = VariableElement::new("LIMIT", int());
    constant.modifiers = vec![Modifier::Public, Modifier::Static, Modifier::Final];
    constant.constant_value = Some(ConstantValue::Int(10));
    let mut hidden = VariableElement::new("NAME", string());
    hidden.modifiers = vec![Modifier::Private, Modifier::Static, Modifier::Final];
    hidden.constant_value = Some(ConstantValue::String("x".into()));
    let mut computed = VariableElement::new("DEFAULT", TypeMirror::declared(VALUE));
    computed.modifiers = vec![Modifier::Static, Modifier::Final];
    let instance = VariableElement::new("cache", string());
    element.fields = vec![constant, hidden, computed, instance];

    let spec = describe(&element).to_type_spec().unwrap();
    let properties = &companion(&spec).properties;

    assert_eq!(properties.len(), 3);
    assert_eq!(properties[0].modifiers, vec![KModifier::Const]);
    assert_eq!(properties[0].initializer.as_ref().unwrap().to_string(), "10");
    assert_eq!(properties[1].modifiers, vec![KModifier::Private, KModifier::Const]);
    assert_eq!(properties[1].initializer.as_ref().unwrap().to_string(), "\"x\"");
    assert_eq!(properties[2].modifiers, vec![KModifier::Internal]);
    assert_eq!(
        properties[2].initializer.as_ref().unwrap().to_string(),
        format!("TODO(\"{REPLACE_TODO}\")")
    );
}

#[test]
fn to_type_spec___no_companion_when_empty() {
    let spec = describe(&value_class(vec![accessor("a", string())]))
        .to_type_spec()
        .unwrap();

    assert!(spec.types.is_empty());
}

#[test]
fn from_element___unrecognized_methods_become_placeholder() {
    let helper = method("describe", string(), &[Modifier::Public]);
    let descriptor = describe(&value_class(vec![accessor("a", string()), helper]));

    let spec = descriptor.to_type_spec().unwrap();
    let placeholder = function(&spec, "placeholder");

    assert_eq!(
        descriptor.unrecognized_methods,
        vec!["public java.lang.String describe(...)"]
    );
    assert_eq!(placeholder.returns, Some(TypeName::kotlin("Nothing")));
}

#[test]
fn from_element___children_list_value_classes_then_enums() {
    let mut element = value_class(vec![accessor("a", string())]);
    let mut child = TypeElement::nested_in(&element, "Child");
    child.annotations.push(AnnotationMirror::new(AUTO_VALUE));
    element.nested_types.push(child);
    let messager = CollectingMessager::new();

    let descriptor =
        ClassDescriptor::from_element(&element, vec!["test.Example.Kind".into()], &messager)
            .unwrap()
            .unwrap();

    assert_eq!(
        descriptor.children,
        vec!["test.Example.Child".to_string(), "test.Example.Kind".to_string()]
    );
    assert!(descriptor.is_top_level);
    assert_eq!(descriptor.parent, None);
}
