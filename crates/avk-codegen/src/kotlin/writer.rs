//! Renders a [`FileSpec`] to Kotlin source text.
//!
//! Type references are resolved while the body is written: same-package
//! types use their simple names relative to the enclosing type, other types
//! are imported by their top-level class unless that would clash with a type
//! declared in the file or an earlier import, in which case the reference is
//! fully qualified. Imports are emitted sorted.

use super::code::CodeBlock;
use super::naming::escape_if_necessary;
use super::spec::{
    AnnotationSpec, ConstructorProperty, FileSpec, FunSpec, KModifier, ParameterSpec,
    PropertySpec, Statement, TypeKind, TypeSpec, UseSiteTarget,
};
use super::type_name::{ClassName, TypeName};
use std::collections::{BTreeMap, BTreeSet};

const INDENT: &str = "  ";

impl FileSpec {
    /// Render the file
    pub fn render(&self) -> String {
        KotlinWriter::new(self).write()
    }
}

struct KotlinWriter<'a> {
    file: &'a FileSpec,
    out: String,
    indent: usize,
    /// Top-level simple name -> imported class
    imports: BTreeMap<String, ClassName>,
    /// Simple names declared anywhere in the file
    declared: BTreeSet<String>,
    /// Simple names of the types currently being written, outermost first
    scope: Vec<String>,
}

impl<'a> KotlinWriter<'a> {
    fn new(file: &'a FileSpec) -> Self {
        Self {
            file,
            out: String::new(),
            indent: 0,
            imports: BTreeMap::new(),
            declared: file
                .root
                .declared_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            scope: Vec::new(),
        }
    }

    fn write(mut self) -> String {
        let file = self.file;
        self.emit_type(&file.root);
        let body = std::mem::take(&mut self.out);

        let mut text = String::new();
        if !file.package.is_empty() {
            let package = file
                .package
                .split('.')
                .map(escape_if_necessary)
                .collect::<Vec<_>>()
                .join(".");
            text.push_str(&format!("package {package}\n\n"));
        }

        let imports: BTreeSet<String> = self.imports.values().map(ClassName::canonical).collect();
        for import in &imports {
            text.push_str(&format!("import {import}\n"));
        }
        if !imports.is_empty() {
            text.push('\n');
        }

        text.push_str(&body);
        text
    }

    // ------------------------------------------------------------------
    // Output primitives
    // ------------------------------------------------------------------

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn lines(&mut self, text: &str) {
        for line in text.split('\n') {
            self.line(line);
        }
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn separate(&mut self, first: &mut bool) {
        if !*first {
            self.blank();
        }
        *first = false;
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    fn class_ref(&mut self, class: &ClassName) -> String {
        let names = class.simple_names();
        let join = |names: &[String]| {
            names
                .iter()
                .map(|n| escape_if_necessary(n))
                .collect::<Vec<_>>()
                .join(".")
        };

        if class.package() == self.file.package {
            let max = names.len().saturating_sub(1).min(self.scope.len());
            let shared = (0..=max)
                .rev()
                .find(|&k| names[..k] == self.scope[..k])
                .unwrap_or(0);
            return join(&names[shared..]);
        }

        if class.package().is_empty() {
            return join(names);
        }

        let top = class.top_level();
        let simple = top.simple_name().to_string();
        if self.declared.contains(&simple) {
            return class.canonical();
        }
        match self.imports.get(&simple) {
            Some(existing) if *existing == top => join(names),
            Some(_) => class.canonical(),
            None => {
                self.imports.insert(simple, top);
                join(names)
            }
        }
    }

    fn type_ref(&mut self, ty: &TypeName) -> String {
        let base = match ty {
            TypeName::Class { class, .. } => self.class_ref(class),
            TypeName::Parameterized { raw, args, .. } => {
                let raw = self.class_ref(raw);
                let args: Vec<String> = args.iter().map(|a| self.type_ref(a)).collect();
                format!("{}<{}>", raw, args.join(", "))
            }
            TypeName::Variable { name, .. } => escape_if_necessary(name),
        };
        if ty.is_nullable() {
            format!("{base}?")
        } else {
            base
        }
    }

    fn type_variables(&mut self, variables: &[TypeName]) -> String {
        if variables.is_empty() {
            return String::new();
        }
        let declared: Vec<String> = variables
            .iter()
            .map(|v| match v {
                TypeName::Variable { name, bounds, .. } => match bounds.first() {
                    Some(bound) => format!("{} : {}", escape_if_necessary(name), self.type_ref(bound)),
                    None => escape_if_necessary(name),
                },
                other => self.type_ref(other),
            })
            .collect();
        format!("<{}>", declared.join(", "))
    }

    fn code(&mut self, code: &CodeBlock) -> String {
        code.render_with(|ty| self.type_ref(ty))
    }

    fn modifiers(modifiers: &[KModifier]) -> String {
        let mut sorted: Vec<KModifier> = modifiers
            .iter()
            .copied()
            .filter(|m| *m != KModifier::Public)
            .collect();
        sorted.sort();
        sorted.dedup();
        sorted
            .iter()
            .map(|m| format!("{} ", m.keyword()))
            .collect()
    }

    fn annotation(&mut self, annotation: &AnnotationSpec) -> String {
        let mut text = String::from("@");
        if annotation.use_site == Some(UseSiteTarget::Get) {
            text.push_str("get:");
        }
        text.push_str(&self.class_ref(&annotation.class_name));
        let members: Vec<String> = annotation.members.iter().map(|m| self.code(m)).collect();
        match members.len() {
            0 => {}
            1 => text.push_str(&format!("({})", members[0])),
            _ => {
                text.push_str("(\n");
                let indented: Vec<String> = members.iter().map(|m| format!("{INDENT}{m}")).collect();
                text.push_str(&indented.join(",\n"));
                text.push_str("\n)");
            }
        }
        text
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn emit_doc(&mut self, doc: Option<&String>) {
        let Some(doc) = doc else {
            return;
        };
        self.line("/**");
        for line in doc.lines() {
            if line.trim().is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {line}"));
            }
        }
        self.line(" */");
    }

    fn emit_annotations(&mut self, annotations: &[AnnotationSpec]) {
        for annotation in annotations {
            let text = self.annotation(annotation);
            self.lines(&text);
        }
    }

    fn emit_type(&mut self, spec: &TypeSpec) {
        self.emit_doc(spec.doc.as_ref());
        self.emit_annotations(&spec.annotations);

        let mut header = Self::modifiers(&spec.modifiers);
        match spec.kind {
            TypeKind::Class => {
                header.push_str("class ");
                header.push_str(&escape_if_necessary(&spec.name));
            }
            TypeKind::Enum => {
                header.push_str("enum class ");
                header.push_str(&escape_if_necessary(&spec.name));
            }
            TypeKind::Companion => header.push_str("companion object"),
        }
        let type_variables = self.type_variables(&spec.type_variables);
        header.push_str(&type_variables);

        let supertypes = self.supertypes(spec);
        let open = if spec.has_members() { " {" } else { "" };

        let scoped = spec.kind != TypeKind::Companion;
        if scoped {
            self.scope.push(spec.name.clone());
        }

        match &spec.constructor {
            Some(constructor) => {
                let mut modifiers = Self::modifiers(&constructor.modifiers);
                if !modifiers.is_empty() {
                    modifiers = format!(" {modifiers}constructor");
                }
                if constructor.properties.is_empty() {
                    self.line(&format!("{header}{modifiers}(){supertypes}{open}"));
                } else {
                    self.line(&format!("{header}{modifiers}("));
                    self.indent += 1;
                    let count = constructor.properties.len();
                    for (i, property) in constructor.properties.iter().enumerate() {
                        self.emit_constructor_property(property, i + 1 < count);
                    }
                    self.indent -= 1;
                    self.line(&format!("){supertypes}{open}"));
                }
            }
            None => self.line(&format!("{header}{supertypes}{open}")),
        }

        if spec.has_members() {
            self.indent += 1;
            self.emit_members(spec);
            self.indent -= 1;
            self.line("}");
        }

        if scoped {
            self.scope.pop();
        }
    }

    fn supertypes(&mut self, spec: &TypeSpec) -> String {
        let mut supertypes = Vec::new();
        if let Some(superclass) = &spec.superclass {
            supertypes.push(format!("{}()", self.type_ref(superclass)));
        }
        for interface in &spec.interfaces {
            supertypes.push(self.type_ref(interface));
        }
        if supertypes.is_empty() {
            String::new()
        } else {
            format!(" : {}", supertypes.join(", "))
        }
    }

    fn emit_members(&mut self, spec: &TypeSpec) {
        let mut first = true;

        if spec.kind == TypeKind::Enum {
            for constant in &spec.enum_constants {
                first = false;
                self.emit_doc(constant.doc.as_ref());
                self.emit_annotations(&constant.annotations);
                self.line(&format!("{},", escape_if_necessary(&constant.name)));
            }
            // Entries end with `;` whenever other members follow
            if !spec.properties.is_empty() || !spec.functions.is_empty() || !spec.types.is_empty()
            {
                first = false;
                self.line(";");
            }
        }

        for property in &spec.properties {
            self.separate(&mut first);
            self.emit_property(property);
        }
        for function in &spec.functions {
            self.separate(&mut first);
            self.emit_function(function);
        }
        for nested in &spec.types {
            self.separate(&mut first);
            self.emit_type(nested);
        }
    }

    fn property_declaration(&mut self, property: &PropertySpec) -> String {
        format!(
            "{}{} {}: {}",
            Self::modifiers(&property.modifiers),
            if property.mutable { "var" } else { "val" },
            escape_if_necessary(&property.name),
            self.type_ref(&property.ty)
        )
    }

    fn emit_constructor_property(&mut self, parameter: &ConstructorProperty, trailing_comma: bool) {
        let property = &parameter.property;
        self.emit_doc(property.doc.as_ref());
        self.emit_annotations(&property.annotations);
        let mut declaration = self.property_declaration(property);
        if let Some(default) = &parameter.default {
            declaration.push_str(" = ");
            declaration.push_str(&self.code(default));
        }
        if trailing_comma {
            declaration.push(',');
        }
        self.line(&declaration);
    }

    fn emit_property(&mut self, property: &PropertySpec) {
        self.emit_doc(property.doc.as_ref());
        self.emit_annotations(&property.annotations);
        let mut declaration = self.property_declaration(property);
        if let Some(initializer) = &property.initializer {
            declaration.push_str(" = ");
            declaration.push_str(&self.code(initializer));
        }
        self.line(&declaration);
    }

    fn parameter(&mut self, parameter: &ParameterSpec) -> String {
        let mut text = format!(
            "{}{}: {}",
            Self::modifiers(&parameter.modifiers),
            escape_if_necessary(&parameter.name),
            self.type_ref(&parameter.ty)
        );
        if let Some(default) = &parameter.default {
            text.push_str(" = ");
            text.push_str(&self.code(default));
        }
        text
    }

    fn emit_function(&mut self, function: &FunSpec) {
        self.emit_doc(function.doc.as_ref());
        self.emit_annotations(&function.annotations);

        let mut signature = Self::modifiers(&function.modifiers);
        signature.push_str("fun ");
        let type_variables = self.type_variables(&function.type_variables);
        if !type_variables.is_empty() {
            signature.push_str(&type_variables);
            signature.push(' ');
        }
        signature.push_str(&escape_if_necessary(&function.name));
        let parameters: Vec<String> = function
            .parameters
            .iter()
            .map(|p| self.parameter(p))
            .collect();
        signature.push_str(&format!("({})", parameters.join(", ")));
        if let Some(returns) = &function.returns {
            signature.push_str(": ");
            signature.push_str(&self.type_ref(returns));
        }

        if let [Statement::Code(only)] = function.body.as_slice() {
            if let Some(expression) = only.strip_literal_prefix("return ") {
                let expression = self.code(&expression);
                self.lines(&format!("{signature} = {expression}"));
                return;
            }
        }

        self.line(&format!("{signature} {{"));
        self.indent += 1;
        for statement in &function.body {
            match statement {
                Statement::Comment(text) if text.is_empty() => self.line("//"),
                Statement::Comment(text) => self.line(&format!("// {text}")),
                Statement::Code(code) => {
                    let text = self.code(code);
                    self.lines(&text);
                }
            }
        }
        self.indent -= 1;
        self.line("}");
    }
}

#[cfg(test)]
#[path = "writer/writer_tests.rs"]
mod writer_tests;
