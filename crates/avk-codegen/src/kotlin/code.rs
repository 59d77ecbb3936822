//! Code fragments with deferred type resolution

use super::naming::{escape_if_necessary, string_literal};
use super::type_name::TypeName;
use std::fmt;

/// One piece of a [`CodeBlock`]
#[derive(Debug, Clone, PartialEq)]
pub enum CodePart {
    /// Emitted verbatim
    Literal(String),
    /// An identifier, escaped when necessary
    Name(String),
    /// A string literal, quoted and escaped
    Str(String),
    /// A type reference, resolved against the file's imports
    Type(TypeName),
}

/// A fragment of Kotlin code.
///
/// Types are kept symbolic until the file is written so the writer can decide
/// between an import and a qualified reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block holding a single literal
    pub fn of(literal: impl Into<String>) -> Self {
        Self::new().lit(literal)
    }

    pub fn lit(mut self, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        if !literal.is_empty() {
            self.parts.push(CodePart::Literal(literal));
        }
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.parts.push(CodePart::Name(name.into()));
        self
    }

    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.parts.push(CodePart::Str(value.into()));
        self
    }

    pub fn ty(mut self, ty: &TypeName) -> Self {
        self.parts.push(CodePart::Type(ty.clone()));
        self
    }

    /// Append another block
    pub fn code(mut self, other: &CodeBlock) -> Self {
        self.parts.extend(other.parts.iter().cloned());
        self
    }

    /// Join blocks with a literal separator
    pub fn join<'a>(blocks: impl IntoIterator<Item = &'a CodeBlock>, separator: &str) -> Self {
        let mut joined = CodeBlock::new();
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                joined = joined.lit(separator);
            }
            joined = joined.code(block);
        }
        joined
    }

    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Whether the block starts with the given literal text
    pub fn starts_with_literal(&self, prefix: &str) -> bool {
        matches!(self.parts.first(), Some(CodePart::Literal(s)) if s.starts_with(prefix))
    }

    /// This block without a leading literal prefix
    pub fn strip_literal_prefix(&self, prefix: &str) -> Option<CodeBlock> {
        let (first, rest) = self.parts.split_first()?;
        let CodePart::Literal(text) = first else {
            return None;
        };
        let remaining = text.strip_prefix(prefix)?;
        let mut stripped = CodeBlock::new().lit(remaining);
        stripped.parts.extend(rest.iter().cloned());
        Some(stripped)
    }

    /// Render with a caller-supplied type resolver
    pub fn render_with(&self, mut resolve: impl FnMut(&TypeName) -> String) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                CodePart::Literal(s) => out.push_str(s),
                CodePart::Name(name) => out.push_str(&escape_if_necessary(name)),
                CodePart::Str(s) => out.push_str(&string_literal(s)),
                CodePart::Type(ty) => out.push_str(&resolve(ty)),
            }
        }
        out
    }
}

impl fmt::Display for CodeBlock {
    /// Renders types fully qualified
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(|ty| ty.to_string()))
    }
}
