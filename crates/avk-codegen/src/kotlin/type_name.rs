//! Kotlin type references

use std::fmt;

/// Package of the Kotlin built-ins (`kotlin.String`, `kotlin.Int`, ...)
pub const KOTLIN_PACKAGE: &str = "kotlin";

/// A fully-qualified class, possibly nested (`java.util.Map.Entry`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// A top-level class
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// A class in the `kotlin` package
    pub fn kotlin(simple_name: &str) -> Self {
        Self::new(KOTLIN_PACKAGE, simple_name)
    }

    /// A member class of this class
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Split a canonical name into package and class names.
    ///
    /// Leading segments that start with a lowercase letter are treated as the
    /// package; the rest are class names. A name with no capitalized segment
    /// is treated as a top-level class named by its last segment.
    pub fn best_guess(canonical: &str) -> Self {
        let segments: Vec<&str> = canonical.split('.').collect();
        let first_class = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));
        Self {
            package: segments[..first_class].join("."),
            simple_names: segments[first_class..]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Like [`best_guess`](Self::best_guess), but trusts a known package
    /// boundary when `canonical` starts with it.
    pub fn in_package(package: &str, canonical: &str) -> Self {
        let relative = if package.is_empty() {
            Some(canonical)
        } else {
            canonical
                .strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('.'))
        };
        match relative {
            Some(relative) if !relative.is_empty() => Self {
                package: package.to_string(),
                simple_names: relative.split('.').map(str::to_string).collect(),
            },
            _ => Self::best_guess(canonical),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Innermost simple name
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map_or("", String::as_str)
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// The outermost class containing this one (itself when top level)
    pub fn top_level(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    /// The directly enclosing class, if nested
    pub fn enclosing(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// `package.Outer.Inner`
    pub fn canonical(&self) -> String {
        let names = self.simple_names.join(".");
        if self.package.is_empty() {
            names
        } else {
            format!("{}.{}", self.package, names)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// A use of a type, with nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Class {
        class: ClassName,
        nullable: bool,
    },
    Parameterized {
        raw: ClassName,
        args: Vec<TypeName>,
        nullable: bool,
    },
    /// A type variable; `bounds` only matter where the variable is declared
    Variable {
        name: String,
        bounds: Vec<TypeName>,
        nullable: bool,
    },
}

impl TypeName {
    pub fn class(class: ClassName) -> Self {
        TypeName::Class {
            class,
            nullable: false,
        }
    }

    /// `kotlin.<simple_name>`
    pub fn kotlin(simple_name: &str) -> Self {
        Self::class(ClassName::kotlin(simple_name))
    }

    pub fn parameterized(raw: ClassName, args: Vec<TypeName>) -> Self {
        if args.is_empty() {
            return Self::class(raw);
        }
        TypeName::Parameterized {
            raw,
            args,
            nullable: false,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TypeName::Variable {
            name: name.into(),
            bounds: Vec::new(),
            nullable: false,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeName::Class { nullable, .. }
            | TypeName::Parameterized { nullable, .. }
            | TypeName::Variable { nullable, .. } => *nullable,
        }
    }

    /// This type with the given nullability
    pub fn copy(&self, nullable: bool) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            TypeName::Class { nullable: n, .. }
            | TypeName::Parameterized { nullable: n, .. }
            | TypeName::Variable { nullable: n, .. } => *n = nullable,
        }
        copy
    }

    /// The class of a class or parameterized type
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            TypeName::Class { class, .. } => Some(class),
            TypeName::Parameterized { raw, .. } => Some(raw),
            TypeName::Variable { .. } => None,
        }
    }

    /// Whether this is the unparameterized `kotlin.<simple_name>`
    pub fn is_kotlin(&self, simple_name: &str) -> bool {
        match self {
            TypeName::Class { class, .. } => {
                class.package() == KOTLIN_PACKAGE
                    && class.simple_names().len() == 1
                    && class.simple_name() == simple_name
            }
            _ => false,
        }
    }

    /// Every class referenced by this type, outermost first
    pub fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut classes = Vec::new();
        self.collect_classes(&mut classes);
        classes
    }

    fn collect_classes<'a>(&'a self, out: &mut Vec<&'a ClassName>) {
        match self {
            TypeName::Class { class, .. } => out.push(class),
            TypeName::Parameterized { raw, args, .. } => {
                out.push(raw);
                for arg in args {
                    arg.collect_classes(out);
                }
            }
            TypeName::Variable { bounds, .. } => {
                for bound in bounds {
                    bound.collect_classes(out);
                }
            }
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Class { class, .. } => write!(f, "{class}")?,
            TypeName::Parameterized { raw, args, .. } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")?;
            }
            TypeName::Variable { name, .. } => f.write_str(name)?,
        }
        if self.is_nullable() {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "type_name/type_name_tests.rs"]
mod type_name_tests;
