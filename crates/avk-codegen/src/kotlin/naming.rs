//! Identifier utilities for Kotlin output.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `value` | [`escape_if_necessary`] | `` `value` `` |
//! | `getURL` | [`decapitalize`] (after prefix removal) | `URL` |
//! | `name` | [`capitalize`] | `Name` |

/// Hard, soft and modifier keywords that must be backtick-escaped when used
/// as identifiers.
pub const KEYWORDS: &[&str] = &[
    // Hard keywords
    "as",
    "break",
    "class",
    "continue",
    "do",
    "else",
    "false",
    "for",
    "fun",
    "if",
    "in",
    "interface",
    "is",
    "null",
    "object",
    "package",
    "return",
    "super",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "var",
    "when",
    "while",
    // Soft keywords
    "by",
    "catch",
    "constructor",
    "delegate",
    "dynamic",
    "field",
    "file",
    "finally",
    "get",
    "import",
    "init",
    "param",
    "property",
    "receiver",
    "set",
    "setparam",
    "value",
    "where",
    // Modifier keywords
    "actual",
    "abstract",
    "annotation",
    "companion",
    "const",
    "crossinline",
    "data",
    "enum",
    "expect",
    "external",
    "final",
    "infix",
    "inline",
    "inner",
    "internal",
    "lateinit",
    "noinline",
    "open",
    "operator",
    "out",
    "override",
    "private",
    "protected",
    "public",
    "reified",
    "sealed",
    "suspend",
    "tailrec",
    "vararg",
];

/// Whether `name` is a Kotlin keyword
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Whether `name` can be written as a bare Kotlin identifier
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Wrap `name` in backticks when it is a keyword or not a plain identifier.
///
/// # Examples
///
/// ```
/// use avk_codegen::kotlin::naming::escape_if_necessary;
///
/// assert_eq!(escape_if_necessary("value"), "`value`");
/// assert_eq!(escape_if_necessary("name"), "name");
/// assert_eq!(escape_if_necessary("my$field"), "`my$field`");
/// ```
pub fn escape_if_necessary(name: &str) -> String {
    if is_keyword(name) || !is_plain_identifier(name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use avk_codegen::kotlin::naming::capitalize;
///
/// assert_eq!(capitalize("name"), "Name");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string unconditionally.
///
/// Used for `withFoo` -> `foo`.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Java bean decapitalization: the first letter is lowercased unless the
/// first two letters are both uppercase.
///
/// # Examples
///
/// ```
/// use avk_codegen::kotlin::naming::decapitalize;
///
/// assert_eq!(decapitalize("Name"), "name");
/// assert_eq!(decapitalize("URL"), "URL");
/// assert_eq!(decapitalize("X"), "x");
/// ```
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => {
            s.to_string()
        }
        _ => lowercase_first(s),
    }
}

/// Quote a string as a Kotlin string literal.
///
/// `$` is escaped so the literal is never read as a template.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote a char as a Kotlin char literal
pub fn char_literal(value: char) -> String {
    match value {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\t' => "'\\t'".to_string(),
        c => format!("'{c}'"),
    }
}
