//! Textual cleanup of rendered sources
//!
//! Runs over the writer's output as plain lines: drops imports Kotlin
//! resolves implicitly, removes explicit `public` markers and normalizes
//! blank lines. The result ends in exactly one newline, and cleaning
//! already-clean text leaves it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Java imports that shadow Kotlin builtins when left in place
pub const INTRINSIC_IMPORTS: &[&str] = &[
    "import java.lang.String",
    "import java.lang.CharSequence",
    "import java.lang.Boolean",
    "import java.lang.Byte",
    "import java.lang.Short",
    "import java.lang.Char",
    "import java.lang.Int",
    "import java.lang.Float",
    "import java.lang.Double",
    "import java.lang.Object",
    "import java.util.Map",
    "import java.util.List",
    "import java.util.Set",
    "import java.util.Collection",
];

/// `import kotlin.String` and friends, which are always in scope
#[allow(clippy::expect_used)] // Safe: fixed pattern, covered by tests
static DEFAULT_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^import kotlin\.[A-Z][A-Za-z0-9_]*$").expect("default import pattern")
});

const PUBLIC: &str = "public ";

/// Clean a rendered file belonging to `package`
pub fn clean(text: &str, package: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        if is_redundant_import(line, package) {
            continue;
        }
        let line = strip_public(line);
        let line = if line.trim().is_empty() { String::new() } else { line };
        if line.is_empty() && lines.last().is_none_or(|previous| previous.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Whether an import line names something visible without it
fn is_redundant_import(line: &str, package: &str) -> bool {
    let line = line.trim_end();
    if !line.starts_with("import ") {
        return false;
    }
    if INTRINSIC_IMPORTS.contains(&line) || DEFAULT_IMPORT.is_match(line) {
        return true;
    }
    !package.is_empty()
        && line
            .strip_prefix("import ")
            .and_then(|imported| imported.strip_prefix(package))
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|simple| !simple.contains('.'))
}

/// Remove leading `public ` markers after the indentation
fn strip_public(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let mut body = body;
    while let Some(rest) = body.strip_prefix(PUBLIC) {
        body = rest.trim_start();
    }
    format!("{indent}{body}")
}
