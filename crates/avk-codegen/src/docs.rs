//! Javadoc to KDoc translation

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters allowed in a doc link target
const DOC_LINK: &str = "[0-9A-Za-z._]*";

struct DocRewrites {
    code: Regex,
    link: Regex,
    link_member: Regex,
    linkplain: Regex,
    linkplain_member: Regex,
    trailing_whitespace: Regex,
    leading_tag_space: Regex,
}

#[allow(clippy::expect_used)] // Safe: patterns are fixed at compile time and covered by tests
static REWRITES: Lazy<DocRewrites> = Lazy::new(|| {
    let compile = |pattern: String| Regex::new(&pattern).expect("doc rewrite pattern");
    DocRewrites {
        code: compile(format!(r"\{{@code ({DOC_LINK})\}}")),
        link: compile(format!(r"\{{@link ({DOC_LINK})\}}")),
        link_member: compile(format!(r"\{{@link ({DOC_LINK})#({DOC_LINK})\}}")),
        linkplain: compile(format!(r"\{{@linkplain ({DOC_LINK}) ({DOC_LINK})\}}")),
        linkplain_member: compile(format!(
            r"\{{@linkplain ({DOC_LINK})#({DOC_LINK}) ({DOC_LINK})\}}"
        )),
        trailing_whitespace: compile(r"(?m)\s+$".to_string()),
        leading_tag_space: compile(r"^\s+@".to_string()),
    }
});

/// Clean up a raw doc comment and translate the common Javadoc markup to
/// Markdown.
///
/// ```
/// use avk_codegen::docs::clean_up_doc;
///
/// assert_eq!(clean_up_doc(" Uses {@link Foo#bar}. "), "Uses [Foo.bar].");
/// ```
pub fn clean_up_doc(doc: &str) -> String {
    let r = &*REWRITES;
    let doc = doc
        .lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
        .replace("<em>", "*")
        .replace("</em>", "*")
        .replace("<p>", "")
        .replace("   *", " *");
    let doc = r.code.replace_all(&doc, "`$1`");
    let doc = r.link.replace_all(&doc, "[$1]");
    let doc = r.link_member.replace_all(&doc, "[$1.$2]");
    let doc = r.linkplain.replace_all(&doc, "[$2][$1]");
    let doc = r.linkplain_member.replace_all(&doc, "[$3][$1.$2]");
    let doc = r.trailing_whitespace.replace_all(&doc, "");
    let doc = r.leading_tag_space.replace_all(&doc, "");
    doc.trim().to_string()
}

/// Cleaned doc, or `None` when nothing is left
pub fn doc_of(raw: Option<&str>) -> Option<String> {
    raw.map(clean_up_doc).filter(|doc| !doc.is_empty())
}
