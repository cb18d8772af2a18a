//! Text extraction and whitespace normalization.

use regex::Regex;
use roxmltree::Node;
use std::sync::LazyLock;

/// Runs of whitespace, collapsed to a single space by `normalise_whitespace`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace into one space and trim both ends.
///
/// # Examples
/// ```
/// use glossary_parser::markup::normalise_whitespace;
///
/// assert_eq!(normalise_whitespace("  a \n b  "), "a b");
/// assert_eq!(normalise_whitespace(""), "");
/// ```
#[must_use]
pub fn normalise_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// Concatenated text of a node and all of its descendants, unnormalized.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use glossary_parser::markup::text_content;
///
/// let doc = Document::parse("<dfn><abbr>HTTP</abbr> protocol</dfn>").unwrap();
/// assert_eq!(text_content(doc.root_element()), "HTTP protocol");
/// ```
#[must_use]
pub fn text_content(node: Node<'_, '_>) -> String {
    text_content_excluding(node, |_| false)
}

/// Concatenated text of a node and its descendants, skipping every element
/// subtree for which `exclude` returns `true`.
#[must_use]
pub fn text_content_excluding<F>(node: Node<'_, '_>, exclude: F) -> String
where
    F: Fn(Node<'_, '_>) -> bool,
{
    let mut text = String::new();
    collect_text(node, &exclude, &mut text);
    text
}

fn collect_text<F>(node: Node<'_, '_>, exclude: &F, out: &mut String)
where
    F: Fn(Node<'_, '_>) -> bool,
{
    if node.is_text() {
        if let Some(t) = node.text() {
            out.push_str(t);
        }
        return;
    }

    for child in node.children() {
        if child.is_element() && exclude(child) {
            continue;
        }
        collect_text(child, exclude, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::has_class;
    use roxmltree::Document;

    #[test]
    fn test_normalise_whitespace() {
        assert_eq!(normalise_whitespace("  a \n b  "), "a b");
        assert_eq!(normalise_whitespace("a\t\t b"), "a b");
        assert_eq!(normalise_whitespace(""), "");
        assert_eq!(normalise_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_normalise_whitespace_non_breaking_space() {
        assert_eq!(normalise_whitespace("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn test_text_content_nested() {
        let xml = "<dd>Hello <strong>big <em>wide</em></strong> world</dd>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(text_content(doc.root_element()), "Hello big wide world");
    }

    #[test]
    fn test_text_content_excluding_marker() {
        let xml = r#"<dfn><span>Term</span> <span class="disambiguation">(x)</span></dfn>"#;
        let doc = Document::parse(xml).unwrap();
        let text = text_content_excluding(doc.root_element(), |n| has_class(n, "disambiguation"));
        assert_eq!(normalise_whitespace(&text), "Term");
    }
}
