//! Functions for navigating a markup tree by tag name, id and class.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use glossary_parser::markup::get_tag_name;
///
/// let xml = r#"<html xmlns="http://www.w3.org/1999/xhtml"><body/></html>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "html");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

fn is_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node).eq_ignore_ascii_case(tag)
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use glossary_parser::markup::find_child;
///
/// let doc = Document::parse("<div><dl/><p/></div>").unwrap();
/// assert!(find_child(doc.root_element(), "dl").is_some());
/// assert!(find_child(doc.root_element(), "ul").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_tag(*child, tag))
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_tag(*child, tag))
}

/// Find the first descendant element (excluding `node` itself) with the
/// given tag name, in document order.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| is_tag(*n, tag))
}

/// Find all descendant elements (excluding `node` itself) with the given tag
/// name, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use glossary_parser::markup::find_descendants;
///
/// let doc = Document::parse("<dd><a>1</a><p><a>2</a></p></dd>").unwrap();
/// assert_eq!(find_descendants(doc.root_element(), "a").count(), 2);
/// ```
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().skip(1).filter(move |n| is_tag(*n, tag))
}

/// Find the element with the given `id` attribute anywhere below `node`,
/// including `node` itself.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use glossary_parser::markup::element_by_id;
///
/// let doc = Document::parse(r#"<body><h1 id="glossary-page-title">T</h1></body>"#).unwrap();
/// assert!(element_by_id(doc.root_element(), "glossary-page-title").is_some());
/// ```
pub fn element_by_id<'a, 'input>(node: Node<'a, 'input>, id: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && n.attribute("id") == Some(id))
}

/// Check whether an element's `class` attribute contains the given token.
pub fn has_class(node: Node<'_, '_>, class: &str) -> bool {
    node.attribute("class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
}

/// Get an attribute value, treating an empty value as absent.
pub fn non_empty_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_find_child_ignores_grandchildren() {
        let xml = r#"<root><wrapper><dl/></wrapper></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_child(doc.root_element(), "dl").is_none());
        assert!(find_descendant(doc.root_element(), "dl").is_some());
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let xml = r#"<root><DT>term</DT></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_child(doc.root_element(), "dt").is_some());
    }

    #[test]
    fn test_find_descendant_excludes_self() {
        let xml = r#"<div><p><div/></p></div>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();
        let found = find_descendant(root, "div").unwrap();
        assert_ne!(found, root);
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<dl><div>1</div><p/><div>2</div></dl>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(find_children(doc.root_element(), "div").count(), 2);
    }

    #[test]
    fn test_has_class_matches_tokens() {
        let xml = r#"<dd class="related-terms extra"/>"#;
        let doc = Document::parse(xml).unwrap();
        let dd = doc.root_element();

        assert!(has_class(dd, "related-terms"));
        assert!(has_class(dd, "extra"));
        assert!(!has_class(dd, "related"));
    }

    #[test]
    fn test_has_class_without_attribute() {
        let doc = Document::parse("<dd/>").unwrap();
        assert!(!has_class(doc.root_element(), "tags"));
    }

    #[test]
    fn test_non_empty_attribute() {
        let xml = r#"<div data-id="" data-last-updated="2024-01-01"/>"#;
        let doc = Document::parse(xml).unwrap();
        let div = doc.root_element();

        assert_eq!(non_empty_attribute(div, "data-id"), None);
        assert_eq!(
            non_empty_attribute(div, "data-last-updated"),
            Some("2024-01-01")
        );
        assert_eq!(non_empty_attribute(div, "data-missing"), None);
    }
}
