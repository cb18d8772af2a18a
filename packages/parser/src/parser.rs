//! Extraction of the glossary document model from page markup.
//!
//! Sections are located by element id, not by position. Every section except
//! the item list is optional, and a missing section degrades to an empty
//! value. A page without an item list yields a document with no items.

use roxmltree::Node;

use crate::config::{ABOUT_ID, ITEMS_ID, TAGS_ID, TITLE_ID};
use crate::error::Result;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::markup::{
    element_by_id, find_child, find_children, find_descendant, find_descendants, has_class,
    html_to_xhtml, non_empty_attribute, normalise_whitespace, parse_markup, text_content,
    text_content_excluding,
};
use crate::types::{AboutLink, GlossaryDocument, GlossaryItem, RelatedTerm, TagWithDescription, Term};

/// Class marking the disambiguation span inside a preferred term.
const DISAMBIGUATION_CLASS: &str = "disambiguation";

/// Separator between legacy definition blocks.
const DEFINITION_SEPARATOR: &str = "\n\n";

/// Role of a `dd` element inside an item, decided by its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdRole {
    Definition,
    Tags,
    NeedsUpdating,
    RelatedTerms,
}

impl DdRole {
    /// Classify a `dd` element. Unlabeled or unknown classes are definitions.
    #[must_use]
    pub fn classify(node: Node<'_, '_>) -> Self {
        if has_class(node, "tags") {
            Self::Tags
        } else if has_class(node, "needs-updating") {
            Self::NeedsUpdating
        } else if has_class(node, "related-terms") {
            Self::RelatedTerms
        } else {
            Self::Definition
        }
    }
}

/// Parse a markup string into a document, generating UUIDs for items
/// without a persisted id.
///
/// # Examples
/// ```
/// use glossary_parser::parse_html;
///
/// let markup = r#"<div id="glossary-page-items"><dl>
///   <div data-id="tcp"><dt><dfn><abbr>TCP</abbr></dfn></dt><dd>Transmission Control Protocol</dd></div>
/// </dl></div>"#;
///
/// let document = parse_html(markup).unwrap();
/// assert_eq!(document.items[0].id, "tcp");
/// assert!(document.items[0].preferred_term.is_abbreviation);
/// ```
pub fn parse_html(markup: &str) -> Result<GlossaryDocument> {
    parse_html_with(markup, &mut UuidGenerator)
}

/// Parse a markup string with a caller-supplied id generator.
pub fn parse_html_with(markup: &str, ids: &mut dyn IdGenerator) -> Result<GlossaryDocument> {
    let xhtml = html_to_xhtml(markup);
    let doc = parse_markup(&xhtml)?;
    Ok(parse_document(doc.root_element(), ids))
}

/// Extract the document model from a markup subtree.
pub fn parse_document(root: Node<'_, '_>, ids: &mut dyn IdGenerator) -> GlossaryDocument {
    let title = element_by_id(root, TITLE_ID)
        .map(|n| normalise_whitespace(&text_content(n)))
        .unwrap_or_default();

    let about = element_by_id(root, ABOUT_ID);

    let about_paragraph = about
        .and_then(|n| find_descendant(n, "p"))
        .map(|p| normalise_whitespace(&text_content(p)))
        .unwrap_or_default();

    let about_links = about
        .and_then(|n| find_descendant(n, "ul"))
        .map(parse_about_links)
        .unwrap_or_default();

    let tags_with_descriptions = element_by_id(root, TAGS_ID)
        .map(|n| parse_tags_with_descriptions(n, ids))
        .unwrap_or_default();

    let items = match element_by_id(root, ITEMS_ID).and_then(|n| find_descendant(n, "dl")) {
        Some(dl) => find_children(dl, "div")
            .map(|div| parse_item(div, ids))
            .collect(),
        None => {
            tracing::warn!(container = ITEMS_ID, "no item list found, document has no items");
            Vec::new()
        }
    };

    tracing::debug!(
        items = items.len(),
        tags = tags_with_descriptions.len(),
        "parsed glossary document"
    );

    GlossaryDocument {
        title,
        about_paragraph,
        about_links,
        tags_with_descriptions,
        items,
    }
}

fn parse_about_links(ul: Node<'_, '_>) -> Vec<AboutLink> {
    find_descendants(ul, "li")
        .filter_map(|li| find_descendant(li, "a"))
        .map(|a| AboutLink {
            href: a.attribute("href").unwrap_or_default().to_string(),
            body: normalise_whitespace(&text_content(a)),
        })
        .collect()
}

fn parse_tags_with_descriptions(
    tags: Node<'_, '_>,
    ids: &mut dyn IdGenerator,
) -> Vec<TagWithDescription> {
    let Some(dl) = find_child(tags, "dl") else {
        return Vec::new();
    };

    find_children(dl, "div")
        .map(|div| {
            let text_of = |tag: &str| {
                find_descendant(div, tag)
                    .map(|n| normalise_whitespace(&text_content(n)))
                    .unwrap_or_default()
            };

            TagWithDescription {
                id: non_empty_attribute(div, "data-id")
                    .map(str::to_string)
                    .unwrap_or_else(|| ids.generate()),
                tag: text_of("dt"),
                description: text_of("dd"),
            }
        })
        .collect()
}

/// Extract one item from its `div` element.
///
/// The first `dt` is the preferred term and all later ones are alternatives.
/// Each `dd` is classified once by [`DdRole::classify`], so they may appear
/// in any order.
pub fn parse_item(item: Node<'_, '_>, ids: &mut dyn IdGenerator) -> GlossaryItem {
    let mut dts = find_descendants(item, "dt");
    let preferred_dt = dts.next();
    let alternative_terms: Vec<Term> = dts.map(parse_term).collect();

    let preferred_term = preferred_dt
        .map(parse_term)
        .unwrap_or_else(|| Term::new("", false));
    let has_disambiguation_tag = preferred_dt.is_some_and(has_disambiguation_marker);

    let mut definitions: Vec<String> = Vec::new();
    let mut tags_dd: Option<Node<'_, '_>> = None;
    let mut related_terms_dd: Option<Node<'_, '_>> = None;
    let mut needs_updating = false;

    for dd in find_descendants(item, "dd") {
        match DdRole::classify(dd) {
            DdRole::Definition => {
                let text = normalise_whitespace(&text_content(dd));
                if !text.is_empty() {
                    definitions.push(text);
                }
            }
            DdRole::Tags => {
                tags_dd.get_or_insert(dd);
            }
            DdRole::NeedsUpdating => needs_updating = true,
            DdRole::RelatedTerms => {
                related_terms_dd.get_or_insert(dd);
            }
        }
    }

    let mut tags: Vec<String> = tags_dd
        .map(|dd| {
            find_descendants(dd, "button")
                .map(|button| normalise_whitespace(&text_content(button)))
                .collect()
        })
        .unwrap_or_default();

    let disambiguation_tag = if has_disambiguation_tag && !tags.is_empty() {
        Some(tags.remove(0))
    } else {
        None
    };

    let definition = Some(definitions.join(DEFINITION_SEPARATOR)).filter(|d| !d.is_empty());

    let related_terms = related_terms_dd
        .map(parse_related_terms)
        .unwrap_or_default();

    let persisted_id = non_empty_attribute(item, "data-id");
    let owned = |name: &str| non_empty_attribute(item, name).map(str::to_string);

    GlossaryItem {
        id: persisted_id
            .map(str::to_string)
            .unwrap_or_else(|| ids.generate()),
        id_is_persisted: persisted_id.is_some(),
        preferred_term,
        alternative_terms,
        disambiguation_tag,
        normal_tags: tags,
        definition,
        related_terms,
        needs_updating,
        last_updated_date: owned("data-last-updated"),
        last_updated_by_name: owned("data-last-updated-by-name"),
        last_updated_by_email_address: owned("data-last-updated-by-email-address"),
    }
}

/// The node holding a term's text: its `dfn`, or the `dt` itself.
fn term_node<'a, 'input>(dt: Node<'a, 'input>) -> Node<'a, 'input> {
    find_descendant(dt, "dfn").unwrap_or(dt)
}

fn is_disambiguation_marker(node: Node<'_, '_>) -> bool {
    node.tag_name().name().eq_ignore_ascii_case("span") && has_class(node, DISAMBIGUATION_CLASS)
}

fn has_disambiguation_marker(dt: Node<'_, '_>) -> bool {
    term_node(dt)
        .descendants()
        .skip(1)
        .any(|n| n.is_element() && is_disambiguation_marker(n))
}

/// Extract a term from a `dt` element.
///
/// The disambiguation span, if any, is left out of the body.
pub fn parse_term(dt: Node<'_, '_>) -> Term {
    let node = term_node(dt);

    Term {
        is_abbreviation: find_descendant(node, "abbr").is_some(),
        body: normalise_whitespace(&text_content_excluding(node, is_disambiguation_marker)),
    }
}

/// Extract the related terms from a `dd class="related-terms"` element.
///
/// Each link yields one entry. The fragment of its `href` becomes the id
/// reference; a link without a fragment has no id reference.
pub fn parse_related_terms(dd: Node<'_, '_>) -> Vec<RelatedTerm> {
    find_descendants(dd, "a")
        .map(|a| RelatedTerm {
            id_reference: a
                .attribute("href")
                .and_then(|href| href.split_once('#'))
                .map(|(_, fragment)| fragment)
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string),
            body: normalise_whitespace(&text_content(a)),
        })
        .collect()
}
