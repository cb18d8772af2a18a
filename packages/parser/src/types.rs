//! Core data types for the glossary document model.
//!
//! The model is built once per load and handed to the application core as
//! initialization flags, so every type serializes with camelCase field names.

use serde::{Deserialize, Serialize};

/// A single term (word or phrase) of a glossary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Whether the term text contains an abbreviation marker.
    pub is_abbreviation: bool,

    /// Whitespace-normalized term text.
    pub body: String,
}

impl Term {
    /// Create a new term.
    #[must_use]
    pub fn new(body: impl Into<String>, is_abbreviation: bool) -> Self {
        Self {
            is_abbreviation,
            body: body.into(),
        }
    }
}

/// A soft cross-reference from one item to another.
///
/// `id_reference` is never validated against the item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTerm {
    /// Id of the referenced item, taken from the link's fragment identifier.
    pub id_reference: Option<String>,

    /// Link text.
    pub body: String,
}

/// A link in the "about" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutLink {
    pub href: String,
    pub body: String,
}

/// An entry of the tag vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWithDescription {
    pub id: String,
    pub tag: String,
    pub description: String,
}

/// One glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryItem {
    /// Stable identity of the item.
    pub id: String,

    /// `false` when `id` was generated during this parse and has not been
    /// written back to the markup yet.
    pub id_is_persisted: bool,

    pub preferred_term: Term,

    pub alternative_terms: Vec<Term>,

    /// Present only if the preferred term carries a disambiguation marker.
    pub disambiguation_tag: Option<String>,

    pub normal_tags: Vec<String>,

    pub definition: Option<String>,

    pub related_terms: Vec<RelatedTerm>,

    pub needs_updating: bool,

    pub last_updated_date: Option<String>,

    pub last_updated_by_name: Option<String>,

    pub last_updated_by_email_address: Option<String>,
}

impl GlossaryItem {
    /// All terms of the item, preferred term first.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        std::iter::once(&self.preferred_term).chain(self.alternative_terms.iter())
    }

    /// All tags of the item, disambiguation tag first.
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.disambiguation_tag
            .as_deref()
            .into_iter()
            .chain(self.normal_tags.iter().map(String::as_str))
    }
}

/// Root of the document model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryDocument {
    pub title: String,
    pub about_paragraph: String,
    pub about_links: Vec<AboutLink>,
    pub tags_with_descriptions: Vec<TagWithDescription>,
    pub items: Vec<GlossaryItem>,
}

impl GlossaryDocument {
    /// Find an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&GlossaryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Related-term references that name no item in this document.
    ///
    /// Returns `(item id, referenced id)` pairs in document order.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .flat_map(|item| {
                item.related_terms
                    .iter()
                    .filter_map(|related| related.id_reference.as_deref())
                    .filter(|reference| self.item(reference).is_none())
                    .map(move |reference| (item.id.as_str(), reference))
            })
            .collect()
    }
}
