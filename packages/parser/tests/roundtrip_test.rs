//! Parsing markup that was rendered from a parsed document yields the same items.

use glossary_parser::ids::SequentialGenerator;
use glossary_parser::parse_html_with;
use glossary_parser::types::{GlossaryItem, Term};
use pretty_assertions::assert_eq;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn render_term(term: &Term, disambiguation_tag: Option<&str>) -> String {
    let body = if term.is_abbreviation {
        format!("<abbr>{}</abbr>", escape(&term.body))
    } else {
        escape(&term.body)
    };
    let marker = disambiguation_tag
        .map(|tag| format!(r#" <span class="disambiguation">({})</span>"#, escape(tag)))
        .unwrap_or_default();
    format!("<dt><dfn><span>{body}</span>{marker}</dfn></dt>")
}

fn render_item(item: &GlossaryItem) -> String {
    let mut out = format!(r#"<div data-id="{}""#, escape(&item.id));
    if let Some(date) = &item.last_updated_date {
        out.push_str(&format!(r#" data-last-updated="{}""#, escape(date)));
    }
    if let Some(name) = &item.last_updated_by_name {
        out.push_str(&format!(r#" data-last-updated-by-name="{}""#, escape(name)));
    }
    if let Some(email) = &item.last_updated_by_email_address {
        out.push_str(&format!(
            r#" data-last-updated-by-email-address="{}""#,
            escape(email)
        ));
    }
    out.push('>');

    out.push_str(&render_term(&item.preferred_term, item.disambiguation_tag.as_deref()));
    for term in &item.alternative_terms {
        out.push_str(&render_term(term, None));
    }

    let tags: Vec<&str> = item.all_tags().collect();
    if !tags.is_empty() {
        out.push_str(r#"<dd class="tags">"#);
        for tag in tags {
            out.push_str(&format!("<button>{}</button>", escape(tag)));
        }
        out.push_str("</dd>");
    }

    if let Some(definition) = &item.definition {
        for block in definition.split("\n\n") {
            out.push_str(&format!("<dd>{}</dd>", escape(block)));
        }
    }

    if item.needs_updating {
        out.push_str(r#"<dd class="needs-updating">Needs updating</dd>"#);
    }

    if !item.related_terms.is_empty() {
        out.push_str(r#"<dd class="related-terms">"#);
        for related in &item.related_terms {
            let href = related
                .id_reference
                .as_deref()
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "https://example.com/".to_string());
            out.push_str(&format!(r#"<a href="{}">{}</a>"#, escape(&href), escape(&related.body)));
        }
        out.push_str("</dd>");
    }

    out.push_str("</div>");
    out
}

fn render_page(items: &[GlossaryItem]) -> String {
    let body: String = items.iter().map(render_item).collect();
    format!(r#"<html><body><article id="glossary-page-items"><dl>{body}</dl></article></body></html>"#)
}

#[test]
fn test_reparse_of_rendered_items_is_identical() {
    let markup = include_str!("fixtures/glossary.html");
    let first = parse_html_with(markup, &mut SequentialGenerator::new("gen")).unwrap();

    let rendered = render_page(&first.items);
    let second = parse_html_with(&rendered, &mut SequentialGenerator::new("unused")).unwrap();

    // The rendered page persists every id, so only that flag may differ.
    let persisted: Vec<GlossaryItem> = first
        .items
        .into_iter()
        .map(|item| GlossaryItem {
            id_is_persisted: true,
            ..item
        })
        .collect();

    assert_eq!(second.items, persisted);
}

#[test]
fn test_rendering_is_stable_after_first_round() {
    let markup = include_str!("fixtures/glossary.html");
    let first = parse_html_with(markup, &mut SequentialGenerator::new("gen")).unwrap();
    let once = render_page(&first.items);
    let second = parse_html_with(&once, &mut SequentialGenerator::new("gen")).unwrap();
    let twice = render_page(&second.items);

    assert_eq!(once, twice);
}
