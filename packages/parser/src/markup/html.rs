//! Reading HTML pages.
//!
//! Glossary pages are ordinary HTML5: a doctype, void elements without a
//! closing slash, named entities such as `&nbsp;` and inline scripts. The
//! HTML5 parser reads them the way a browser does and the tree is written
//! back out as well-formed XHTML, which is what the rest of the crate walks
//! with roxmltree.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use roxmltree::{Document, ParsingOptions};

use crate::error::Result;

/// Elements whose content is never page text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Read an HTML page and re-emit it as XHTML.
///
/// Never fails: malformed markup is recovered the way a browser recovers
/// it. Comments, the doctype and [`SKIPPED_ELEMENTS`] are dropped, as are
/// attributes whose names are not plain XML names (`@click`, `xlink:href`).
///
/// # Examples
/// ```
/// use glossary_parser::markup::html_to_xhtml;
///
/// let xhtml = html_to_xhtml("<!DOCTYPE html><p>a&nbsp;b<br></p>");
/// assert_eq!(xhtml, "<html><head></head><body><p>a\u{a0}b<br></br></p></body></html>");
/// ```
pub fn html_to_xhtml(html: &str) -> String {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut out = String::with_capacity(html.len());
    write_node(&dom.document, &mut out);
    out
}

/// Parse XHTML into a tree. A doctype is accepted.
pub fn parse_markup(xhtml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xhtml, options)?)
}

fn write_node(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Document => write_children(handle, out),
        NodeData::Element { name, attrs, .. } => {
            let tag: &str = &name.local;
            if SKIPPED_ELEMENTS.contains(&tag) {
                return;
            }
            if !is_xml_name(tag) {
                write_children(handle, out);
                return;
            }

            out.push('<');
            out.push_str(tag);
            for attr in attrs.borrow().iter() {
                let attr_name: &str = &attr.name.local;
                if attr.name.prefix.is_some()
                    || attr_name.starts_with("xmlns")
                    || !is_xml_name(attr_name)
                {
                    continue;
                }
                out.push(' ');
                out.push_str(attr_name);
                out.push_str("=\"");
                escape_into(&attr.value, out);
                out.push('"');
            }
            out.push('>');

            write_children(handle, out);

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeData::Text { contents } => escape_into(&contents.borrow(), out),
        _ => {}
    }
}

fn write_children(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        write_node(child, out);
    }
}

/// ASCII XML name without a namespace prefix.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
}
